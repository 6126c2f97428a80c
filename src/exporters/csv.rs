use crate::datamodel::Pm25Record;
use std::fmt::Write;

pub const CSV_HEADER: &str = "id,Latitude,Longitude,PM2.5\n";

/// Converter for PM2.5 records to CSV format
pub struct CsvConverter;

impl CsvConverter {
    pub fn to_csv(records: &[Pm25Record]) -> String {
        let mut csv_output = String::with_capacity(CSV_HEADER.len() + records.len() * 32);
        csv_output.push_str(CSV_HEADER);
        for record in records {
            // Writing into a String cannot fail
            let _ = writeln!(
                csv_output,
                "{},{},{},{}",
                record.id, record.latitude, record.longitude, record.pm25
            );
        }
        csv_output
    }
}
