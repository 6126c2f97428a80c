use std::path::Path;

use polars::prelude::*;
use tracing::info;

use super::error::DatasetError;
use super::loader::into_records;
use crate::datamodel::Pm25Record;

const LATITUDE_COLUMNS: &[&str] = &["Latitude", "lat"];
const LONGITUDE_COLUMNS: &[&str] = &["Longitude", "lon"];
const VALUE_COLUMNS: &[&str] = &["PM2.5", "GWRPM25", "pm25"];

/// Reads a tabular export of the dataset, one grid cell per row.
pub fn load_csv(path: &Path) -> Result<Vec<Pm25Record>, DatasetError> {
    info!("Opening CSV file: {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!("CSV file opened successfully, {} rows.", df.height());

    let latitudes = float_column(&df, LATITUDE_COLUMNS)?;
    let longitudes = float_column(&df, LONGITUDE_COLUMNS)?;
    let values = float_column(&df, VALUE_COLUMNS)?;

    let rows = latitudes
        .into_iter()
        .zip(longitudes)
        .zip(values)
        .filter_map(|((lat, lon), value)| Some((lat?, lon?, value)));

    Ok(into_records(rows))
}

fn float_column(df: &DataFrame, candidates: &[&str]) -> Result<Vec<Option<f64>>, DatasetError> {
    let name = candidates
        .iter()
        .find(|name| df.get_column_index(name).is_some())
        .ok_or_else(|| DatasetError::missing_column(candidates))?;

    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column.as_materialized_series().f64()?.into_iter().collect();
    Ok(values)
}
