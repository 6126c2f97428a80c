use std::path::Path;

use tracing::info;

use super::error::DatasetError;
use super::store::Pm25Store;
use crate::datamodel::Pm25Record;

#[cfg(feature = "netcdf")]
use super::netcdf_loader::load_netcdf;

use super::csv::load_csv;

pub const DEFAULT_VARIABLE: &str = "GWRPM25";

/// How much of the source grid is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Name of the concentration variable in gridded files
    pub variable: String,
    /// Keep the first `1 / lat_fraction` of the latitude indices
    pub lat_fraction: usize,
    /// Keep the first `1 / lon_fraction` of the longitude indices
    pub lon_fraction: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            lat_fraction: 6,
            lon_fraction: 6,
        }
    }
}

impl LoadOptions {
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.lat_fraction == 0 {
            return Err(DatasetError::InvalidFraction(self.lat_fraction));
        }
        if self.lon_fraction == 0 {
            return Err(DatasetError::InvalidFraction(self.lon_fraction));
        }
        Ok(())
    }
}

/// Loads a dataset file, picking the reader from the file extension.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Pm25Store, DatasetError> {
    options.validate()?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let records = match extension.as_str() {
        #[cfg(feature = "netcdf")]
        "nc" | "nc4" | "netcdf" => load_netcdf(path, options)?,

        #[cfg(not(feature = "netcdf"))]
        "nc" | "nc4" | "netcdf" => {
            return Err(DatasetError::FeatureDisabled {
                format: "NetCDF",
                feature: "netcdf",
            });
        }

        "csv" => load_csv(path)?,

        _ => {
            return Err(DatasetError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };

    log_head(&records);
    info!("Dataset processing completed successfully.");
    Ok(Pm25Store::from_records(records))
}

/// Drops rows without a usable concentration and assigns ids in row order.
pub(crate) fn into_records<I>(rows: I) -> Vec<Pm25Record>
where
    I: IntoIterator<Item = (f64, f64, Option<f64>)>,
{
    rows.into_iter()
        .filter_map(|(lat, lon, value)| match value {
            Some(v) if !v.is_nan() => Some((lat, lon, v)),
            _ => None,
        })
        .enumerate()
        .map(|(id, (lat, lon, v))| Pm25Record::new(id as i64, lat, lon, v))
        .collect()
}

fn log_head(records: &[Pm25Record]) {
    info!("First 5 entries of the dataset:");
    for record in records.iter().take(5) {
        info!(
            "{:>6} {:>10.4} {:>10.4} {:>10.4}",
            record.id, record.latitude, record.longitude, record.pm25
        );
    }
}
