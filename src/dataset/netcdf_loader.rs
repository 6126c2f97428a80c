use std::path::Path;

use netcdf::{AttributeValue, Variable};
use tracing::info;

use super::error::DatasetError;
use super::loader::{LoadOptions, into_records};
use crate::datamodel::Pm25Record;

const LAT_DIMENSION: &str = "lat";
const LON_DIMENSION: &str = "lon";

/// Order of the two grid dimensions in the data variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridLayout {
    LatLon,
    LonLat,
}

/// Reads the truncated lat/lon hyperslab of the concentration variable.
///
/// Only the first `len / fraction` indices of each dimension are read from
/// disk. Rows follow the variable's own dimension order.
pub fn load_netcdf(path: &Path, options: &LoadOptions) -> Result<Vec<Pm25Record>, DatasetError> {
    let path_str = path.display().to_string();
    info!("Opening NetCDF file: {}", path_str);
    let file = netcdf::open(path)?;
    info!("NetCDF file opened successfully.");

    let dimension_len = |name: &str| {
        file.dimension(name)
            .map(|d| d.len())
            .ok_or_else(|| DatasetError::MissingDimension {
                name: name.to_string(),
                path: path_str.clone(),
            })
    };
    let lat_len = dimension_len(LAT_DIMENSION)? / options.lat_fraction;
    let lon_len = dimension_len(LON_DIMENSION)? / options.lon_fraction;

    info!(
        "Truncating to 1/{} of latitude and 1/{} of longitude range.",
        options.lat_fraction, options.lon_fraction
    );
    info!(
        "Latitude indices: 0..{}, Longitude indices: 0..{}",
        lat_len, lon_len
    );

    let coordinate = |name: &str, len: usize| -> Result<Vec<f64>, DatasetError> {
        let variable = file
            .variable(name)
            .ok_or_else(|| DatasetError::MissingVariable {
                name: name.to_string(),
                path: path_str.clone(),
            })?;
        // Coordinate axes are small, read whole and cut in memory
        let mut values = variable.get_values::<f64, _>(..)?;
        values.truncate(len);
        Ok(values)
    };
    let latitudes = coordinate(LAT_DIMENSION, lat_len)?;
    let longitudes = coordinate(LON_DIMENSION, lon_len)?;

    let variable = file
        .variable(&options.variable)
        .ok_or_else(|| DatasetError::MissingVariable {
            name: options.variable.clone(),
            path: path_str.clone(),
        })?;
    let layout = grid_layout(&variable, &options.variable)?;
    let decoder = ValueDecoder::from_variable(&variable)?;

    info!("Converting the selected subset to records...");
    let rows = match layout {
        GridLayout::LatLon => {
            let raw = variable.get_values::<f64, _>((0..lat_len, 0..lon_len))?;
            grid_rows(&latitudes, &longitudes, &raw, &decoder, layout)
        }
        GridLayout::LonLat => {
            let raw = variable.get_values::<f64, _>((0..lon_len, 0..lat_len))?;
            grid_rows(&latitudes, &longitudes, &raw, &decoder, layout)
        }
    };

    Ok(into_records(rows))
}

fn grid_layout(variable: &Variable, name: &str) -> Result<GridLayout, DatasetError> {
    let dimensions: Vec<String> = variable.dimensions().iter().map(|d| d.name()).collect();
    match dimensions.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [LAT_DIMENSION, LON_DIMENSION] => Ok(GridLayout::LatLon),
        [LON_DIMENSION, LAT_DIMENSION] => Ok(GridLayout::LonLat),
        _ => Err(DatasetError::UnsupportedLayout {
            name: name.to_string(),
            dimensions,
        }),
    }
}

/// Packing and missing value conventions of a NetCDF variable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ValueDecoder {
    fill_value: Option<f64>,
    missing_value: Option<f64>,
    scale_factor: Option<f64>,
    add_offset: Option<f64>,
}

impl ValueDecoder {
    fn from_variable(variable: &Variable) -> Result<Self, DatasetError> {
        Ok(Self {
            fill_value: numeric_attribute(variable, "_FillValue")?,
            missing_value: numeric_attribute(variable, "missing_value")?,
            scale_factor: numeric_attribute(variable, "scale_factor")?,
            add_offset: numeric_attribute(variable, "add_offset")?,
        })
    }

    /// `None` for fill, missing and NaN values.
    fn decode(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() || Some(raw) == self.fill_value || Some(raw) == self.missing_value {
            return None;
        }
        Some(raw * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0))
    }
}

fn numeric_attribute(variable: &Variable, name: &str) -> Result<Option<f64>, DatasetError> {
    let Some(attribute) = variable.attribute(name) else {
        return Ok(None);
    };
    let value = match attribute.value()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Uint(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Ushort(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Uchar(v) => Some(v as f64),
        // Vector attributes carry the value in their first element
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|x| *x as f64),
        AttributeValue::Longlongs(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ulonglongs(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ints(v) => v.first().map(|x| *x as f64),
        AttributeValue::Uints(v) => v.first().map(|x| *x as f64),
        AttributeValue::Shorts(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ushorts(v) => v.first().map(|x| *x as f64),
        AttributeValue::Schars(v) => v.first().map(|x| *x as f64),
        AttributeValue::Uchars(v) => v.first().map(|x| *x as f64),
        _ => None,
    };
    Ok(value)
}

fn grid_rows(
    latitudes: &[f64],
    longitudes: &[f64],
    raw: &[f64],
    decoder: &ValueDecoder,
    layout: GridLayout,
) -> Vec<(f64, f64, Option<f64>)> {
    let (outer, inner) = match layout {
        GridLayout::LatLon => (latitudes, longitudes),
        GridLayout::LonLat => (longitudes, latitudes),
    };
    let mut rows = Vec::with_capacity(raw.len());
    for (i, outer_value) in outer.iter().enumerate() {
        for (j, inner_value) in inner.iter().enumerate() {
            let value = raw
                .get(i * inner.len() + j)
                .and_then(|raw| decoder.decode(*raw));
            let (lat, lon) = match layout {
                GridLayout::LatLon => (*outer_value, *inner_value),
                GridLayout::LonLat => (*inner_value, *outer_value),
            };
            rows.push((lat, lon, value));
        }
    }
    rows
}
