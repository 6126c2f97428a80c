use thiserror::Error;

/// Errors raised while loading or transforming the PM2.5 dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The requested data variable is not in the file
    #[error("Variable '{name}' not found in {path}")]
    MissingVariable { name: String, path: String },

    /// A coordinate dimension is not in the file
    #[error("Dimension '{name}' not found in {path}")]
    MissingDimension { name: String, path: String },

    /// The data variable is not laid out over latitude and longitude only
    #[error("Unsupported layout for variable '{name}': dimensions {dimensions:?}")]
    UnsupportedLayout {
        name: String,
        dimensions: Vec<String>,
    },

    /// None of the accepted column names is present in a tabular file
    #[error("Missing column: expected one of {candidates:?}")]
    MissingColumn { candidates: Vec<String> },

    #[error("Unsupported dataset format: {path}")]
    UnsupportedFormat { path: String },

    /// The loader exists but was compiled out
    #[error("{format} datasets are not enabled. Enable with --features {feature}")]
    FeatureDisabled {
        format: &'static str,
        feature: &'static str,
    },

    #[error("Invalid truncation fraction: {0} (must be at least 1)")]
    InvalidFraction(usize),

    #[error("Cannot normalize PM2.5 levels: min and max values are equal")]
    DegenerateRange,

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),
}

impl DatasetError {
    pub fn missing_column(candidates: &[&str]) -> Self {
        DatasetError::MissingColumn {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }
}
