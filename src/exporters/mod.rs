pub mod csv;
pub mod jsonl;

pub use csv::CsvConverter;
pub use jsonl::JsonlConverter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,  // JSON array, the default
    Csv,   // Comma-separated values
    Jsonl, // JSON Lines (one JSON object per line)
}

impl ExportFormat {
    /// Parse format from a query parameter or file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "jsonl" | "ndjson" => Some(ExportFormat::Jsonl),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Jsonl => "application/x-ndjson",
        }
    }
}
