use crate::datamodel::Pm25Record;
use anyhow::Result;

/// Converter for PM2.5 records to JSON Lines format
pub struct JsonlConverter;

impl JsonlConverter {
    /// One JSON object per line, with the same keys as the JSON API
    pub fn to_jsonl(records: &[Pm25Record]) -> Result<String> {
        let mut jsonl_output = String::new();
        for record in records {
            jsonl_output.push_str(&serde_json::to_string(record)?);
            jsonl_output.push('\n');
        }
        Ok(jsonl_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_records_to_jsonl() {
        let records = vec![
            Pm25Record::new(0, 10.0, 20.0, 15.5),
            Pm25Record::new(1, 11.0, 21.0, 16.5),
        ];
        let output = JsonlConverter::to_jsonl(&records).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 0);
        assert_eq!(first["PM2.5"], 15.5);
        assert!(output.ends_with('\n'));
    }
}
