use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Pm25Record;

/// Basic statistics over the PM2.5 column.
///
/// The aggregates are `None` when there is nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pm25Statistics {
    pub count: usize,
    pub average_pm25: Option<f64>,
    pub min_pm25: Option<f64>,
    pub max_pm25: Option<f64>,
}

impl Pm25Statistics {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Pm25Record>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for record in records {
            count += 1;
            sum += record.pm25;
            min = Some(min.map_or(record.pm25, |m| m.min(record.pm25)));
            max = Some(max.map_or(record.pm25, |m| m.max(record.pm25)));
        }

        Self {
            count,
            average_pm25: (count > 0).then(|| sum / count as f64),
            min_pm25: min,
            max_pm25: max,
        }
    }
}

/// A record whose concentration has been rescaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedPm25Record {
    pub id: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "PM2.5_normalized")]
    pub pm25_normalized: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[f64]) -> Vec<Pm25Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Pm25Record::new(i as i64, 0.0, 0.0, *v))
            .collect()
    }

    #[test]
    fn test_compute_statistics() {
        let records = records(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let stats = Pm25Statistics::compute(&records);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.average_pm25, Some(30.0));
        assert_eq!(stats.min_pm25, Some(10.0));
        assert_eq!(stats.max_pm25, Some(50.0));
    }

    #[test]
    fn test_compute_statistics_empty() {
        let stats = Pm25Statistics::compute(&Vec::<Pm25Record>::new());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_pm25, None);
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"count":0,"average_pm25":null,"min_pm25":null,"max_pm25":null}"#
        );
    }

    #[test]
    fn test_normalized_serialization() {
        let record = NormalizedPm25Record {
            id: 1,
            latitude: 1.0,
            longitude: 2.0,
            pm25_normalized: 0.5,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"Latitude":1.0,"Longitude":2.0,"PM2.5_normalized":0.5}"#
        );
    }
}
