use tracing::info;

use super::error::DatasetError;
use crate::datamodel::{
    NewPm25Entry, NormalizedPm25Record, Pm25Record, Pm25Statistics, Region, RegionMatcher,
};

/// Number of records returned by the most polluted ranking.
pub const TOP_POLLUTED_LIMIT: usize = 10;

/// Ordered in-memory table of PM2.5 records.
///
/// Insertion order is preserved across every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pm25Store {
    records: Vec<Pm25Record>,
}

impl Pm25Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Pm25Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all(&self) -> &[Pm25Record] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<Pm25Record> {
        self.records.iter().find(|r| r.id == id).copied()
    }

    /// Appends the entry with the next id, one past the current maximum.
    pub fn add(&mut self, entry: NewPm25Entry) -> i64 {
        let new_id = self.records.iter().map(|r| r.id).max().map_or(0, |m| m + 1);
        self.records.push(entry.into_record(new_id));
        info!("Added new data entry with ID {}.", new_id);
        new_id
    }

    pub fn update(&mut self, id: i64, entry: NewPm25Entry) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                *record = entry.into_record(id);
                info!("Updated data entry with ID {}.", id);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: i64) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                info!("Deleted data entry with ID {}.", id);
                true
            }
            None => false,
        }
    }

    pub fn statistics(&self) -> Pm25Statistics {
        let stats = Pm25Statistics::compute(&self.records);
        info!("Calculated dataset statistics.");
        stats
    }

    /// Exact match on whichever coordinates are provided.
    pub fn filter(&self, lat: Option<f64>, lon: Option<f64>) -> Vec<Pm25Record> {
        let filtered = self
            .records
            .iter()
            .filter(|r| lat.is_none_or(|lat| r.latitude == lat))
            .filter(|r| lon.is_none_or(|lon| r.longitude == lon))
            .copied()
            .collect();
        info!("Filtered data based on provided criteria.");
        filtered
    }

    pub fn in_region(&self, region: &Region) -> Vec<Pm25Record> {
        let matcher = RegionMatcher::new(region);
        let matching = self
            .records
            .iter()
            .filter(|r| matcher.contains(r))
            .copied()
            .collect();
        info!("Retrieved data within the specified region.");
        matching
    }

    /// Min-max scaling of the concentrations to `[0, 1]`.
    pub fn normalized(&self) -> Result<Vec<NormalizedPm25Record>, DatasetError> {
        let stats = Pm25Statistics::compute(&self.records);
        let (Some(min), Some(max)) = (stats.min_pm25, stats.max_pm25) else {
            return Ok(Vec::new());
        };
        if min == max {
            return Err(DatasetError::DegenerateRange);
        }

        let range = max - min;
        let normalized = self
            .records
            .iter()
            .map(|r| NormalizedPm25Record {
                id: r.id,
                latitude: r.latitude,
                longitude: r.longitude,
                pm25_normalized: (r.pm25 - min) / range,
            })
            .collect();
        info!("Normalized PM2.5 levels to range between 0 and 1.");
        Ok(normalized)
    }

    /// The `limit` highest concentrations, descending. Ties keep store order.
    pub fn top_polluted(&self, limit: usize) -> Vec<Pm25Record> {
        let mut ranked = self.records.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.pm25.total_cmp(&a.pm25));
        ranked.truncate(limit);
        info!("Retrieved top {} most polluted locations in the dataset.", limit);
        ranked
    }
}
