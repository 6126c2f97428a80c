//! Test utilities for the PM2.5 API tests
//!
//! Fixture stores shared by unit and integration tests.

use crate::datamodel::Pm25Record;
use crate::dataset::{Pm25Store, SharedStore, shared};
use crate::http::state::HttpServerState;
use std::sync::Arc;

/// A small grid with distinct concentrations, ids 0..6.
///
/// | id | Latitude | Longitude | PM2.5 |
/// |----|----------|-----------|-------|
/// | 0  | 10.0     | 30.0      | 15.0  |
/// | 1  | 20.0     | 40.0      | 25.0  |
/// | 2  | 10.0     | 30.0      | 35.0  |
/// | 3  | 15.0     | 35.0      | 5.0   |
/// | 4  | -12.5    | 100.25    | 42.0  |
/// | 5  | 60.0     | -150.0    | 8.5   |
pub fn sample_records() -> Vec<Pm25Record> {
    vec![
        Pm25Record::new(0, 10.0, 30.0, 15.0),
        Pm25Record::new(1, 20.0, 40.0, 25.0),
        Pm25Record::new(2, 10.0, 30.0, 35.0),
        Pm25Record::new(3, 15.0, 35.0, 5.0),
        Pm25Record::new(4, -12.5, 100.25, 42.0),
        Pm25Record::new(5, 60.0, -150.0, 8.5),
    ]
}

/// `count` records on a diagonal where the concentration equals the index.
pub fn ramp_records(count: usize) -> Vec<Pm25Record> {
    (0..count)
        .map(|i| Pm25Record::new(i as i64, i as f64, i as f64, i as f64))
        .collect()
}

pub fn sample_store() -> SharedStore {
    shared(Pm25Store::from_records(sample_records()))
}

pub fn state_with(store: SharedStore) -> HttpServerState {
    HttpServerState {
        name: Arc::new("PM2.5 REST API Test".to_string()),
        store,
    }
}
