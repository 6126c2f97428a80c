use pm25api::dataset::{Pm25Store, SharedStore, shared};
use pm25api::test_utils::{ramp_records, sample_store};

pub mod fixtures;
pub mod http;

/// Store holding the six sample records
pub fn sample() -> SharedStore {
    sample_store()
}

/// Store with `count` records whose PM2.5 equals their id
pub fn ramp(count: usize) -> SharedStore {
    shared(Pm25Store::from_records(ramp_records(count)))
}

pub fn empty() -> SharedStore {
    shared(Pm25Store::new())
}
