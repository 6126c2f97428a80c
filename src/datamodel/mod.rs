pub mod record;
pub mod region;
pub mod statistics;

pub use record::{EntryCreated, MessageResponse, NewPm25Entry, Pm25Record};
pub use region::{Region, RegionMatcher};
pub use statistics::{NormalizedPm25Record, Pm25Statistics};
