pub mod csv;
pub mod error;
pub mod loader;
#[cfg(feature = "netcdf")]
pub mod netcdf_loader;
pub mod store;

pub use error::DatasetError;
pub use loader::{LoadOptions, load_dataset};
pub use store::{Pm25Store, TOP_POLLUTED_LIMIT};

use std::sync::Arc;
use tokio::sync::RwLock;

/// The store as shared between request handlers.
pub type SharedStore = Arc<RwLock<Pm25Store>>;

pub fn shared(store: Pm25Store) -> SharedStore {
    Arc::new(RwLock::new(store))
}
