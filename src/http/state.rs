use crate::dataset::SharedStore;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HttpServerState {
    pub name: Arc<String>,
    pub store: SharedStore,
}
