use observatory::{object_store::ObjectStore, resolve::InputResolver};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<InputResolver<Arc<dyn ObjectStore>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            resolver: Arc::new(InputResolver::new(store)),
        }
    }
}
