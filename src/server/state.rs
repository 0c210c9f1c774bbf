//! Shared handler state

use crate::core::media::MediaStore;
use crate::storage::EntityStore;

/// State handed to every entity router
#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
    pub media: MediaStore,
}

impl AppState {
    pub fn new(store: EntityStore, media: MediaStore) -> Self {
        Self { store, media }
    }
}
