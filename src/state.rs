// src/state.rs

use crate::config::Config;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub config: Config,
}

impl AppState {
    pub fn new(storage: Storage, config: Config) -> Self {
        Self { storage, config }
    }
}
