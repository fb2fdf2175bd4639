//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{ConfigLoader, EngineConfig};
use crate::error::EngineResult;
use crate::store::DataStore;

/// Shared application state.
///
/// Holds the engine configuration and the in-memory data store. Handlers
/// take a read lock to snapshot data for scoring and a write lock to
/// record attendance.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    store: Arc<RwLock<DataStore>>,
}

impl AppState {
    /// Creates application state from loaded configuration, seeding the store.
    pub fn new(loader: ConfigLoader) -> EngineResult<Self> {
        let (config, seed) = loader.into_parts();
        let store = DataStore::from_seed(seed)?;
        Ok(Self::from_parts(config, store))
    }

    /// Creates application state from an existing configuration and store.
    pub fn from_parts(config: EngineConfig, store: DataStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the shared data store.
    pub fn store(&self) -> &RwLock<DataStore> {
        &self.store
    }

    /// Returns the configured Bradford rolling window in months.
    pub fn rolling_months(&self) -> u32 {
        self.config.bradford.rolling_months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_new_seeds_store_from_config() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::new(loader).unwrap();

        assert_eq!(state.rolling_months(), 12);
        let store = state.store().read().await;
        assert_eq!(store.team_members().len(), 4);
        assert!(!store.attendance().is_empty());
    }
}
