use std::path::PathBuf;
use std::sync::Arc;

use crate::app::{Result, TouchlineError};
use crate::client::{Client, HttpClient};
use crate::config::Config;
use crate::store::{SqliteStore, Store};

/// Wires together the shared collaborators: configuration, storage and
/// the HTTP client. Everything downstream receives these explicitly.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub client: Arc<dyn Client>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match config.database.path.clone() {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store: Arc<dyn Store> = Arc::new(SqliteStore::new(&db_path)?);
        let client: Arc<dyn Client> = Arc::new(HttpClient::new());

        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory()?);
        let client: Arc<dyn Client> = Arc::new(HttpClient::new());

        Ok(Self {
            config,
            store,
            client,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TouchlineError::Config("Could not find data directory".into()))?;
        let touchline_dir = data_dir.join("touchline");
        std::fs::create_dir_all(&touchline_dir)?;
        Ok(touchline_dir.join("touchline.db"))
    }
}
