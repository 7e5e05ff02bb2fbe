//! Server state and configuration.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use crate::notify::Notifier;
use crate::store::Store;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Path to the SQLite database file
    pub db_path: String,
    /// Public base URL used to build shareable form links
    pub public_url: String,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Store behind a lock; handlers acquire it per request and release on
    /// drop.
    pub store: Mutex<Store>,
    pub notifier: Arc<dyn Notifier>,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            config,
            store: Mutex::new(store),
            notifier,
            boot_time,
        }
    }
}
