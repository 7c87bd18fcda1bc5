//! # Application State
//!
//! What every handler can reach through `State<AppState>`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(AppState)                                          │
//! │            │  (cloned per request, all fields are shared handles)      │
//! │            ▼                                                            │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │ CatalogService                                               │      │
//! │  │   Database          ── SqlitePool (internally synchronized)  │      │
//! │  │   ReservationStore  ── Arc<Mutex<Vec<InventoryUnit>>>        │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tracing::info;

use crate::config::ApiConfig;
use crate::services::CatalogService;
use shelf_core::ReservationStore;
use shelf_db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    /// Wraps an open database and an inventory.
    pub fn new(db: Database, inventory: ReservationStore) -> Self {
        AppState {
            catalog: CatalogService::new(db, inventory),
        }
    }

    /// Opens the database described by `config` (running migrations) and
    /// seeds the inventory if asked to.
    pub async fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let db_config = config.db_config();

        if !db_config.is_in_memory() {
            if let Some(parent) = db_config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("creating database directory {}", parent.display())
                    })?;
                }
            }
        }

        let db = Database::new(db_config)
            .await
            .with_context(|| format!("opening database {}", config.db_path.display()))?;

        let inventory = if config.seed_inventory {
            ReservationStore::with_demo_inventory()
        } else {
            ReservationStore::default()
        };
        info!(units = inventory.snapshot().len(), "Inventory initialized");

        Ok(AppState::new(db, inventory))
    }
}
