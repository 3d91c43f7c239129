//! Coffee record storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         CoffeeService / Seed Loader         │
//! └──────────────────────┬──────────────────────┘
//!                        │ Arc<dyn CoffeeStore>
//!           ┌────────────┴────────────┐
//!           ▼                         ▼
//! ┌───────────────────┐     ┌───────────────────┐
//! │ MemoryCoffeeStore │     │ SqliteCoffeeStore │
//! │  RwLock<Vec<_>>   │     │ Mutex<Connection> │
//! └───────────────────┘     └───────────────────┘
//! ```
//!
//! Both implementations are keyed by the record identifier and hold at most
//! one record per identifier. Writes to the same identifier race and the
//! last writer wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::error::AppResult;
use crate::models::{Coffee, CoffeeRequest};

pub mod id;
mod memory;
mod sqlite;
#[cfg(test)]
mod unavailable;

pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use memory::MemoryCoffeeStore;
pub use sqlite::SqliteCoffeeStore;
#[cfg(test)]
pub(crate) use unavailable::UnavailableStore;

/// Keyed collection of coffee records.
#[async_trait]
pub trait CoffeeStore: Send + Sync {
    /// Store every record, generating identifiers for those without one.
    ///
    /// Either all records are stored or none are. An identifier that is
    /// already present is overwritten.
    async fn insert_all(&self, records: Vec<CoffeeRequest>) -> AppResult<Vec<Coffee>>;

    /// Every stored record. Only the memory store guarantees insertion order.
    async fn find_all(&self) -> AppResult<Vec<Coffee>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Coffee>>;

    async fn exists_by_id(&self, id: &str) -> AppResult<bool>;

    /// Insert the record, or replace the name of the record with its id.
    async fn save(&self, coffee: Coffee) -> AppResult<Coffee>;

    /// Remove the record if present. Deleting an unknown id is not an error.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    async fn count(&self) -> AppResult<usize>;

    /// Short backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Open the store selected by `config.store_backend`.
///
/// # Errors
///
/// Returns `AppError::StorageUnavailable` if the SQLite database cannot be
/// opened or its table cannot be created.
pub async fn build_store(
    config: &Config,
    ids: Arc<dyn IdGenerator>,
) -> AppResult<Arc<dyn CoffeeStore>> {
    let store: Arc<dyn CoffeeStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryCoffeeStore::new(ids)),
        StoreBackend::Sqlite => {
            Arc::new(SqliteCoffeeStore::open(config.database_path.clone(), ids).await?)
        }
    };

    info!(backend = store.backend(), "Coffee store ready");
    Ok(store)
}
