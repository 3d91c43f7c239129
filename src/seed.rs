//! Startup seed data.

use tracing::{info, instrument};

use crate::error::AppResult;
use crate::models::{Coffee, CoffeeRequest};
use crate::store::CoffeeStore;

/// Names of the coffees loaded at startup.
pub const SEED_COFFEES: [&str; 4] = [
    "Cafe Cereza",
    "Cafe Ganador",
    "Cafe Lareno",
    "Cafe Tres Pontas",
];

/// Insert the starter coffees with freshly generated identifiers.
///
/// Must complete before the listener is bound. The records go in through
/// [`CoffeeStore::insert_all`], so a failure leaves the store untouched.
/// A store that already holds records (a reopened SQLite file) is left as
/// is and an empty list is returned.
///
/// # Errors
///
/// Propagates the store error; callers treat it as fatal.
#[instrument(skip(store), fields(backend = store.backend()))]
pub async fn load_seed_data(store: &dyn CoffeeStore) -> AppResult<Vec<Coffee>> {
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "Store already populated, skipping seed");
        return Ok(Vec::new());
    }

    let records = SEED_COFFEES.iter().map(|name| CoffeeRequest::named(*name)).collect();

    let seeded = store.insert_all(records).await?;
    info!(count = seeded.len(), "Seed coffees loaded");

    Ok(seeded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::store::{MemoryCoffeeStore, SqliteCoffeeStore, UnavailableStore, UuidIdGenerator};

    async fn assert_seeded(store: &dyn CoffeeStore) {
        load_seed_data(store).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 4);

        let names: HashSet<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, SEED_COFFEES.into_iter().collect::<HashSet<_>>());

        let ids: HashSet<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_seed_memory_store() {
        let store = MemoryCoffeeStore::new(Arc::new(UuidIdGenerator));
        assert_seeded(&store).await;

        // Memory store keeps insertion order
        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, SEED_COFFEES);
    }

    #[tokio::test]
    async fn test_seed_sqlite_store() {
        let store = SqliteCoffeeStore::open(":memory:", Arc::new(UuidIdGenerator))
            .await
            .unwrap();
        assert_seeded(&store).await;
    }

    #[tokio::test]
    async fn test_seed_skips_reopened_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coffee.db").to_string_lossy().to_string();

        for _ in 0..3 {
            let store = SqliteCoffeeStore::open(path.clone(), Arc::new(UuidIdGenerator))
                .await
                .unwrap();
            load_seed_data(&store).await.unwrap();
        }

        let store = SqliteCoffeeStore::open(path, Arc::new(UuidIdGenerator))
            .await
            .unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_seed_leaves_populated_store_alone() {
        let store = MemoryCoffeeStore::new(Arc::new(UuidIdGenerator));
        store.save(Coffee::new("mine", "House Blend")).await.unwrap();

        let seeded = load_seed_data(&store).await.unwrap();

        assert!(seeded.is_empty());
        assert_eq!(store.find_all().await.unwrap(), vec![Coffee::new("mine", "House Blend")]);
    }

    #[tokio::test]
    async fn test_seed_failure_is_reported() {
        let err = load_seed_data(&UnavailableStore).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
