use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CoffeeStore, IdGenerator};
use crate::error::AppResult;
use crate::models::{Coffee, CoffeeRequest};

/// In-process coffee store.
///
/// Records live in one insertion-ordered `Vec` behind a single lock. Lookups
/// are linear, which is fine for the handful of records this service keeps.
/// The lock is held only while the vector itself is read or modified.
#[derive(Clone)]
pub struct MemoryCoffeeStore {
    coffees: Arc<RwLock<Vec<Coffee>>>,
    ids: Arc<dyn IdGenerator>,
}

impl MemoryCoffeeStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            coffees: Arc::new(RwLock::new(Vec::new())),
            ids,
        }
    }
}

/// Replace the record with the same id in place, or append it.
fn upsert(coffees: &mut Vec<Coffee>, coffee: Coffee) {
    match coffees.iter_mut().find(|c| c.id == coffee.id) {
        Some(existing) => existing.name = coffee.name,
        None => coffees.push(coffee),
    }
}

#[async_trait]
impl CoffeeStore for MemoryCoffeeStore {
    async fn insert_all(&self, records: Vec<CoffeeRequest>) -> AppResult<Vec<Coffee>> {
        let prepared: Vec<Coffee> = records
            .into_iter()
            .map(|r| r.into_coffee_or_else(|| self.ids.generate()))
            .collect();

        let mut coffees = self.coffees.write().await;
        for coffee in &prepared {
            upsert(&mut coffees, coffee.clone());
        }

        Ok(prepared)
    }

    async fn find_all(&self) -> AppResult<Vec<Coffee>> {
        Ok(self.coffees.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Coffee>> {
        Ok(self.coffees.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> AppResult<bool> {
        Ok(self.coffees.read().await.iter().any(|c| c.id == id))
    }

    async fn save(&self, coffee: Coffee) -> AppResult<Coffee> {
        upsert(&mut *self.coffees.write().await, coffee.clone());
        Ok(coffee)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.coffees.write().await.retain(|c| c.id != id);
        Ok(())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.coffees.read().await.len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::SequentialIdGenerator;

    fn store() -> MemoryCoffeeStore {
        MemoryCoffeeStore::new(Arc::new(SequentialIdGenerator::new("c")))
    }

    #[tokio::test]
    async fn test_insert_all_assigns_missing_ids() {
        let store = store();
        let stored = store
            .insert_all(vec![
                CoffeeRequest::named("Cafe Cereza"),
                CoffeeRequest::with_id("fixed", "Cafe Ganador"),
                CoffeeRequest::named("Cafe Lareno"),
            ])
            .await
            .unwrap();

        let ids: Vec<&str> = stored.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "fixed", "c-2"]);
        assert_eq!(store.find_all().await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_find_by_id_round_trip() {
        let store = store();
        let coffee = Coffee::new("abc", "Cafe Tres Pontas");
        store.save(coffee.clone()).await.unwrap();

        assert_eq!(store.find_by_id("abc").await.unwrap(), Some(coffee));
        assert_eq!(store.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_in_place() {
        let store = store();
        store.save(Coffee::new("a", "First")).await.unwrap();
        store.save(Coffee::new("b", "Second")).await.unwrap();
        store.save(Coffee::new("a", "Renamed")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(
            all,
            vec![Coffee::new("a", "Renamed"), Coffee::new("b", "Second")]
        );
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = store();
        store.save(Coffee::new("a", "First")).await.unwrap();

        store.delete_by_id("a").await.unwrap();
        assert!(!store.exists_by_id("a").await.unwrap());

        // Absent id is a no-op
        store.delete_by_id("a").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_all_overwrites_duplicates() {
        let store = store();
        store
            .insert_all(vec![
                CoffeeRequest::with_id("dup", "One"),
                CoffeeRequest::with_id("dup", "Two"),
            ])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(
            store.find_by_id("dup").await.unwrap(),
            Some(Coffee::new("dup", "Two"))
        );
    }

    #[tokio::test]
    async fn test_concurrent_saves_keep_keys_unique() {
        let store = store();
        let mut handles = Vec::new();

        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .save(Coffee::new(format!("k{}", i % 10), format!("v{i}")))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.count().await.unwrap(), 10);
    }
}
