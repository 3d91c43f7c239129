//! Store double whose every call fails, for exercising error paths.

use async_trait::async_trait;

use super::CoffeeStore;
use crate::error::{AppError, AppResult};
use crate::models::{Coffee, CoffeeRequest};

/// Every operation returns `AppError::StorageUnavailable`.
pub struct UnavailableStore;

fn unavailable<T>() -> AppResult<T> {
    Err(AppError::StorageUnavailable("store is down".to_string()))
}

#[async_trait]
impl CoffeeStore for UnavailableStore {
    async fn insert_all(&self, _records: Vec<CoffeeRequest>) -> AppResult<Vec<Coffee>> {
        unavailable()
    }

    async fn find_all(&self) -> AppResult<Vec<Coffee>> {
        unavailable()
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<Coffee>> {
        unavailable()
    }

    async fn exists_by_id(&self, _id: &str) -> AppResult<bool> {
        unavailable()
    }

    async fn save(&self, _coffee: Coffee) -> AppResult<Coffee> {
        unavailable()
    }

    async fn delete_by_id(&self, _id: &str) -> AppResult<()> {
        unavailable()
    }

    async fn count(&self) -> AppResult<usize> {
        unavailable()
    }

    fn backend(&self) -> &'static str {
        "unavailable"
    }
}
