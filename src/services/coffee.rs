use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::error::AppResult;
use crate::metrics;
use crate::models::{Coffee, CoffeeRequest};
use crate::store::{CoffeeStore, IdGenerator};

/// Result of [`CoffeeService::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    /// The record as stored
    pub coffee: Coffee,
    /// Whether the identifier was absent before the save
    pub created: bool,
}

/// Coffee CRUD operations on top of a [`CoffeeStore`].
///
/// Cloning is cheap; clones share the same store and id generator.
#[derive(Clone)]
pub struct CoffeeService {
    store: Arc<dyn CoffeeStore>,
    ids: Arc<dyn IdGenerator>,
}

impl CoffeeService {
    /// Create a new coffee service.
    pub fn new(store: Arc<dyn CoffeeStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// The underlying store, for health checks.
    pub fn store(&self) -> &dyn CoffeeStore {
        self.store.as_ref()
    }

    /// All coffees.
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Coffee>> {
        let started = Instant::now();
        let result = self.store.find_all().await;
        record("list", &result, "ok", started);
        result
    }

    /// The coffee with `id`, if any.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<Option<Coffee>> {
        let started = Instant::now();
        let result = self.store.find_by_id(id).await;
        let found = matches!(result, Ok(Some(_)));
        record("get", &result, if found { "ok" } else { "not_found" }, started);
        result
    }

    /// Store a new coffee, generating an identifier if none was supplied.
    ///
    /// A supplied identifier that already exists is overwritten; creation
    /// never reports a conflict.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CoffeeRequest) -> AppResult<Coffee> {
        let coffee = request.into_coffee_or_else(|| self.ids.generate());

        let started = Instant::now();
        let result = self.store.save(coffee).await;
        record("create", &result, "created", started);

        let coffee = result?;
        info!(id = %coffee.id, "Coffee created");
        Ok(coffee)
    }

    /// Insert or replace the coffee stored under `id`.
    ///
    /// The path identifier is authoritative: the record is stored under
    /// `id` whatever the body carries. `created` reflects whether `id` was
    /// present *before* the save.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn upsert(&self, id: &str, request: CoffeeRequest) -> AppResult<Upserted> {
        if let Some(body_id) = request.supplied_id()
            && body_id != id
        {
            debug!(path_id = id, body_id, "Body id differs from path id, using path id");
        }

        let started = Instant::now();
        let result = match self.store.exists_by_id(id).await {
            Ok(existed) => self
                .store
                .save(request.into_coffee_with_id(id))
                .await
                .map(|coffee| Upserted {
                    coffee,
                    created: !existed,
                }),
            Err(e) => Err(e),
        };
        let outcome = match &result {
            Ok(upserted) if upserted.created => "created",
            _ => "updated",
        };
        record("upsert", &result, outcome, started);
        result
    }

    /// Remove the coffee with `id`. Unknown identifiers are ignored.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let started = Instant::now();
        let result = self.store.delete_by_id(id).await;
        record("delete", &result, "ok", started);
        result
    }
}

fn record<T>(
    operation: &'static str,
    result: &AppResult<T>,
    success: &'static str,
    started: Instant,
) {
    let outcome = if result.is_ok() { success } else { "error" };
    metrics::record_operation(operation, outcome, started.elapsed().as_secs_f64());
}
