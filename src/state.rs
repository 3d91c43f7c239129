//! Shared application state for Axum handlers.
//!
//! Everything here is built once in `main` and cloned into each handler.
//! The coffee collection itself lives in the store behind
//! [`CoffeeService`]; the greeting and droid are read-only after startup.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, GreetingConfig};
use crate::models::Droid;
use crate::services::CoffeeService;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Coffee CRUD operations
    pub coffees: CoffeeService,
    /// Values served by `/greeting` and `/greeting/coffee`
    pub greeting: Arc<GreetingConfig>,
    /// Value served by `/droid`
    pub droid: Arc<Droid>,
    /// Timestamp when the application started
    pub started_at: Instant,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state around an already seeded coffee service.
    pub fn new(coffees: CoffeeService, config: Config) -> Self {
        Self {
            coffees,
            greeting: Arc::new(config.greeting.clone()),
            droid: Arc::new(Droid::from(config.droid.clone())),
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
