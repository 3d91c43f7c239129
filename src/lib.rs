//! # Coffee Service
//!
//! A small CRUD service for named coffee records, built on Axum:
//!
//! - **Coffees**: list, get, create, upsert and delete under `/coffees`
//! - **Storage**: in-memory list or durable SQLite table, chosen at startup
//! - **Seed data**: four starter coffees loaded before the server listens
//! - **Configuration-bound values**: `/greeting`, `/greeting/coffee`, `/droid`
//! - **Observability**: request IDs, structured logging, health endpoint, Prometheus metrics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Request ID → Trace → CORS → Body Limit)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (coffees, greeting, droid, health)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CoffeeService (id assignment, upsert decision)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CoffeeStore (MemoryCoffeeStore | SqliteCoffeeStore)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use coffee_service::store::{IdGenerator, UuidIdGenerator, build_store};
//! use coffee_service::{AppState, CoffeeService, Config, build_router, seed};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
//!     let store = build_store(&config, Arc::clone(&ids)).await?;
//!     seed::load_seed_data(store.as_ref()).await?;
//!
//!     let state = AppState::new(CoffeeService::new(store, ids), config);
//!     let app = build_router(state);
//!
//!     // Start the server...
//!     Ok(())
//! }
//! ```
//!
//! ## Storage Configuration
//!
//! ```bash
//! STORE_BACKEND=sqlite DATABASE_PATH=data/coffee.db cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

// Re-exports for convenience
pub use config::{Config, StoreBackend};
pub use error::{AppError, AppResult};
pub use models::{Coffee, CoffeeRequest};
pub use routes::build_router;
pub use services::{CoffeeService, Upserted};
pub use state::AppState;
pub use store::CoffeeStore;
