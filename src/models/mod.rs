mod api;
mod coffee;

pub use api::{Droid, HealthResponse};
pub use coffee::{Coffee, CoffeeRequest};
