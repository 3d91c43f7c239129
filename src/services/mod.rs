mod coffee;

pub use coffee::{CoffeeService, Upserted};
