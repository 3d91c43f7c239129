pub mod coffees;
mod extract;
mod greeting;
mod health;

pub use coffees::{create_coffee, delete_coffee, get_coffee, list_coffees, upsert_coffee};
pub use extract::AppJson;
pub use greeting::{get_droid, get_greeting, get_greeting_coffee};
pub use health::health_check;
