//! Fuzz target for coffee request bodies.
//!
//! Feeds arbitrary bytes through the same deserialization the `POST` and
//! `PUT` handlers use and checks the identifier rules hold for every body
//! that parses.
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_coffee_request -- -max_total_time=60
//! ```

#![no_main]

use coffee_service::models::CoffeeRequest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(request) = serde_json::from_slice::<CoffeeRequest>(data) else {
        return;
    };

    let supplied = request.supplied_id().map(str::to_owned);
    assert!(supplied.as_deref().is_none_or(|id| !id.is_empty()));

    let name = request.name.clone();
    let coffee = request.clone().into_coffee_or_else(|| "generated".to_string());
    assert!(!coffee.id.is_empty());
    assert_eq!(coffee.name, name);
    match supplied {
        Some(id) => assert_eq!(coffee.id, id),
        None => assert_eq!(coffee.id, "generated"),
    }

    let keyed = request.into_coffee_with_id("path-id");
    assert_eq!(keyed.id, "path-id");
});
