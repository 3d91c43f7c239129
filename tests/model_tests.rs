//! Wire-format tests for the public models.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

mod coffee_tests {
    use super::*;
    use coffee_service::models::{Coffee, CoffeeRequest};

    #[test]
    fn test_coffee_json_shape() {
        let coffee = Coffee::new("550e8400-e29b-41d4-a716-446655440000", "Cafe Cereza");

        let value = serde_json::to_value(&coffee).expect("Serialization failed");
        assert_eq!(
            value,
            json!({"id": "550e8400-e29b-41d4-a716-446655440000", "name": "Cafe Cereza"})
        );
    }

    #[test]
    fn test_coffee_deserialization() {
        let coffee: Coffee = serde_json::from_value(json!({"id": "a", "name": "Cafe Lareno"}))
            .expect("Deserialization failed");

        assert_eq!(coffee, Coffee::new("a", "Cafe Lareno"));
    }

    #[test]
    fn test_request_id_is_optional() {
        let request: CoffeeRequest =
            serde_json::from_value(json!({"name": "Cafe Test"})).expect("Deserialization failed");

        assert_eq!(request, CoffeeRequest::named("Cafe Test"));
        assert!(request.supplied_id().is_none());
    }

    #[test]
    fn test_request_with_id() {
        let request: CoffeeRequest = serde_json::from_value(json!({"id": "new-id", "name": "X"}))
            .expect("Deserialization failed");

        assert_eq!(request.supplied_id(), Some("new-id"));
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let request: CoffeeRequest =
            serde_json::from_value(json!({"name": "X", "roast": "dark"})).expect("Deserialization failed");

        assert_eq!(request.name, "X");
    }

    #[test]
    fn test_request_rejects_wrong_types() {
        assert!(serde_json::from_value::<CoffeeRequest>(json!({"name": 42})).is_err());
        assert!(serde_json::from_value::<CoffeeRequest>(json!({"id": 7, "name": "X"})).is_err());
    }

    #[test]
    fn test_request_without_id_serializes_without_id() {
        let json = serde_json::to_string(&CoffeeRequest::named("X")).expect("Serialization failed");
        assert_eq!(json, r#"{"name":"X"}"#);
    }
}

mod droid_tests {
    use coffee_service::models::Droid;

    #[test]
    fn test_droid_round_trip() {
        let droid = Droid {
            id: "BB-8".to_string(),
            description: "Small, rolling android. Probably doesn't drink coffee.".to_string(),
        };

        let value = serde_json::to_value(&droid).expect("Serialization failed");
        assert_eq!(value["id"], "BB-8");

        let parsed: Droid = serde_json::from_value(value).expect("Deserialization failed");
        assert_eq!(parsed, droid);
    }
}
