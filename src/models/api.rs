use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DroidConfig;

/// The configuration-bound droid served by `GET /droid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droid {
    pub id: String,
    pub description: String,
}

impl From<DroidConfig> for Droid {
    fn from(config: DroidConfig) -> Self {
        Self {
            id: config.id,
            description: config.description,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Active store backend ("memory" or "sqlite")
    pub store_backend: String,
    /// Number of stored coffees, absent if the store could not be queried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coffees_count: Option<usize>,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_droid_from_config() {
        let droid = Droid::from(DroidConfig {
            id: "R2-D2".to_string(),
            description: "Astromech".to_string(),
        });

        let json = serde_json::to_string(&droid).expect("Serialization should succeed");
        assert_eq!(json, r#"{"id":"R2-D2","description":"Astromech"}"#);
    }

    #[test]
    fn test_health_response_skips_missing_count() {
        let response = HealthResponse {
            status: "degraded".to_string(),
            store_backend: "sqlite".to_string(),
            coffees_count: None,
            version: "0.1.0".to_string(),
            uptime_seconds: 3,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&response).expect("Serialization should succeed");
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(!json.contains("coffees_count"));
    }
}
