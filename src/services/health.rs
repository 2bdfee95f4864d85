use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::error::AppError;

const SERVICE_NAME: &str = "apt-insight";

/// Liveness payload polled by the load balancer. The hosting layer serves
/// the JSON; this module owns its shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub api_url: String,
}

pub fn health_status(config: &AppConfig, now: DateTime<Utc>) -> HealthStatus {
    HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
        version: config.app_version().to_string(),
        timestamp: now,
        environment: config.environment().to_string(),
        api_url: config.base_url().to_string(),
    }
}

pub fn health_json(config: &AppConfig, now: DateTime<Utc>) -> Result<String, AppError> {
    serde_json::to_string(&health_status(config, now))
        .map_err(|e| AppError::DataError(format!("Failed to serialize health status: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_payload_shape() {
        let config = AppConfig::builder()
            .base_url("https://api.example.com")
            .app_version("1.4.0")
            .environment("production")
            .build();
        let now = Utc::now();

        let json = health_json(&config, now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "healthy");
        assert_eq!(value["service"], "apt-insight");
        assert_eq!(value["version"], "1.4.0");
        assert_eq!(value["environment"], "production");
        assert_eq!(value["api_url"], "https://api.example.com");
        assert!(value["timestamp"].is_string());
    }
}
