use crate::models::error::AppError;

/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Cache entries older than this are refetched
    pub const STALE_AFTER_SECS: i64 = 300;

    /// Cache entries untouched for this long are evicted
    pub const EVICT_AFTER_IDLE_SECS: i64 = 600;

    /// Total fetch attempts per request (1 initial + 1 retry)
    pub const MAX_FETCH_ATTEMPTS: u32 = 2;

    /// First retry delay in milliseconds
    pub const INITIAL_BACKOFF_MS: u32 = 1_000;

    /// Backoff growth factor between retries
    pub const BACKOFF_GROWTH_FACTOR: u32 = 2;

    /// Backoff ceiling in milliseconds
    pub const MAX_BACKOFF_MS: u32 = 30_000;
}

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_ENVIRONMENT: &str = "development";

/// Where analysis data comes from. `Fixture` is the explicit development
/// escape hatch: every hook serves hand-authored fixtures and the network is
/// never touched. There is no per-hook fallback in `Live` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Live,
    Fixture,
}

impl std::str::FromStr for DataSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(DataSource::Live),
            "fixture" => Ok(DataSource::Fixture),
            _ => Err(AppError::ConfigError(format!(
                "Invalid data source: {s} (expected \"live\" or \"fixture\")"
            ))),
        }
    }
}

/// Values injected at build time. WASM has no runtime environment, so this
/// is read from `option_env!` the way the original deployment read its
/// NEXT_PUBLIC_* variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    base_url: String,
    app_version: String,
    environment: String,
    data_source: DataSource,
}

impl AppConfig {
    /// Creates a builder for constructing an `AppConfig`.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Reads the build-time environment. An unrecognized DATA_SOURCE is a
    /// configuration error rather than a silent default.
    pub fn from_env() -> Result<Self, AppError> {
        let mut builder = Self::builder();
        if let Some(url) = option_env!("API_URL") {
            builder = builder.base_url(url);
        }
        if let Some(version) = option_env!("APP_VERSION") {
            builder = builder.app_version(version);
        }
        if let Some(environment) = option_env!("APP_ENV") {
            builder = builder.environment(environment);
        }
        if let Some(source) = option_env!("DATA_SOURCE") {
            builder = builder.data_source(source.parse()?);
        }
        Ok(builder.build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    /// Joins an endpoint path onto the configured base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfigBuilder::default().build()
    }
}

/// Builder for constructing an `AppConfig` with custom settings.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    base_url: Option<String>,
    app_version: Option<String>,
    environment: Option<String>,
    data_source: Option<DataSource>,
}

impl AppConfigBuilder {
    /// Sets a custom backend base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn data_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }

    /// Builds the `AppConfig`.
    pub fn build(self) -> AppConfig {
        AppConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            app_version: self
                .app_version
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            environment: self
                .environment
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            data_source: self.data_source.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = AppConfig::builder().build();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.environment(), "development");
        assert_eq!(config.data_source(), DataSource::Live);
    }

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        let config = AppConfig::builder()
            .base_url("https://api.example.com/")
            .build();
        assert_eq!(
            config.endpoint_url("/api/v1/market/summary"),
            "https://api.example.com/api/v1/market/summary"
        );
    }

    #[test]
    fn test_data_source_parsing() {
        assert_eq!("live".parse::<DataSource>().unwrap(), DataSource::Live);
        assert_eq!(
            "Fixture".parse::<DataSource>().unwrap(),
            DataSource::Fixture
        );
        assert!("mock".parse::<DataSource>().is_err());
    }
}
