use std::any::Any;
use std::rc::Rc;

use futures::FutureExt;
use serde::de::DeserializeOwned;

use crate::config::{AppConfig, Config, DataSource};
use crate::models::error::AppError;
use crate::models::filters::AnalysisFilters;
use crate::services::api::{ApiClient, TokenStore};
use crate::services::cache::{QueryCache, QueryKey};
use crate::services::{fixtures, retry::retry_with_backoff};

/// The analysis views served by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisKind {
    RegionalStats,
    AreaDistribution,
    ByApartment,
    ByArea,
    PriceTrend,
    MarketSummary,
    RentRatio,
    RentalYield,
    GapInvestment,
}

impl AnalysisKind {
    pub const fn endpoint(self) -> &'static str {
        match self {
            AnalysisKind::RegionalStats => "/api/v1/analysis/regional",
            AnalysisKind::AreaDistribution => "/api/v1/analysis/area-distribution",
            AnalysisKind::ByApartment => "/api/v1/analysis/by-apartment",
            AnalysisKind::ByArea => "/api/v1/analysis/by-area",
            AnalysisKind::PriceTrend => "/api/v1/market/price-trend",
            AnalysisKind::MarketSummary => "/api/v1/market/summary",
            AnalysisKind::RentRatio => "/api/v1/market/rent-ratio",
            AnalysisKind::RentalYield => "/api/v1/investment/rental-yield",
            AnalysisKind::GapInvestment => "/api/v1/premium/gap-investment",
        }
    }

    /// Logical query name used in cache keys and invalidation.
    pub const fn query_name(self) -> &'static str {
        match self {
            AnalysisKind::RegionalStats => "regional-stats",
            AnalysisKind::AreaDistribution => "area-distribution",
            AnalysisKind::ByApartment => "by-apartment",
            AnalysisKind::ByArea => "by-area",
            AnalysisKind::PriceTrend => "price-trend",
            AnalysisKind::MarketSummary => "market-summary",
            AnalysisKind::RentRatio => "rent-ratio",
            AnalysisKind::RentalYield => "rental-yield",
            AnalysisKind::GapInvestment => "gap-investment",
        }
    }
}

/// One query engine serves the whole app: the shared request cache, the
/// HTTP client and the configured data source. Provided to the component
/// tree through a context, never reached for as a global.
pub struct QueryEngine {
    client: ApiClient,
    cache: QueryCache,
    data_source: DataSource,
}

impl QueryEngine {
    pub fn new(config: AppConfig, tokens: TokenStore) -> Result<Self, AppError> {
        let data_source = config.data_source();
        Ok(Self {
            client: ApiClient::new(config, tokens)?,
            cache: QueryCache::new(),
            data_source,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    /// Cache-aware fetch of one analysis view. Concurrent callers with the
    /// same kind and filters share a single request; live fetches get one
    /// retry with backoff before the error surfaces to the hook.
    pub async fn analysis<T>(
        &self,
        kind: AnalysisKind,
        filters: &AnalysisFilters,
    ) -> Result<Rc<T>, AppError>
    where
        T: DeserializeOwned + 'static,
    {
        let normalized = filters.normalized();
        let key = QueryKey::new(kind.query_name(), normalized.cache_key());

        let data_source = self.data_source;
        let client = self.client.clone();
        let body = normalized.to_request_body();

        self.cache
            .fetch(key, move || {
                async move {
                    let value: serde_json::Value = match data_source {
                        DataSource::Fixture => fixtures::response_for(kind, &normalized)?,
                        DataSource::Live => {
                            retry_with_backoff(
                                || async { client.post(kind.endpoint(), &body).await },
                                Config::MAX_FETCH_ATTEMPTS,
                            )
                            .await?
                        }
                    };

                    let parsed: T = serde_json::from_value(value).map_err(|e| {
                        AppError::DataError(format!("Unexpected response shape: {e}"))
                    })?;
                    Ok(Rc::new(parsed) as Rc<dyn Any>)
                }
                .boxed_local()
            })
            .await
    }

    /// Forces the next read of a logical query to hit the backend again.
    pub fn invalidate(&self, kind: AnalysisKind) {
        self.cache.invalidate(kind.query_name());
    }
}
