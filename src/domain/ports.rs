use crate::domain::coin::Coin;
use crate::domain::errors::PredictionError;
use crate::domain::forecast::BaseForecast;
use crate::domain::market::Quote;
use crate::domain::sentiment::SentimentReading;
use async_trait::async_trait;

/// Supplies current quotes. Implementations absorb transport failures
/// internally and substitute fallback data, so these calls never
/// surface a raw network error.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Quotes for every supported coin. Infallible by contract.
    async fn latest_quotes(&self) -> Vec<Quote>;

    /// Quote for a single coin. `None` on failure; the caller decides
    /// whether to fall back to a cached value.
    async fn latest_quote(&self, coin: Coin) -> Option<Quote>;
}

/// Supplies raw multi-horizon forecasts. Unknown symbols are an error,
/// never silently substituted.
#[async_trait]
pub trait BasePredictionSource: Send + Sync {
    async fn predict(&self, symbol: &str) -> Result<BaseForecast, PredictionError>;
}

/// Supplies aggregated social sentiment. Classifier failures fall back
/// to static data and unknown symbols get a neutral reading, so this
/// call is infallible by contract.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn classify(&self, symbol: &str) -> SentimentReading;
}
