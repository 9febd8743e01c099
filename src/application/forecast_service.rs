//! Forecast orchestration.
//!
//! Owns the three leaf sources, the per-cadence pollers, and the
//! snapshot store. Each fusion cycle joins its fetches, runs the pure
//! fusion engine, and atomically replaces the coin's snapshot; a failed
//! cycle leaves the previous snapshot in place so readers keep seeing
//! stale-but-present data instead of a gap.

use crate::application::fusion;
use crate::application::poller::Poller;
use crate::domain::coin::Coin;
use crate::domain::forecast::ForecastSnapshot;
use crate::domain::market::Quote;
use crate::domain::ports::{BasePredictionSource, MarketDataSource, SentimentSource};
use crate::domain::sentiment::SentimentReading;
use chrono::Utc;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Polling cadences. Quotes, fusion recompute, and sentiment refresh
/// run independently.
#[derive(Debug, Clone, Copy)]
pub struct Cadences {
    pub quotes: Duration,
    pub fusion: Duration,
    pub sentiment: Duration,
}

impl Default for Cadences {
    fn default() -> Self {
        Self {
            quotes: Duration::from_secs(60),
            fusion: Duration::from_secs(30),
            sentiment: Duration::from_secs(180),
        }
    }
}

/// Handle over the running pollers. Stopping (or dropping) it cancels
/// all cycles; nothing is applied afterwards.
pub struct ServiceHandle {
    pollers: Vec<Poller>,
}

impl ServiceHandle {
    pub fn stop(self) {
        for poller in &self.pollers {
            info!("Stopping poller '{}'", poller.name());
            poller.stop();
        }
    }
}

pub struct ForecastService {
    market: Arc<dyn MarketDataSource>,
    predictions: Arc<dyn BasePredictionSource>,
    sentiment: Arc<dyn SentimentSource>,
    quotes: RwLock<HashMap<String, Quote>>,
    readings: RwLock<HashMap<String, SentimentReading>>,
    snapshots: RwLock<HashMap<String, ForecastSnapshot>>,
}

impl ForecastService {
    pub fn new(
        market: Arc<dyn MarketDataSource>,
        predictions: Arc<dyn BasePredictionSource>,
        sentiment: Arc<dyn SentimentSource>,
    ) -> Self {
        Self {
            market,
            predictions,
            sentiment,
            quotes: RwLock::new(HashMap::new()),
            readings: RwLock::new(HashMap::new()),
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Warm up the caches, then spawn the pollers.
    pub async fn start(self: &Arc<Self>, cadences: Cadences) -> ServiceHandle {
        self.refresh_quotes().await;
        self.refresh_sentiment().await;

        let quotes_service = self.clone();
        let sentiment_service = self.clone();
        let fusion_service = self.clone();

        let pollers = vec![
            Poller::spawn("quotes", cadences.quotes, move || {
                let service = quotes_service.clone();
                async move { service.refresh_quotes().await }
            }),
            Poller::spawn("sentiment", cadences.sentiment, move || {
                let service = sentiment_service.clone();
                async move { service.refresh_sentiment().await }
            }),
            Poller::spawn("fusion", cadences.fusion, move || {
                let service = fusion_service.clone();
                async move { service.refresh_forecasts().await }
            }),
        ];

        info!(
            "ForecastService started (quotes {:?}, fusion {:?}, sentiment {:?})",
            cadences.quotes, cadences.fusion, cadences.sentiment
        );

        ServiceHandle { pollers }
    }

    /// Refresh the quote cache for all supported coins in one call.
    pub async fn refresh_quotes(&self) {
        let quotes = self.market.latest_quotes().await;
        debug!("Refreshed {} quotes", quotes.len());
        let mut cache = self.quotes.write().await;
        for quote in quotes {
            cache.insert(quote.symbol.clone(), quote);
        }
    }

    /// Refresh sentiment readings for all supported coins in parallel.
    pub async fn refresh_sentiment(&self) {
        let readings = join_all(
            Coin::ALL
                .iter()
                .map(|coin| self.sentiment.classify(coin.symbol())),
        )
        .await;

        let mut cache = self.readings.write().await;
        for reading in readings {
            debug!(
                "Sentiment for {}: {} ({}%, {} samples)",
                reading.symbol, reading.trend, reading.confidence_pct, reading.sample_count
            );
            cache.insert(reading.symbol.clone(), reading);
        }
    }

    /// Run one fusion cycle over every supported coin.
    pub async fn refresh_forecasts(&self) {
        for coin in Coin::ALL {
            self.refresh_coin(coin).await;
        }
    }

    async fn refresh_coin(&self, coin: Coin) {
        let (base, quote) = tokio::join!(
            self.predictions.predict(coin.key()),
            self.resolve_quote(coin)
        );

        let Some(quote) = quote else {
            warn!("No quote available for {}; skipping fusion cycle", coin);
            return;
        };

        let base = match base {
            Ok(base) => base,
            Err(err) => {
                // Not absorbed, but not fatal either: the previous
                // snapshot stays visible.
                warn!("{}; retaining previous snapshot for {}", err, coin);
                return;
            }
        };

        let reading = self.readings.read().await.get(coin.symbol()).cloned();

        match fusion::fuse(&quote, &base, reading.as_ref()) {
            Ok(forecasts) => {
                let snapshot = ForecastSnapshot {
                    symbol: coin.symbol().to_string(),
                    quote,
                    forecasts,
                    generated_at: Utc::now(),
                };
                info!(
                    "Fused forecast for {}: 1d ${:.4} ({}%, {})",
                    coin,
                    snapshot.forecasts[0].predicted_price,
                    snapshot.forecasts[0].confidence_pct,
                    snapshot.forecasts[0].direction
                );
                self.snapshots
                    .write()
                    .await
                    .insert(coin.symbol().to_string(), snapshot);
            }
            Err(err) => {
                // Contract violation from a leaf source. Loud, but only
                // this cycle is lost.
                error!("Fusion failed for {}: {}", coin, err);
            }
        }
    }

    /// Cached quote for the coin, with a direct single-coin fetch when
    /// the cache has not been primed yet.
    async fn resolve_quote(&self, coin: Coin) -> Option<Quote> {
        if let Some(quote) = self.quotes.read().await.get(coin.symbol()).cloned() {
            return Some(quote);
        }
        let quote = self.market.latest_quote(coin).await?;
        self.quotes
            .write()
            .await
            .insert(quote.symbol.clone(), quote.clone());
        Some(quote)
    }

    pub async fn snapshot(&self, coin: Coin) -> Option<ForecastSnapshot> {
        self.snapshots.read().await.get(coin.symbol()).cloned()
    }

    pub async fn snapshots(&self) -> Vec<ForecastSnapshot> {
        let store = self.snapshots.read().await;
        let mut all: Vec<_> = store.values().cloned().collect();
        all.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        all
    }

    pub async fn sentiment_reading(&self, coin: Coin) -> Option<SentimentReading> {
        self.readings.read().await.get(coin.symbol()).cloned()
    }
}
