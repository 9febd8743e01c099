//! Mock market data source for offline runs and tests.

use crate::domain::coin::Coin;
use crate::domain::market::Quote;
use crate::domain::ports::MarketDataSource;
use crate::infrastructure::coingecko::CoinGeckoMarketDataSource;
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves the built-in quote set with a small random walk applied per
/// call, so mock-mode output changes between polls the way a live feed
/// would. Walk step: ±1% on price, ±0.25 pts on 24h change.
pub struct MockMarketDataSource {
    quotes: Mutex<HashMap<String, Quote>>,
    walk_enabled: bool,
}

impl MockMarketDataSource {
    pub fn new() -> Self {
        Self::with_walk(true)
    }

    /// Deterministic variant: every call returns the seed set untouched.
    pub fn frozen() -> Self {
        Self::with_walk(false)
    }

    fn with_walk(walk_enabled: bool) -> Self {
        let quotes = CoinGeckoMarketDataSource::fallback_quotes()
            .into_iter()
            .map(|quote| (quote.symbol.clone(), quote))
            .collect();
        Self {
            quotes: Mutex::new(quotes),
            walk_enabled,
        }
    }

    fn step(&self) -> Vec<Quote> {
        let mut quotes = self.quotes.lock().expect("mock quote store poisoned");
        if self.walk_enabled {
            let mut rng = rand::rng();
            for quote in quotes.values_mut() {
                quote.price *= 1.0 + rng.random_range(-0.01..=0.01);
                quote.change_24h += rng.random_range(-0.25..=0.25);
            }
        }
        let mut all: Vec<_> = quotes.values().cloned().collect();
        all.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        all
    }
}

impl Default for MockMarketDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for MockMarketDataSource {
    async fn latest_quotes(&self) -> Vec<Quote> {
        self.step()
    }

    async fn latest_quote(&self, coin: Coin) -> Option<Quote> {
        self.step().into_iter().find(|q| q.symbol == coin.symbol())
    }
}
