//! CoinGecko market data source.
//!
//! Fetches quotes for the supported coins from the public CoinGecko
//! API. Any transport, status, or decode failure is absorbed here and
//! replaced with a built-in quote set, so callers always receive data.

use crate::domain::coin::Coin;
use crate::domain::market::Quote;
use crate::domain::ports::MarketDataSource;
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Static quote set served when the API is unreachable.
const FALLBACK_QUOTES: [(&str, &str, f64, f64); 3] = [
    ("BTC", "Bitcoin", 45250.32, 2.45),
    ("ETH", "Ethereum", 2850.67, -1.23),
    ("DOGE", "Dogecoin", 0.08, 5.67),
];

#[derive(Debug, Deserialize)]
struct MarketsEntry {
    symbol: String,
    name: String,
    current_price: f64,
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinEntry {
    symbol: String,
    name: String,
    market_data: CoinMarketData,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    current_price: CurrencyMap,
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrencyMap {
    usd: f64,
}

pub struct CoinGeckoMarketDataSource {
    client: ClientWithMiddleware,
    base_url: String,
}

impl CoinGeckoMarketDataSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// No-retry variant so fallback tests fail fast.
    pub fn without_retries(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client_with_retries(timeout, 0),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn fallback_quotes() -> Vec<Quote> {
        FALLBACK_QUOTES
            .iter()
            .map(|(symbol, name, price, change)| Quote {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price: *price,
                change_24h: *change,
            })
            .collect()
    }

    async fn fetch_markets(&self) -> Result<Vec<Quote>> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&ids=bitcoin,ethereum,dogecoin\
             &order=market_cap_desc&per_page=3&page=1&sparkline=false\
             &price_change_percentage=24h",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach CoinGecko markets endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko markets returned status: {}", response.status());
        }

        let entries: Vec<MarketsEntry> = response
            .json()
            .await
            .context("Failed to decode CoinGecko markets response")?;

        Ok(entries
            .into_iter()
            .map(|entry| Quote {
                symbol: entry.symbol.to_uppercase(),
                name: entry.name,
                price: entry.current_price,
                change_24h: entry.price_change_percentage_24h.unwrap_or(0.0),
            })
            .collect())
    }

    async fn fetch_coin(&self, coin: Coin) -> Result<Quote> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true\
             &community_data=false&developer_data=false&sparkline=false",
            self.base_url,
            coin.gecko_id()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach CoinGecko for {}", coin))?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko coin endpoint returned status: {}", response.status());
        }

        let entry: CoinEntry = response
            .json()
            .await
            .with_context(|| format!("Failed to decode CoinGecko response for {}", coin))?;

        Ok(Quote {
            symbol: entry.symbol.to_uppercase(),
            name: entry.name,
            price: entry.market_data.current_price.usd,
            change_24h: entry.market_data.price_change_percentage_24h.unwrap_or(0.0),
        })
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoMarketDataSource {
    async fn latest_quotes(&self) -> Vec<Quote> {
        match self.fetch_markets().await {
            Ok(quotes) if !quotes.is_empty() => {
                debug!("Fetched {} quotes from CoinGecko", quotes.len());
                quotes
            }
            Ok(_) => {
                warn!("CoinGecko returned no quotes; serving fallback set");
                Self::fallback_quotes()
            }
            Err(err) => {
                warn!("CoinGecko fetch failed: {:#}; serving fallback set", err);
                Self::fallback_quotes()
            }
        }
    }

    async fn latest_quote(&self, coin: Coin) -> Option<Quote> {
        match self.fetch_coin(coin).await {
            Ok(quote) => Some(quote),
            Err(err) => {
                warn!("CoinGecko fetch failed for {}: {:#}", coin, err);
                None
            }
        }
    }
}
