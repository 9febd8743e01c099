//! Coincast - headless crypto forecast service
//!
//! Polls market quotes, mock base predictions, and corpus sentiment on
//! independent cadences, fuses them into per-horizon forecasts, and
//! logs each snapshot refresh to stdout.
//!
//! # Usage
//! ```sh
//! MODE=mock cargo run -- --once
//! ```
//!
//! # Environment Variables
//! - `MODE` - 'live' (CoinGecko) or 'mock' (default: live)
//! - `QUOTE_POLL_SECS` / `FORECAST_POLL_SECS` / `SENTIMENT_POLL_SECS`

use anyhow::Result;
use clap::Parser;
use coincast::application::forecast_service::ForecastService;
use coincast::config::{Config, Mode};
use coincast::domain::coin::Coin;
use coincast::domain::ports::MarketDataSource;
use coincast::infrastructure::coingecko::CoinGeckoMarketDataSource;
use coincast::infrastructure::mock::MockMarketDataSource;
use coincast::infrastructure::prediction::MockPredictionSource;
use coincast::infrastructure::sentiment::classifier::VaderClassifier;
use coincast::infrastructure::sentiment::corpus::CorpusSentimentSource;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "coincast", version, about = "Crypto forecast fusion service")]
struct Cli {
    /// Market data mode: 'live' or 'mock'. Overrides MODE.
    #[arg(long)]
    mode: Option<String>,

    /// Run a single fusion cycle, print the snapshots, and exit.
    #[arg(long)]
    once: bool,

    /// With --once, print the snapshots as JSON instead of log lines.
    #[arg(long, requires = "once")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(mode) = &cli.mode {
        config.mode = mode.parse()?;
    }

    info!(
        "Coincast {} starting (mode: {:?})...",
        env!("CARGO_PKG_VERSION"),
        config.mode
    );

    let market: Arc<dyn MarketDataSource> = match config.mode {
        Mode::Live => Arc::new(CoinGeckoMarketDataSource::new(
            &config.market_base_url,
            config.http_timeout(),
        )),
        Mode::Mock => Arc::new(MockMarketDataSource::new()),
    };
    let predictions = Arc::new(MockPredictionSource::new());
    let sentiment = Arc::new(CorpusSentimentSource::new(Arc::new(VaderClassifier::new())));

    let service = Arc::new(ForecastService::new(market, predictions, sentiment));

    if cli.once {
        service.refresh_quotes().await;
        service.refresh_sentiment().await;
        service.refresh_forecasts().await;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&service.snapshots().await)?
            );
        } else {
            report(&service).await;
        }
        return Ok(());
    }

    let handle = service.start(config.cadences()).await;
    info!("Service running. Press Ctrl+C to shutdown.");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Stopping pollers...");
    handle.stop();
    info!("Goodbye!");

    Ok(())
}

async fn report(service: &ForecastService) {
    for coin in Coin::ALL {
        let Some(snapshot) = service.snapshot(coin).await else {
            continue;
        };
        info!(
            "{} {} ({}): ${:.4} ({:+.2}% 24h)",
            coin.icon(),
            snapshot.symbol,
            snapshot.quote.name,
            snapshot.quote.price,
            snapshot.quote.change_24h
        );
        if let Some(reading) = service.sentiment_reading(coin).await {
            info!(
                "  sentiment: {} {} ({}%, {} samples)",
                reading.trend,
                reading.trend.icon(),
                reading.confidence_pct,
                reading.sample_count
            );
        }
        for forecast in &snapshot.forecasts {
            info!(
                "  {}: ${:.4} {} ({:+.2}%, confidence {}%)",
                forecast.horizon,
                forecast.predicted_price,
                forecast.direction,
                forecast.potential_return_pct,
                forecast.confidence_pct
            );
        }
    }
}
