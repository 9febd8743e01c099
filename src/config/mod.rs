//! Configuration loading from environment variables.

use crate::application::forecast_service::Cadences;
use crate::infrastructure::coingecko;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Where market data comes from. Predictions and sentiment are always
/// in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Mock,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "mock" => Ok(Mode::Mock),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'live' or 'mock'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub market_base_url: String,
    pub http_timeout_secs: u64,
    pub quote_poll_secs: u64,
    pub forecast_poll_secs: u64,
    pub sentiment_poll_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            mode: env::var("MODE")
                .unwrap_or_else(|_| "live".to_string())
                .parse()?,
            market_base_url: env::var("MARKET_BASE_URL")
                .unwrap_or_else(|_| coingecko::DEFAULT_BASE_URL.to_string()),
            http_timeout_secs: parse_u64("HTTP_TIMEOUT_SECS", 10)?,
            quote_poll_secs: parse_u64("QUOTE_POLL_SECS", 60)?,
            forecast_poll_secs: parse_u64("FORECAST_POLL_SECS", 30)?,
            sentiment_poll_secs: parse_u64("SENTIMENT_POLL_SECS", 180)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("HTTP_TIMEOUT_SECS", self.http_timeout_secs),
            ("QUOTE_POLL_SECS", self.quote_poll_secs),
            ("FORECAST_POLL_SECS", self.forecast_poll_secs),
            ("SENTIMENT_POLL_SECS", self.sentiment_poll_secs),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be greater than zero", name);
            }
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn cadences(&self) -> Cadences {
        Cadences {
            quotes: Duration::from_secs(self.quote_poll_secs),
            fusion: Duration::from_secs(self.forecast_poll_secs),
            sentiment: Duration::from_secs(self.sentiment_poll_secs),
        }
    }
}

fn parse_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("{} must be an integer, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("live".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!("MOCK".parse::<Mode>().unwrap(), Mode::Mock);
        assert!("paper".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_cadences() {
        let config = Config {
            mode: Mode::Mock,
            market_base_url: coingecko::DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: 10,
            quote_poll_secs: 60,
            forecast_poll_secs: 30,
            sentiment_poll_secs: 180,
        };
        let cadences = config.cadences();
        assert_eq!(cadences.quotes, Duration::from_secs(60));
        assert_eq!(cadences.fusion, Duration::from_secs(30));
        assert_eq!(cadences.sentiment, Duration::from_secs(180));
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let config = Config {
            mode: Mode::Mock,
            market_base_url: coingecko::DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: 10,
            quote_poll_secs: 0,
            forecast_poll_secs: 30,
            sentiment_poll_secs: 180,
        };
        assert!(config.validate().is_err());
    }
}
