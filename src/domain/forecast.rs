use crate::domain::market::Quote;
use crate::domain::sentiment::Trend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Forecast window. The set is fixed: every base forecast and every
/// fused batch covers exactly these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    SevenDays,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::OneDay, Horizon::ThreeDays, Horizon::SevenDays];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::SevenDays => "7d",
        }
    }

}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Technical indicators reported alongside a base forecast. Carried for
/// display; fusion does not consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub rsi: f64,
    pub macd: Trend,
    pub sentiment: f64,
}

/// Raw multi-horizon forecast from the prediction provider, before any
/// sentiment adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseForecast {
    pub symbol: String,
    /// Predicted price per horizon, USD.
    pub prices: HashMap<Horizon, f64>,
    /// Provider confidence per horizon, in [0, 100].
    pub confidence: HashMap<Horizon, f64>,
    pub indicators: Indicators,
}

impl BaseForecast {
    pub fn price(&self, horizon: Horizon) -> Option<f64> {
        self.prices.get(&horizon).copied()
    }

    pub fn confidence(&self, horizon: Horizon) -> Option<f64> {
        self.confidence.get(&horizon).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// One displayed prediction record. Derived, never persisted;
/// recomputed from scratch every fusion cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedForecast {
    pub horizon: Horizon,
    pub predicted_price: f64,
    /// Clamped to [50, 95] when sentiment contributed, always in [0, 100].
    pub confidence_pct: u8,
    pub direction: Direction,
    pub potential_return_pct: f64,
}

/// Complete fusion output for one coin. The snapshot store replaces
/// these atomically; readers either see the old one or the new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub symbol: String,
    pub quote: Quote,
    pub forecasts: [FusedForecast; 3],
    pub generated_at: DateTime<Utc>,
}
