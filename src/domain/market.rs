use serde::{Deserialize, Serialize};

/// Latest known price and 24h change for a coin.
///
/// Quotes are immutable snapshots: each refresh produces a new value
/// that replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    /// Spot price in USD. Must be positive for fusion to accept it.
    pub price: f64,
    /// 24-hour change in percent. May be negative.
    pub change_24h: f64,
}
