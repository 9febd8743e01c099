use serde::{Deserialize, Serialize};
use std::fmt;

/// Label emitted by the binary text classifier. `Neutral` only ever
/// appears at the aggregate level (majority tie or missing corpus),
/// never from a single text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Qualitative market trend derived from the aggregate sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Price nudge applied during fusion. Bounded to ±2% so social
    /// signal can bias the trajectory without dominating the base model.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Self::Bullish => 1.02,
            Self::Bearish => 0.98,
            Self::Neutral => 1.00,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bullish => "📈",
            Self::Bearish => "📉",
            Self::Neutral => "📊",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

impl From<SentimentLabel> for Trend {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Trend::Bullish,
            SentimentLabel::Negative => Trend::Bearish,
            SentimentLabel::Neutral => Trend::Neutral,
        }
    }
}

/// Aggregated social sentiment for one coin, derived from a fixed
/// sample corpus. Recomputed on its own cadence, independent of quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub symbol: String,
    pub label: SentimentLabel,
    /// Mean per-text classifier confidence, in [0, 1].
    pub score: f64,
    /// round(score * 100).
    pub confidence_pct: u8,
    pub trend: Trend,
    pub sample_count: usize,
}

impl SentimentReading {
    /// Reading for a symbol with no sample corpus. Not an error.
    pub fn neutral(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            label: SentimentLabel::Neutral,
            score: 0.5,
            confidence_pct: 50,
            trend: Trend::Neutral,
            sample_count: 0,
        }
    }
}

/// Score for a single text from the binary classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScore {
    /// Positive or Negative; the binary classifier never emits Neutral.
    pub label: SentimentLabel,
    /// Classifier confidence in [0, 1].
    pub score: f64,
}

/// Black-box binary sentiment classifier over a single text.
///
/// Injected into the sentiment source so the NLP backend owns its own
/// initialization state instead of living in a lazy global.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> anyhow::Result<TextScore>;
}
