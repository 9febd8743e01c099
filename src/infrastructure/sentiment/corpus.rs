//! Corpus-backed sentiment source.
//!
//! Classifies a fixed set of sample social posts per coin through an
//! injected binary classifier and aggregates the per-text results by
//! majority vote. Classifier failures fall back to a static table;
//! unknown symbols get a neutral reading. Either way the call succeeds.

use crate::domain::ports::SentimentSource;
use crate::domain::sentiment::{
    SentimentLabel, SentimentReading, TextClassifier, TextScore, Trend,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const BTC_POSTS: &[&str] = &[
    "Bitcoin is looking strong today! #BTC #crypto",
    "BTC breaking resistance levels, bullish momentum",
    "Institutional adoption of Bitcoin continues to grow",
    "Bitcoin network hash rate reaching new highs",
    "Some concerns about market volatility but overall positive",
    "BTC holders staying strong despite market uncertainty",
];

const ETH_POSTS: &[&str] = &[
    "Ethereum 2.0 upgrades showing promising results",
    "ETH gas fees are improving with latest updates",
    "Smart contract adoption on Ethereum increasing",
    "DeFi protocols on Ethereum gaining traction",
    "Some scalability concerns but development is active",
    "Ethereum ecosystem continues to expand rapidly",
];

const DOGE_POSTS: &[&str] = &[
    "DOGE community remains strong and supportive",
    "Dogecoin adoption in payments growing",
    "DOGE holders staying optimistic about future",
    "Community-driven initiatives boosting DOGE visibility",
    "Some profit-taking but long-term sentiment positive",
    "Dogecoin memes keeping the community engaged",
];

fn sample_posts(symbol: &str) -> Option<&'static [&'static str]> {
    match symbol {
        "BTC" => Some(BTC_POSTS),
        "ETH" => Some(ETH_POSTS),
        "DOGE" => Some(DOGE_POSTS),
        _ => None,
    }
}

/// Static fallback per symbol: label and mean score. The trend is
/// derived through the same label mapping as the live path, so a
/// Negative entry would come out bearish even though the current table
/// never emits one.
fn fallback_entry(symbol: &str) -> (SentimentLabel, f64) {
    match symbol {
        "BTC" => (SentimentLabel::Positive, 0.75),
        "ETH" => (SentimentLabel::Positive, 0.65),
        "DOGE" => (SentimentLabel::Neutral, 0.55),
        _ => (SentimentLabel::Neutral, 0.5),
    }
}

pub struct CorpusSentimentSource {
    classifier: Arc<dyn TextClassifier>,
}

impl CorpusSentimentSource {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    fn fallback_reading(symbol: &str) -> SentimentReading {
        let (label, score) = fallback_entry(symbol);
        SentimentReading {
            symbol: symbol.to_string(),
            label,
            score,
            confidence_pct: (score * 100.0).round() as u8,
            trend: Trend::from(label),
            sample_count: 6,
        }
    }

    fn aggregate(symbol: &str, results: &[TextScore]) -> SentimentReading {
        let positive = results
            .iter()
            .filter(|r| r.label == SentimentLabel::Positive)
            .count();
        let negative = results
            .iter()
            .filter(|r| r.label == SentimentLabel::Negative)
            .count();
        let score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        let label = if positive > negative {
            SentimentLabel::Positive
        } else if negative > positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentReading {
            symbol: symbol.to_string(),
            label,
            score,
            confidence_pct: (score * 100.0).round() as u8,
            trend: Trend::from(label),
            sample_count: results.len(),
        }
    }
}

#[async_trait]
impl SentimentSource for CorpusSentimentSource {
    async fn classify(&self, symbol: &str) -> SentimentReading {
        let key = symbol.to_uppercase();
        let Some(posts) = sample_posts(&key) else {
            debug!("No sample corpus for {}; returning neutral reading", key);
            return SentimentReading::neutral(&key);
        };

        let mut results = Vec::with_capacity(posts.len());
        for post in posts {
            match self.classifier.classify(post) {
                Ok(score) => results.push(score),
                Err(err) => {
                    warn!(
                        "Sentiment classifier failed for {}: {:#}; serving fallback reading",
                        key, err
                    );
                    return Self::fallback_reading(&key);
                }
            }
        }

        Self::aggregate(&key, &results)
    }
}
