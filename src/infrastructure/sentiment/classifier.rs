//! Local NLP sentiment classifier backed by VADER.
//!
//! VADER is tuned for social-media text, which is exactly what the
//! sample corpus contains. A small crypto-keyword boost captures jargon
//! the general lexicon misses ("bullish", "adoption", "hack").

use crate::domain::sentiment::{SentimentLabel, TextClassifier, TextScore};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Crypto jargon and its sentiment weight, applied on top of the VADER
/// compound score.
const CRYPTO_KEYWORDS: &[(&str, f64)] = &[
    ("bullish", 0.5),
    ("bearish", -0.5),
    ("breaking resistance", 0.3),
    ("momentum", 0.2),
    ("adoption", 0.2),
    ("institutional", 0.2),
    ("all-time high", 0.5),
    ("upgrade", 0.3),
    ("scalability", -0.1),
    ("hack", -0.5),
    ("hacked", -0.5),
    ("rug pull", -0.6),
    ("scam", -0.6),
    ("sell-off", -0.4),
    ("profit-taking", -0.2),
    ("volatility", -0.2),
];

pub struct VaderClassifier {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderClassifier {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn keyword_boost(text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        CRYPTO_KEYWORDS
            .iter()
            .filter(|(keyword, _)| text_lower.contains(keyword))
            .map(|(_, weight)| weight)
            .sum()
    }
}

impl Default for VaderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TextClassifier for VaderClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<TextScore> {
        if text.trim().is_empty() {
            return Ok(TextScore {
                label: SentimentLabel::Positive,
                score: 0.5,
            });
        }

        let scores = self.analyzer.polarity_scores(text);
        let compound = scores["compound"];
        let combined = (compound + Self::keyword_boost(text) * 0.5).clamp(-1.0, 1.0);

        // Binary output: the aggregate layer derives Neutral from ties,
        // never from a single text.
        let label = if combined >= 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };

        // Distance from zero mapped into [0.5, 1.0] as confidence.
        let score = 0.5 + combined.abs() / 2.0;

        Ok(TextScore { label, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullish_posts_classify_positive() {
        let classifier = VaderClassifier::new();
        let posts = [
            "Bitcoin is looking strong today! #BTC #crypto",
            "BTC breaking resistance levels, bullish momentum",
            "Institutional adoption of Bitcoin continues to grow",
        ];
        for post in posts {
            let result = classifier.classify(post).unwrap();
            assert_eq!(
                result.label,
                SentimentLabel::Positive,
                "expected positive for '{}'",
                post
            );
        }
    }

    #[test]
    fn test_bearish_posts_classify_negative() {
        let classifier = VaderClassifier::new();
        let posts = [
            "Exchange hacked, millions stolen, total disaster for holders",
            "Massive sell-off, panic everywhere, this scam is collapsing",
        ];
        for post in posts {
            let result = classifier.classify(post).unwrap();
            assert_eq!(
                result.label,
                SentimentLabel::Negative,
                "expected negative for '{}'",
                post
            );
        }
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let classifier = VaderClassifier::new();
        for text in [
            "",
            "absolutely amazing wonderful fantastic bullish moon",
            "horrible scam hack disaster terrible",
        ] {
            let result = classifier.classify(text).unwrap();
            assert!((0.5..=1.0).contains(&result.score));
        }
    }

    #[test]
    fn test_keyword_boost_shifts_generic_text() {
        let classifier = VaderClassifier::new();
        let plain = classifier.classify("The market moved today").unwrap();
        let boosted = classifier
            .classify("The market moved today, bullish momentum")
            .unwrap();
        assert_eq!(boosted.label, SentimentLabel::Positive);
        assert!(boosted.score >= plain.score);
    }
}
