//! Forecast fusion engine.
//!
//! Combines a market quote, a raw multi-horizon base forecast, and an
//! optional sentiment reading into the final per-horizon prediction
//! records. Pure function of its inputs: no I/O, no hidden state, and
//! identical inputs always produce identical output.

use crate::domain::errors::FusionError;
use crate::domain::forecast::{BaseForecast, Direction, FusedForecast, Horizon};
use crate::domain::market::Quote;
use crate::domain::sentiment::SentimentReading;

/// Confidence band enforced whenever sentiment contributed to a record.
const CONFIDENCE_FLOOR: f64 = 50.0;
const CONFIDENCE_CEILING: f64 = 95.0;

/// Weight converting sentiment confidence distance from neutral (50%)
/// into forecast-confidence points. Bounded to ±5 pts over the full
/// sentiment range.
const SENTIMENT_BONUS_WEIGHT: f64 = 0.1;

/// Fuse one quote, one base forecast, and an optional sentiment reading
/// into records for all three horizons.
///
/// All-or-nothing: a non-positive quote price or a missing horizon
/// aborts the whole batch and no records are emitted. A caller that
/// wants partial output must pre-validate the base forecast instead.
pub fn fuse(
    quote: &Quote,
    base: &BaseForecast,
    sentiment: Option<&SentimentReading>,
) -> Result<[FusedForecast; 3], FusionError> {
    if !quote.price.is_finite() || quote.price <= 0.0 {
        return Err(FusionError::InvalidInput {
            symbol: quote.symbol.clone(),
            price: quote.price,
        });
    }

    let fuse_horizon = |horizon: Horizon| -> Result<FusedForecast, FusionError> {
        let raw_price = base
            .price(horizon)
            .ok_or_else(|| FusionError::IncompleteForecast {
                symbol: base.symbol.clone(),
                horizon,
            })?;
        let raw_confidence =
            base.confidence(horizon)
                .ok_or_else(|| FusionError::IncompleteForecast {
                    symbol: base.symbol.clone(),
                    horizon,
                })?;

        let predicted_price = match sentiment {
            Some(reading) => raw_price * reading.trend.price_multiplier(),
            None => raw_price,
        };

        let confidence = match sentiment {
            Some(reading) => {
                let bonus = (f64::from(reading.confidence_pct) - 50.0) * SENTIMENT_BONUS_WEIGHT;
                (raw_confidence + bonus).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
            }
            None => raw_confidence,
        };

        let direction = if predicted_price > quote.price {
            Direction::Up
        } else {
            Direction::Down
        };

        Ok(FusedForecast {
            horizon,
            predicted_price,
            confidence_pct: confidence.clamp(0.0, 100.0).round() as u8,
            direction,
            potential_return_pct: (predicted_price - quote.price) / quote.price * 100.0,
        })
    };

    Ok([
        fuse_horizon(Horizon::OneDay)?,
        fuse_horizon(Horizon::ThreeDays)?,
        fuse_horizon(Horizon::SevenDays)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::Indicators;
    use crate::domain::sentiment::{SentimentLabel, Trend};
    use std::collections::HashMap;

    fn quote(price: f64) -> Quote {
        Quote {
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            price,
            change_24h: 2.45,
        }
    }

    fn base(price_1d: f64, conf_1d: f64) -> BaseForecast {
        BaseForecast {
            symbol: "BTC".to_string(),
            prices: HashMap::from([
                (Horizon::OneDay, price_1d),
                (Horizon::ThreeDays, price_1d * 1.05),
                (Horizon::SevenDays, price_1d * 1.10),
            ]),
            confidence: HashMap::from([
                (Horizon::OneDay, conf_1d),
                (Horizon::ThreeDays, conf_1d - 7.0),
                (Horizon::SevenDays, conf_1d - 13.0),
            ]),
            indicators: Indicators {
                rsi: 65.0,
                macd: Trend::Bullish,
                sentiment: 0.75,
            },
        }
    }

    fn reading(trend: Trend, confidence_pct: u8) -> SentimentReading {
        let label = match trend {
            Trend::Bullish => SentimentLabel::Positive,
            Trend::Bearish => SentimentLabel::Negative,
            Trend::Neutral => SentimentLabel::Neutral,
        };
        SentimentReading {
            symbol: "BTC".to_string(),
            label,
            score: f64::from(confidence_pct) / 100.0,
            confidence_pct,
            trend,
            sample_count: 6,
        }
    }

    #[test]
    fn test_bullish_sentiment_scenario() {
        // quote 45250.32, base 1d 46000 @ 85, bullish sentiment @ 80%
        let records = fuse(
            &quote(45250.32),
            &base(46_000.0, 85.0),
            Some(&reading(Trend::Bullish, 80)),
        )
        .unwrap();

        let one_day = &records[0];
        assert_eq!(one_day.horizon, Horizon::OneDay);
        assert!((one_day.predicted_price - 46_920.0).abs() < 1e-6);
        assert_eq!(one_day.confidence_pct, 88); // 85 + (80-50)*0.1
        assert_eq!(one_day.direction, Direction::Up);
        assert!((one_day.potential_return_pct - 3.69).abs() < 0.01);
    }

    #[test]
    fn test_absent_sentiment_passes_base_through() {
        let records = fuse(&quote(45250.32), &base(46_000.0, 85.0), None).unwrap();

        let one_day = &records[0];
        assert_eq!(one_day.predicted_price, 46_000.0);
        assert_eq!(one_day.confidence_pct, 85);
        assert_eq!(one_day.direction, Direction::Up);
        assert!((one_day.potential_return_pct - 1.658).abs() < 0.01);
    }

    #[test]
    fn test_direction_matches_price_sign() {
        let q = quote(50_000.0);
        let records = fuse(&q, &base(46_000.0, 85.0), None).unwrap();
        for record in &records {
            let expected = if record.predicted_price > q.price {
                Direction::Up
            } else {
                Direction::Down
            };
            assert_eq!(record.direction, expected);
        }
    }

    #[test]
    fn test_equal_prices_are_down() {
        // Non-strict comparison: predicted == current is not "up".
        let mut b = base(46_000.0, 85.0);
        b.prices.insert(Horizon::OneDay, 46_000.0);
        let records = fuse(&quote(46_000.0), &b, None).unwrap();
        assert_eq!(records[0].direction, Direction::Down);
        assert_eq!(records[0].potential_return_pct, 0.0);
    }

    #[test]
    fn test_confidence_clamped_with_sentiment() {
        // Very confident base + very confident sentiment stays <= 95.
        let records = fuse(
            &quote(45_000.0),
            &base(46_000.0, 94.0),
            Some(&reading(Trend::Bullish, 100)),
        )
        .unwrap();
        assert_eq!(records[0].confidence_pct, 95);

        // Low base + dismissive sentiment is floored at 50.
        let records = fuse(
            &quote(45_000.0),
            &base(46_000.0, 45.0),
            Some(&reading(Trend::Bearish, 0)),
        )
        .unwrap();
        assert_eq!(records[0].confidence_pct, 50);
    }

    #[test]
    fn test_sentiment_nudge_bounded_to_two_percent() {
        let b = base(46_000.0, 85.0);
        for trend in [Trend::Bullish, Trend::Bearish, Trend::Neutral] {
            let records = fuse(&quote(45_000.0), &b, Some(&reading(trend, 90))).unwrap();
            for (record, horizon) in records.iter().zip(Horizon::ALL) {
                let raw = b.price(horizon).unwrap();
                let deviation = (record.predicted_price - raw).abs() / raw;
                assert!(deviation <= 0.02 + 1e-12, "deviation {} too large", deviation);
            }
        }
    }

    #[test]
    fn test_idempotent_on_identical_inputs() {
        let q = quote(45250.32);
        let b = base(46_000.0, 85.0);
        let s = reading(Trend::Bullish, 80);
        let first = fuse(&q, &b, Some(&s)).unwrap();
        let second = fuse(&q, &b, Some(&s)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for bad in [0.0, -1.0, f64::NAN] {
            let result = fuse(&quote(bad), &base(46_000.0, 85.0), None);
            assert!(matches!(result, Err(FusionError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_missing_horizon_aborts_whole_batch() {
        let mut b = base(46_000.0, 85.0);
        b.prices.remove(&Horizon::SevenDays);
        let result = fuse(&quote(45_000.0), &b, None);
        match result {
            Err(FusionError::IncompleteForecast { horizon, .. }) => {
                assert_eq!(horizon, Horizon::SevenDays)
            }
            other => panic!("expected IncompleteForecast, got {:?}", other),
        }

        // Missing confidence entry counts as incomplete too.
        let mut b = base(46_000.0, 85.0);
        b.confidence.remove(&Horizon::ThreeDays);
        assert!(matches!(
            fuse(&quote(45_000.0), &b, None),
            Err(FusionError::IncompleteForecast {
                horizon: Horizon::ThreeDays,
                ..
            })
        ));
    }

    #[test]
    fn test_neutral_trend_leaves_price_untouched() {
        let b = base(46_000.0, 85.0);
        let records = fuse(&quote(45_000.0), &b, Some(&reading(Trend::Neutral, 50))).unwrap();
        assert_eq!(records[0].predicted_price, 46_000.0);
        // Bonus at exactly 50% sentiment confidence is zero but the
        // clamp still applies.
        assert_eq!(records[0].confidence_pct, 85);
    }
}
