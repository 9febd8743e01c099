use crate::domain::forecast::Horizon;
use thiserror::Error;

/// Contract violations surfaced by the fusion engine. These indicate a
/// leaf source handed over a malformed value; they are fatal for the
/// current cycle only and must be logged, never silently ignored.
#[derive(Debug, Error)]
pub enum FusionError {
    #[error("Invalid quote for {symbol}: price {price} must be a positive number")]
    InvalidInput { symbol: String, price: f64 },

    #[error("Base forecast for {symbol} is missing the {horizon} horizon")]
    IncompleteForecast { symbol: String, horizon: Horizon },
}

/// Errors from the prediction provider. Unlike quote and sentiment
/// failures these are not absorbed: the caller skips fusion for the
/// cycle and keeps the previous snapshot.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction data not available for {symbol}")]
    UnsupportedSymbol { symbol: String },
}
