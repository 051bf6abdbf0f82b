//! Error taxonomy for the request/validation/resolution layer.
//!
//! Every failure is terminal for the call that raised it. Nothing here is
//! retried internally; the caller decides what to do with the context carried
//! in each variant.

use crate::domain::{Interval, Period};
use crate::provider::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value '{value}' for {field}: expected one of [{expected}]")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("{field} must be a {expected} or a string, not {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected either a ticker or a company name to be provided, not both")]
    AmbiguousIdentifier,

    #[error("either a ticker or a company name must be provided")]
    MissingIdentifier,

    #[error("company '{name}' does not have a publicly traded equity")]
    UnresolvedCompany { name: String },

    #[error("invalid ticker '{symbol}': {reason}")]
    InvalidTicker { symbol: String, reason: String },

    #[error("ticker resolution failed for '{query}': {source}")]
    Resolution {
        query: String,
        #[source]
        source: ProviderError,
    },

    #[error("cannot load {symbol} quote history (period {period}, interval {interval}): {source}")]
    Load {
        symbol: String,
        period: Period,
        interval: Interval,
        #[source]
        source: ProviderError,
    },

    #[error("current price unavailable for {symbol}: {source}")]
    PriceUnavailable {
        symbol: String,
        #[source]
        source: ProviderError,
    },

    #[error("folder path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("no quote history loaded for {symbol}; call history() first")]
    NotLoaded { symbol: String },

    #[error("export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    #[error("invalid provider configuration: {0}")]
    Config(String),
}
