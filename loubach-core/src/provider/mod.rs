//! Provider boundary: the trait the loader and resolver talk to, and the
//! structured failures a provider can report.
//!
//! The QuoteProvider trait abstracts over the quote service so the Yahoo
//! client can be swapped for a stub in tests. Providers never retry; each
//! method issues exactly one outbound request.

pub mod config;
pub mod yahoo;

pub use config::ProviderConfig;
pub use yahoo::YahooProvider;

use crate::domain::Ticker;
use crate::load::LoadRequest;
use crate::table::QuoteBar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record returned by the company-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub symbol: String,
    /// Provider `quoteType`, e.g. `EQUITY` or `ETF`.
    pub quote_type: Option<String>,
    pub name: Option<String>,
    pub exchange: Option<String>,
}

/// Classified provider-side failures.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} for {subject}")]
    Http { status: u16, subject: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no quotes returned for {symbol}")]
    EmptyResult { symbol: String },
}

/// External quote service.
pub trait QuoteProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Free-text search; candidates come back in provider order.
    fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, ProviderError>;

    /// Quote history for a validated request.
    fn history(&self, request: &LoadRequest) -> Result<Vec<QuoteBar>, ProviderError>;

    /// Latest traded price.
    fn current_price(&self, ticker: &Ticker) -> Result<f64, ProviderError>;
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, ProviderError> {
        (**self).search(query)
    }

    fn history(&self, request: &LoadRequest) -> Result<Vec<QuoteBar>, ProviderError> {
        (**self).history(request)
    }

    fn current_price(&self, ticker: &Ticker) -> Result<f64, ProviderError> {
        (**self).current_price(ticker)
    }
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, ProviderError> {
        (**self).search(query)
    }

    fn history(&self, request: &LoadRequest) -> Result<Vec<QuoteBar>, ProviderError> {
        (**self).history(request)
    }

    fn current_price(&self, ticker: &Ticker) -> Result<f64, ProviderError> {
        (**self).current_price(ticker)
    }
}
