//! Loubach Core — typed requests against a quote-history provider.
//!
//! This crate turns loose user input into well-formed provider calls:
//! - Closed domain types (priceable kinds, periods, intervals, tickers)
//! - Parameter validation from strings or typed members
//! - Company-name to ticker resolution via the provider's search endpoint
//! - Quote loading into an owned, read-only table with CSV export
//! - The `Equity` handle tying a ticker to its provider connection
//!
//! Everything is synchronous. Each outbound request carries a timeout and is
//! issued exactly once.

pub mod domain;
pub mod error;
pub mod instrument;
pub mod load;
pub mod provider;
pub mod resolve;
pub mod table;
pub mod validate;

pub use domain::{Interval, Period, PriceableKind, Ticker};
pub use error::{Error, Result};
pub use instrument::{Equity, Identifier};
pub use load::{LoadRequest, QuoteLoad};
pub use provider::{ProviderConfig, ProviderError, QuoteProvider, SearchCandidate, YahooProvider};
pub use resolve::{resolve_ticker, resolve_tickers};
pub use table::{QuoteBar, QuoteTable};
pub use validate::{validate, ClosedSet, ParamValue};
