//! Quote loading: validate a request, fetch it once, keep the result.

use crate::domain::{Interval, Period, PriceableKind, Ticker};
use crate::error::{Error, Result};
use crate::provider::{ProviderError, QuoteProvider};
use crate::table::QuoteTable;
use crate::validate::{validate, ParamValue};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A fully validated history request.
///
/// Only constructible through [`LoadRequest::new`] or from already-typed
/// parts, so every field is a member of its closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub kind: PriceableKind,
    pub ticker: Ticker,
    pub period: Period,
    pub interval: Interval,
}

impl LoadRequest {
    /// Validate loose parameters in argument order, failing on the first bad field.
    pub fn new(
        kind: impl Into<ParamValue>,
        ticker: &str,
        period: impl Into<ParamValue>,
        interval: impl Into<ParamValue>,
    ) -> Result<Self> {
        let kind = validate::<PriceableKind>("type", kind)?;
        let ticker = Ticker::parse(ticker)?;
        let period = validate::<Period>("period", period)?;
        let interval = validate::<Interval>("interval", interval)?;
        Ok(Self::from_parts(kind, ticker, period, interval))
    }

    pub fn from_parts(kind: PriceableKind, ticker: Ticker, period: Period, interval: Interval) -> Self {
        Self {
            kind,
            ticker,
            period,
            interval,
        }
    }
}

/// The outcome of one successful history fetch: the table and the
/// parameters that produced it.
#[derive(Debug, Clone)]
pub struct QuoteLoad {
    request: LoadRequest,
    table: QuoteTable,
}

impl QuoteLoad {
    /// Validate and fetch in one step.
    pub fn load<P: QuoteProvider + ?Sized>(
        provider: &P,
        kind: impl Into<ParamValue>,
        ticker: &str,
        period: impl Into<ParamValue>,
        interval: impl Into<ParamValue>,
    ) -> Result<Self> {
        let request = LoadRequest::new(kind, ticker, period, interval)?;
        Self::fetch(provider, request)
    }

    /// Issue exactly one history call for `request`.
    ///
    /// Any provider failure, including an empty table, becomes
    /// [`Error::Load`] naming the ticker and window.
    pub fn fetch<P: QuoteProvider + ?Sized>(provider: &P, request: LoadRequest) -> Result<Self> {
        let load_err = |source: ProviderError| {
            warn!(
                "load | {} | {} {} {} failed: {}",
                provider.name(),
                request.ticker,
                request.period,
                request.interval,
                source
            );
            Error::Load {
                symbol: request.ticker.to_string(),
                period: request.period,
                interval: request.interval,
                source,
            }
        };

        let bars = provider.history(&request).map_err(load_err)?;
        if bars.is_empty() {
            return Err(load_err(ProviderError::EmptyResult {
                symbol: request.ticker.to_string(),
            }));
        }

        let table = QuoteTable::new(request.ticker.clone(), bars);
        info!(
            "loaded {} rows for {} ({} / {})",
            table.len(),
            request.ticker,
            request.period,
            request.interval
        );
        Ok(Self { request, table })
    }

    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    pub fn kind(&self) -> PriceableKind {
        self.request.kind
    }

    pub fn period(&self) -> Period {
        self.request.period
    }

    pub fn interval(&self) -> Interval {
        self.request.interval
    }

    pub fn table(&self) -> &QuoteTable {
        &self.table
    }

    pub fn into_table(self) -> QuoteTable {
        self.table
    }

    /// See [`QuoteTable::export_csv`].
    pub fn export_csv(&self, dir: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
        self.table.export_csv(dir, file_name)
    }
}
