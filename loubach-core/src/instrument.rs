//! User-facing instrument handles.
//!
//! An [`Equity`] owns its provider connection and the last successful load.
//! It starts Unloaded; a successful `history` call moves it to Loaded, and
//! later calls re-fetch and stay Loaded. A failed call leaves the previous
//! state untouched.

use crate::domain::{Interval, Period, PriceableKind, Ticker};
use crate::error::{Error, Result};
use crate::load::{LoadRequest, QuoteLoad};
use crate::provider::{ProviderConfig, QuoteProvider, YahooProvider};
use crate::resolve::resolve_ticker;
use crate::table::QuoteTable;
use crate::validate::{validate, ParamValue};
use log::debug;
use std::path::{Path, PathBuf};

/// How the caller identifies the instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Ticker(String),
    CompanyName(String),
}

impl Identifier {
    /// Exactly one of `ticker` / `company_name` must be given.
    pub fn from_options(ticker: Option<&str>, company_name: Option<&str>) -> Result<Self> {
        match (ticker, company_name) {
            (Some(_), Some(_)) => Err(Error::AmbiguousIdentifier),
            (None, None) => Err(Error::MissingIdentifier),
            (Some(t), None) => Ok(Identifier::Ticker(t.to_string())),
            (None, Some(c)) => Ok(Identifier::CompanyName(c.to_string())),
        }
    }
}

/// A publicly traded stock.
pub struct Equity<P: QuoteProvider = YahooProvider> {
    ticker: Ticker,
    connection: P,
    /// `None` while Unloaded.
    loaded: Option<QuoteLoad>,
}

impl Equity<YahooProvider> {
    /// Open an equity against Yahoo Finance with default settings.
    pub fn connect(identifier: Identifier) -> Result<Self> {
        Self::connect_with(ProviderConfig::default(), identifier)
    }

    pub fn connect_with(config: ProviderConfig, identifier: Identifier) -> Result<Self> {
        Self::new(YahooProvider::new(config)?, identifier)
    }
}

impl<P: QuoteProvider> Equity<P> {
    pub const KIND: PriceableKind = PriceableKind::Equity;

    /// Resolve the identifier and take ownership of the provider connection.
    ///
    /// A company name costs one search request. A ticker is only checked for
    /// well-formedness (charset and length) and no request is made, so a
    /// malformed symbol fails here with [`Error::InvalidTicker`] while a
    /// well-formed but unknown one constructs fine and fails on first use:
    /// `history` returns [`Error::Load`] and `current_price` returns
    /// [`Error::PriceUnavailable`], both with `ProviderError::SymbolNotFound`.
    pub fn new(connection: P, identifier: Identifier) -> Result<Self> {
        let ticker = match identifier {
            Identifier::Ticker(raw) => Ticker::parse(&raw)?,
            Identifier::CompanyName(name) => resolve_ticker(&connection, &name)?
                .ok_or(Error::UnresolvedCompany { name })?,
        };
        debug!("equity | {} | connected via {}", ticker, connection.name());

        Ok(Self {
            ticker,
            connection,
            loaded: None,
        })
    }

    pub fn with_ticker(connection: P, ticker: &str) -> Result<Self> {
        Self::new(connection, Identifier::Ticker(ticker.to_string()))
    }

    pub fn with_company_name(connection: P, company_name: &str) -> Result<Self> {
        Self::new(connection, Identifier::CompanyName(company_name.to_string()))
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn last_load(&self) -> Option<&QuoteLoad> {
        self.loaded.as_ref()
    }

    pub fn table(&self) -> Option<&QuoteTable> {
        self.last_load().map(QuoteLoad::table)
    }

    /// Fetch quote history, replacing the previous load on success.
    pub fn history(
        &mut self,
        period: impl Into<ParamValue>,
        interval: impl Into<ParamValue>,
    ) -> Result<&QuoteTable> {
        let period = validate::<Period>("period", period)?;
        let interval = validate::<Interval>("interval", interval)?;
        let request = LoadRequest::from_parts(Self::KIND, self.ticker.clone(), period, interval);

        let load = QuoteLoad::fetch(&self.connection, request)?;
        Ok(self.loaded.insert(load).table())
    }

    /// One month of daily quotes.
    pub fn history_default(&mut self) -> Result<&QuoteTable> {
        self.history(Period::default(), Interval::default())
    }

    /// Live price from the provider; does not need a prior `history` call.
    pub fn current_price(&self) -> Result<f64> {
        self.connection
            .current_price(&self.ticker)
            .map_err(|source| Error::PriceUnavailable {
                symbol: self.ticker.to_string(),
                source,
            })
    }

    /// Export the last loaded table; see [`QuoteTable::export_csv`].
    pub fn export_csv(&self, dir: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
        let load = self.last_load().ok_or_else(|| Error::NotLoaded {
            symbol: self.ticker.to_string(),
        })?;
        load.export_csv(dir, file_name)
    }
}
