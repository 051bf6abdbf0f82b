//! In-memory provider for integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use loubach_core::{LoadRequest, ProviderError, QuoteBar, QuoteProvider, SearchCandidate, Ticker};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub struct StubProvider {
    companies: HashMap<String, Vec<SearchCandidate>>,
    bars: Vec<QuoteBar>,
    price: f64,
    /// When set, symbols outside it answer `SymbolNotFound`.
    listed: Option<HashSet<String>>,
    pub fail_history: Cell<bool>,
    pub fail_search: Cell<bool>,
    pub history_calls: Cell<usize>,
    pub search_calls: Cell<usize>,
    pub price_calls: Cell<usize>,
    pub last_request: RefCell<Option<LoadRequest>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            companies: HashMap::new(),
            bars: sample_bars(),
            price: 172.75,
            listed: None,
            fail_history: Cell::new(false),
            fail_search: Cell::new(false),
            history_calls: Cell::new(0),
            search_calls: Cell::new(0),
            price_calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }

    /// The usual fixture: Apple and Tesla resolve, anything else does not.
    pub fn with_companies() -> Self {
        Self::new()
            .company(
                "Apple",
                vec![
                    candidate("APLE", "MUTUALFUND"),
                    candidate("AAPL", "EQUITY"),
                    candidate("AAPL.MX", "EQUITY"),
                ],
            )
            .company("Tesla", vec![candidate("TSLA", "EQUITY")])
            .company("S&P 500", vec![candidate("^GSPC", "INDEX")])
    }

    pub fn company(mut self, name: &str, candidates: Vec<SearchCandidate>) -> Self {
        self.companies.insert(name.to_string(), candidates);
        self
    }

    pub fn bars(mut self, bars: Vec<QuoteBar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn listing(mut self, symbols: &[&str]) -> Self {
        self.listed = Some(symbols.iter().map(|s| s.to_string()).collect());
        self
    }

    fn check_listed(&self, ticker: &Ticker) -> Result<(), ProviderError> {
        match &self.listed {
            Some(listed) if !listed.contains(ticker.as_str()) => Err(ProviderError::SymbolNotFound {
                symbol: ticker.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl QuoteProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, ProviderError> {
        self.search_calls.set(self.search_calls.get() + 1);
        if self.fail_search.get() {
            return Err(ProviderError::Timeout(10));
        }
        Ok(self.companies.get(query).cloned().unwrap_or_default())
    }

    fn history(&self, request: &LoadRequest) -> Result<Vec<QuoteBar>, ProviderError> {
        self.history_calls.set(self.history_calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        if self.fail_history.get() {
            return Err(ProviderError::NetworkUnreachable("connection refused".into()));
        }
        self.check_listed(&request.ticker)?;
        Ok(self.bars.clone())
    }

    fn current_price(&self, ticker: &Ticker) -> Result<f64, ProviderError> {
        self.price_calls.set(self.price_calls.get() + 1);
        self.check_listed(ticker)?;
        Ok(self.price)
    }
}

pub fn candidate(symbol: &str, quote_type: &str) -> SearchCandidate {
    SearchCandidate {
        symbol: symbol.to_string(),
        quote_type: Some(quote_type.to_string()),
        name: None,
        exchange: None,
    }
}

pub fn sample_bars() -> Vec<QuoteBar> {
    (4..=8)
        .map(|day| {
            let close = 170.0 + day as f64;
            QuoteBar {
                timestamp: Utc.with_ymd_and_hms(2024, 3, day, 14, 30, 0).unwrap(),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.5,
                close,
                adj_close: close - 0.2,
                volume: 50_000_000 + day as u64,
            }
        })
        .collect()
}
