use crate::error::Error;
use crate::validate::{self, ClosedSet, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of instrument the provider can price.
///
/// Canonical strings are the provider's `quoteType` values, so the same
/// mapping serves both request shaping and search-result filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceableKind {
    #[serde(rename = "EQUITY")]
    Equity,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "MUTUALFUND")]
    MutualFund,
    #[serde(rename = "INDEX")]
    Index,
    #[serde(rename = "CURRENCY")]
    Currency,
    #[serde(rename = "CRYPTOCURRENCY")]
    Cryptocurrency,
    #[serde(rename = "FUTURE")]
    Future,
}

impl PriceableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceableKind::Equity => "EQUITY",
            PriceableKind::Etf => "ETF",
            PriceableKind::MutualFund => "MUTUALFUND",
            PriceableKind::Index => "INDEX",
            PriceableKind::Currency => "CURRENCY",
            PriceableKind::Cryptocurrency => "CRYPTOCURRENCY",
            PriceableKind::Future => "FUTURE",
        }
    }
}

impl ClosedSet for PriceableKind {
    const TYPE_NAME: &'static str = "PriceableKind";
    const FIELD: &'static str = "type";
    const ALL: &'static [Self] = &[
        PriceableKind::Equity,
        PriceableKind::Etf,
        PriceableKind::MutualFund,
        PriceableKind::Index,
        PriceableKind::Currency,
        PriceableKind::Cryptocurrency,
        PriceableKind::Future,
    ];

    fn canonical(self) -> &'static str {
        self.as_str()
    }

    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for PriceableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceableKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate::lookup(Self::FIELD, s)
    }
}
