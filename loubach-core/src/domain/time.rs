//! Lookback periods and sampling intervals accepted by the history endpoint.

use crate::error::Error;
use crate::validate::{self, ClosedSet, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Total lookback span for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "5d")]
    FiveDays,
    #[default]
    #[serde(rename = "1mo")]
    Month,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    Year,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "1d",
            Period::FiveDays => "5d",
            Period::Month => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::Year => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl ClosedSet for Period {
    const TYPE_NAME: &'static str = "Period";
    const FIELD: &'static str = "period";
    const ALL: &'static [Self] = &[
        Period::Day,
        Period::FiveDays,
        Period::Month,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::Year,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    fn canonical(self) -> &'static str {
        self.as_str()
    }

    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Period(period) => Some(*period),
            _ => None,
        }
    }
}

/// Granularity at which quotes inside the period are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute,
    #[serde(rename = "2m")]
    TwoMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "60m")]
    SixtyMinutes,
    #[serde(rename = "90m")]
    NinetyMinutes,
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1wk")]
    Week,
    #[serde(rename = "1mo")]
    Month,
    #[serde(rename = "3mo")]
    Quarter,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Minute => "1m",
            Interval::TwoMinutes => "2m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::SixtyMinutes => "60m",
            Interval::NinetyMinutes => "90m",
            Interval::Hour => "1h",
            Interval::Day => "1d",
            Interval::FiveDays => "5d",
            Interval::Week => "1wk",
            Interval::Month => "1mo",
            Interval::Quarter => "3mo",
        }
    }

    /// True for sampling finer than one trading day.
    pub fn is_intraday(self) -> bool {
        matches!(
            self,
            Interval::Minute
                | Interval::TwoMinutes
                | Interval::FiveMinutes
                | Interval::FifteenMinutes
                | Interval::ThirtyMinutes
                | Interval::SixtyMinutes
                | Interval::NinetyMinutes
                | Interval::Hour
        )
    }
}

impl ClosedSet for Interval {
    const TYPE_NAME: &'static str = "Interval";
    const FIELD: &'static str = "interval";
    const ALL: &'static [Self] = &[
        Interval::Minute,
        Interval::TwoMinutes,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::SixtyMinutes,
        Interval::NinetyMinutes,
        Interval::Hour,
        Interval::Day,
        Interval::FiveDays,
        Interval::Week,
        Interval::Month,
        Interval::Quarter,
    ];

    fn canonical(self) -> &'static str {
        self.as_str()
    }

    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Interval(interval) => Some(*interval),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate::lookup(Self::FIELD, s)
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate::lookup(Self::FIELD, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_month_of_daily_bars() {
        assert_eq!(Period::default(), Period::Month);
        assert_eq!(Interval::default(), Interval::Day);
    }

    #[test]
    fn canonical_strings_are_unique() {
        let mut periods: Vec<_> = Period::ALL.iter().map(|p| p.as_str()).collect();
        periods.sort_unstable();
        periods.dedup();
        assert_eq!(periods.len(), Period::ALL.len());

        let mut intervals: Vec<_> = Interval::ALL.iter().map(|i| i.as_str()).collect();
        intervals.sort_unstable();
        intervals.dedup();
        assert_eq!(intervals.len(), Interval::ALL.len());
    }

    #[test]
    fn shared_strings_resolve_per_type() {
        // "1mo" is both a period and an interval
        assert_eq!("1mo".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("1mo".parse::<Interval>().unwrap(), Interval::Month);
        assert!("1wk".parse::<Period>().is_err());
    }

    #[test]
    fn serde_matches_display() {
        for interval in Interval::ALL {
            let json = serde_json::to_string(interval).unwrap();
            assert_eq!(json, format!("\"{interval}\""));
        }
        for period in Period::ALL {
            let json = serde_json::to_string(period).unwrap();
            assert_eq!(json, format!("\"{period}\""));
        }
    }

    #[test]
    fn intraday_classification() {
        assert!(Interval::Minute.is_intraday());
        assert!(Interval::Hour.is_intraday());
        assert!(!Interval::Day.is_intraday());
        assert!(!Interval::Week.is_intraday());
    }
}
