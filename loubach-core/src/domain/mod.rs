//! Closed domain types: priceable kinds, lookback periods, sampling
//! intervals and validated ticker symbols.

pub mod kind;
pub mod ticker;
pub mod time;

pub use kind::PriceableKind;
pub use ticker::Ticker;
pub use time::{Interval, Period};
