//! Parameter validation: loose caller input in, closed-set members out.
//!
//! Callers may hand over either a raw string or an already-typed member.
//! Strings are looked up against the canonical string table of the declared
//! type; typed members must belong to that same type. Nothing unvalidated
//! reaches the provider boundary.

use crate::domain::{Interval, Period, PriceableKind};
use crate::error::{Error, Result};

/// A closed enumerated type with a canonical string per member.
pub trait ClosedSet: Copy + Sized + 'static {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;
    /// Parameter name this type is validated under by default.
    const FIELD: &'static str;
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The exact string sent to the provider.
    fn canonical(self) -> &'static str;

    /// Extract a member of this type from a typed parameter, if it is one.
    fn from_param(value: &ParamValue) -> Option<Self>;
}

/// Caller-supplied value for a closed-set parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Kind(PriceableKind),
    Period(Period),
    Interval(Interval),
}

impl ParamValue {
    /// Name of the value's own type, as reported in `TypeMismatch`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Text(_) => "str",
            ParamValue::Kind(_) => PriceableKind::TYPE_NAME,
            ParamValue::Period(_) => Period::TYPE_NAME,
            ParamValue::Interval(_) => Interval::TYPE_NAME,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<PriceableKind> for ParamValue {
    fn from(value: PriceableKind) -> Self {
        ParamValue::Kind(value)
    }
}

impl From<Period> for ParamValue {
    fn from(value: Period) -> Self {
        ParamValue::Period(value)
    }
}

impl From<Interval> for ParamValue {
    fn from(value: Interval) -> Self {
        ParamValue::Interval(value)
    }
}

/// Validate `value` as a member of `E`, reporting failures under `field`.
///
/// Strings are matched against canonical strings after trimming; typed
/// members of `E` pass through unchanged; typed members of any other closed
/// set fail with [`Error::TypeMismatch`].
pub fn validate<E: ClosedSet>(field: &'static str, value: impl Into<ParamValue>) -> Result<E> {
    match value.into() {
        ParamValue::Text(raw) => lookup(field, &raw),
        other => E::from_param(&other).ok_or(Error::TypeMismatch {
            field,
            expected: E::TYPE_NAME,
            found: other.type_name(),
        }),
    }
}

/// Look up a raw string in the canonical string table of `E`.
pub fn lookup<E: ClosedSet>(field: &'static str, raw: &str) -> Result<E> {
    let needle = raw.trim();
    E::ALL
        .iter()
        .copied()
        .find(|member| member.canonical() == needle)
        .ok_or_else(|| Error::InvalidEnumValue {
            field,
            value: raw.to_string(),
            expected: E::ALL
                .iter()
                .map(|member| member.canonical())
                .collect::<Vec<_>>()
                .join(", "),
        })
}
