//! Company-name to ticker resolution through the provider's search endpoint.
//!
//! No caching: every call re-queries the provider.

use crate::domain::{PriceableKind, Ticker};
use crate::error::{Error, Result};
use crate::provider::{ProviderError, QuoteProvider, SearchCandidate};
use log::debug;

/// Resolve one company name to the symbol of its first equity listing.
///
/// Candidates are scanned in provider order; `Ok(None)` means the search
/// succeeded but nothing in it is an equity. Blank names resolve to `None`
/// without a request.
pub fn resolve_ticker<P: QuoteProvider + ?Sized>(provider: &P, company_name: &str) -> Result<Option<Ticker>> {
    let query = company_name.trim();
    if query.is_empty() {
        debug!("resolve_ticker | blank company name");
        return Ok(None);
    }

    let candidates = provider.search(query).map_err(|source| Error::Resolution {
        query: query.to_string(),
        source,
    })?;

    let found = first_of_kind(&candidates, PriceableKind::Equity)
        .map(|c| {
            Ticker::parse(&c.symbol).map_err(|e| Error::Resolution {
                query: query.to_string(),
                source: ProviderError::ResponseFormatChanged(format!("unusable symbol in search result: {e}")),
            })
        })
        .transpose()?;

    debug!(
        "resolve_ticker | {} | {} candidates | resolved: {:?}",
        query,
        candidates.len(),
        found.as_ref().map(Ticker::as_str)
    );
    Ok(found)
}

/// Resolve each name independently, preserving input order and length.
///
/// Unmatched names yield `None` at their position. A provider failure on any
/// name aborts the whole batch.
pub fn resolve_tickers<P, S>(provider: &P, company_names: &[S]) -> Result<Vec<Option<Ticker>>>
where
    P: QuoteProvider + ?Sized,
    S: AsRef<str>,
{
    company_names
        .iter()
        .map(|name| resolve_ticker(provider, name.as_ref()))
        .collect()
}

fn first_of_kind(candidates: &[SearchCandidate], kind: PriceableKind) -> Option<&SearchCandidate> {
    candidates
        .iter()
        .find(|c| c.quote_type.as_deref() == Some(kind.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(symbol: &str, quote_type: Option<&str>) -> SearchCandidate {
        SearchCandidate {
            symbol: symbol.into(),
            quote_type: quote_type.map(Into::into),
            name: None,
            exchange: None,
        }
    }

    #[test]
    fn first_equity_wins_in_provider_order() {
        let candidates = vec![
            candidate("APLE", Some("MUTUALFUND")),
            candidate("AAPL", Some("EQUITY")),
            candidate("AAPL.MX", Some("EQUITY")),
        ];
        let found = first_of_kind(&candidates, PriceableKind::Equity).unwrap();
        assert_eq!(found.symbol, "AAPL");
    }

    #[test]
    fn missing_quote_type_never_matches() {
        let candidates = vec![candidate("XYZ", None)];
        assert!(first_of_kind(&candidates, PriceableKind::Equity).is_none());
    }
}
