//! Company-name resolution, single and batch.

mod common;

use common::{candidate, StubProvider};
use loubach_core::{resolve_ticker, resolve_tickers, Error};

#[test]
fn single_name_returns_first_equity_symbol() {
    let stub = StubProvider::with_companies();
    let ticker = resolve_ticker(&stub, "Apple").unwrap().unwrap();
    assert_eq!(ticker.as_str(), "AAPL");
}

#[test]
fn single_name_without_equity_is_none() {
    let stub = StubProvider::with_companies();
    assert!(resolve_ticker(&stub, "S&P 500").unwrap().is_none());
    assert!(resolve_ticker(&stub, "NoSuchCompany123").unwrap().is_none());
}

#[test]
fn blank_name_skips_the_provider() {
    let stub = StubProvider::with_companies();
    assert!(resolve_ticker(&stub, "   ").unwrap().is_none());
    assert_eq!(stub.search_calls.get(), 0);
}

#[test]
fn batch_preserves_order_and_length_with_placeholders() {
    let stub = StubProvider::with_companies();
    let resolved = resolve_tickers(&stub, &["Apple", "NoSuchCompany123"]).unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].as_ref().unwrap().as_str(), "AAPL");
    assert!(resolved[1].is_none());
}

#[test]
fn batch_resolves_each_name_independently() {
    let stub = StubProvider::with_companies();
    let names = vec![
        "Tesla".to_string(),
        "Nope".to_string(),
        "Apple".to_string(),
        "Tesla".to_string(),
    ];
    let resolved = resolve_tickers(&stub, &names).unwrap();
    let symbols: Vec<_> = resolved
        .iter()
        .map(|t| t.as_ref().map(|t| t.as_str()).unwrap_or(""))
        .collect();

    assert_eq!(symbols, ["TSLA", "", "AAPL", "TSLA"]);
    // No caching: the repeated name is searched again
    assert_eq!(stub.search_calls.get(), 4);
}

#[test]
fn empty_batch_is_empty() {
    let stub = StubProvider::with_companies();
    let names: [&str; 0] = [];
    assert!(resolve_tickers(&stub, &names).unwrap().is_empty());
}

#[test]
fn provider_failure_aborts_batch() {
    let stub = StubProvider::with_companies();
    stub.fail_search.set(true);
    let err = resolve_tickers(&stub, &["Apple", "Tesla"]).unwrap_err();
    assert!(matches!(err, Error::Resolution { query, .. } if query == "Apple"));
    assert_eq!(stub.search_calls.get(), 1);
}

#[test]
fn unusable_symbol_in_search_result_is_resolution_error() {
    let stub = StubProvider::new().company("Weird", vec![candidate("BAD SYMBOL", "EQUITY")]);
    let err = resolve_ticker(&stub, "Weird").unwrap_err();
    assert!(matches!(err, Error::Resolution { .. }));
}
