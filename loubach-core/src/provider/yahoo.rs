//! Yahoo Finance provider.
//!
//! History and current price come from the v8 chart API (`range` +
//! `interval` form); company search from the v1 search API. Blocking client,
//! one request per call, every request bounded by the configured timeout.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; unexpected payloads surface as `ResponseFormatChanged`.

use super::config::ProviderConfig;
use super::{ProviderError, QuoteProvider, SearchCandidate};
use crate::domain::{Interval, Period, Ticker};
use crate::error::{Error, Result};
use crate::load::LoadRequest;
use crate::table::QuoteBar;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance v1 search API response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuote {
    symbol: Option<String>,
    quote_type: Option<String>,
    shortname: Option<String>,
    longname: Option<String>,
    exchange: Option<String>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl YahooProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ProviderConfig::default())
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Chart API URL for a symbol: `{chart_url}/{SYMBOL}`.
    fn chart_url(&self, ticker: &Ticker) -> String {
        format!("{}/{}", self.config.chart_url.trim_end_matches('/'), ticker)
    }

    fn get_chart(
        &self,
        ticker: &Ticker,
        period: Period,
        interval: Interval,
    ) -> std::result::Result<ChartResponse, ProviderError> {
        self.get_json(
            &self.chart_url(ticker),
            &[
                ("range", period.as_str()),
                ("interval", interval.as_str()),
                ("includeAdjustedClose", "true"),
            ],
            ticker.as_str(),
        )
        .map_err(|e| match e {
            // 404 on the chart path means the symbol is unknown
            ProviderError::Http { status: 404, .. } => ProviderError::SymbolNotFound {
                symbol: ticker.to_string(),
            },
            other => other,
        })
    }

    /// Execute one GET and decode the JSON body, classifying failures.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> std::result::Result<T, ProviderError> {
        debug!("get_json | url: {} | query: {:?}", url, query);

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| self.classify(e))?;
        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("get_json | rate limited | subject: {}", subject);
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("get_json | HTTP {} | subject: {}", status, subject);
            return Err(ProviderError::Http {
                status: status.as_u16(),
                subject: subject.to_string(),
            });
        }

        resp.json::<T>().map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.config.timeout_secs)
            } else {
                ProviderError::ResponseFormatChanged(format!(
                    "failed to parse response for {subject}: {e}"
                ))
            }
        })
    }

    fn classify(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.timeout_secs)
        } else if err.is_decode() {
            ProviderError::ResponseFormatChanged(err.to_string())
        } else {
            ProviderError::NetworkUnreachable(err.to_string())
        }
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn search(&self, query: &str) -> std::result::Result<Vec<SearchCandidate>, ProviderError> {
        let count = self.config.search_results.to_string();
        let resp: SearchResponse = self.get_json(
            &self.config.search_url,
            &[("q", query), ("quotesCount", count.as_str()), ("newsCount", "0")],
            query,
        )?;
        Ok(parse_search(resp))
    }

    fn history(&self, request: &LoadRequest) -> std::result::Result<Vec<QuoteBar>, ProviderError> {
        let resp = self.get_chart(&request.ticker, request.period, request.interval)?;
        parse_bars(request.ticker.as_str(), resp)
    }

    fn current_price(&self, ticker: &Ticker) -> std::result::Result<f64, ProviderError> {
        let resp = self.get_chart(ticker, Period::Day, Interval::Day)?;
        parse_price(ticker.as_str(), resp)
    }
}

/// Unwrap the single chart result, mapping the embedded error object.
fn first_result(symbol: &str, resp: ChartResponse) -> std::result::Result<ChartData, ProviderError> {
    let result = resp.chart.result.ok_or_else(|| {
        if let Some(err) = resp.chart.error {
            if err.code == "Not Found" {
                ProviderError::SymbolNotFound {
                    symbol: symbol.to_string(),
                }
            } else {
                ProviderError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
        } else {
            ProviderError::ResponseFormatChanged("empty result with no error".into())
        }
    })?;

    result
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ResponseFormatChanged("result array is empty".into()))
}

/// Parse the chart API response into QuoteBars.
fn parse_bars(symbol: &str, resp: ChartResponse) -> std::result::Result<Vec<QuoteBar>, ProviderError> {
    let data = first_result(symbol, resp)?;

    // A valid symbol with nothing traded in the window has no timestamps
    let timestamps = data.timestamp.unwrap_or_default();

    let quote = data.indicators.quote.into_iter().next();
    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let quote = match quote {
        Some(q) => q,
        None if timestamps.is_empty() => {
            return Err(ProviderError::EmptyResult {
                symbol: symbol.to_string(),
            })
        }
        None => return Err(ProviderError::ResponseFormatChanged("no quote data".into())),
    };

    let mut bars = Vec::with_capacity(timestamps.len());

    for (i, &ts) in timestamps.iter().enumerate() {
        let timestamp = DateTime::<Utc>::from_timestamp(ts, 0).ok_or_else(|| {
            ProviderError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
        })?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();
        let adj_close = adj_closes.as_ref().and_then(|v| v.get(i).copied().flatten());

        // Non-trading rows come back with every field null
        if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none() {
            continue;
        }

        bars.push(QuoteBar {
            timestamp,
            open: open.unwrap_or(f64::NAN),
            high: high.unwrap_or(f64::NAN),
            low: low.unwrap_or(f64::NAN),
            close: close.unwrap_or(f64::NAN),
            adj_close: adj_close.unwrap_or(f64::NAN),
            volume: volume.unwrap_or(0),
        });
    }

    if bars.is_empty() {
        return Err(ProviderError::EmptyResult {
            symbol: symbol.to_string(),
        });
    }

    Ok(bars)
}

fn parse_price(symbol: &str, resp: ChartResponse) -> std::result::Result<f64, ProviderError> {
    first_result(symbol, resp)?
        .meta
        .and_then(|m| m.regular_market_price)
        .ok_or_else(|| ProviderError::ResponseFormatChanged("no regularMarketPrice in chart meta".into()))
}

fn parse_search(resp: SearchResponse) -> Vec<SearchCandidate> {
    resp.quotes
        .into_iter()
        .filter_map(|q| {
            Some(SearchCandidate {
                symbol: q.symbol?,
                quote_type: q.quote_type,
                name: q.longname.or(q.shortname),
                exchange: q.exchange,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_FIXTURE: &str = include_str!("../../tests/fixtures/chart_aapl.json");
    const NOT_FOUND_FIXTURE: &str = include_str!("../../tests/fixtures/chart_not_found.json");
    const SEARCH_FIXTURE: &str = include_str!("../../tests/fixtures/search_apple.json");

    fn chart(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_bars_and_skips_non_trading_rows() {
        let bars = parse_bars("AAPL", chart(CHART_FIXTURE)).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp.timestamp(), 1709649000);
        assert_eq!(bars[0].close, 170.12);
        assert_eq!(bars[0].adj_close, 169.9);
        assert_eq!(bars[1].volume, 71_765_100);
    }

    #[test]
    fn missing_adjclose_series_is_nan_not_close() {
        let json = r#"{"chart":{"result":[{"meta":{"regularMarketPrice":1.0},
            "timestamp":[1709649000],
            "indicators":{"quote":[{"open":[1.0],"high":[2.0],"low":[0.5],"close":[1.5],"volume":[10]}]}}],
            "error":null}}"#;
        let bars = parse_bars("AAPL", chart(json)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 1.5);
        assert!(bars[0].adj_close.is_nan());
    }

    #[test]
    fn current_price_comes_from_meta() {
        let price = parse_price("AAPL", chart(CHART_FIXTURE)).unwrap();
        assert_eq!(price, 172.75);
    }

    #[test]
    fn not_found_error_object_maps_to_symbol_not_found() {
        let err = parse_bars("ZZZZZZ", chart(NOT_FOUND_FIXTURE)).unwrap_err();
        assert!(matches!(err, ProviderError::SymbolNotFound { symbol } if symbol == "ZZZZZZ"));
    }

    #[test]
    fn empty_window_is_empty_result() {
        let json = r#"{"chart":{"result":[{"meta":{"regularMarketPrice":1.0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let err = parse_bars("AAPL", chart(json)).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResult { .. }));
    }

    #[test]
    fn missing_result_and_error_is_format_change() {
        let json = r#"{"chart":{"result":null,"error":null}}"#;
        let err = parse_price("AAPL", chart(json)).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseFormatChanged(_)));
    }

    #[test]
    fn search_keeps_provider_order_and_drops_symbol_less_entries() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let candidates = parse_search(resp);
        let symbols: Vec<_> = candidates.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, ["APLE", "AAPL", "AAPL.MX"]);
        assert_eq!(candidates[0].quote_type.as_deref(), Some("MUTUALFUND"));
        assert_eq!(candidates[1].name.as_deref(), Some("Apple Inc."));
    }

    #[test]
    fn chart_url_appends_symbol() {
        let provider = YahooProvider::new(ProviderConfig {
            chart_url: "https://example.test/chart/".into(),
            ..ProviderConfig::default()
        })
        .unwrap();
        let ticker = Ticker::parse("msft").unwrap();
        assert_eq!(provider.chart_url(&ticker), "https://example.test/chart/MSFT");
    }
}
