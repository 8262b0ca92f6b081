//! HTTP client for the histo-candle provider API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::data::{Candle, CandleSeries};
use crate::error::{Error, Result};
use crate::interval::Unit;
use crate::provider::CandleSource;

/// Hard cap the provider places on the `limit` parameter.
pub const PROVIDER_LIMIT_CAP: usize = 2000;

/// HTTP market-data client.
///
/// One `GET {base}/data/v2/histo{unit}` per fetch, no retries. The request
/// timeout from [`ProviderConfig`] is mandatory; an indefinite hang surfaces
/// as [`Error::ProviderUnavailable`].
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
    quote_currency: String,
}

impl MarketDataClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::ProviderUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            quote_currency: config.quote_currency.clone(),
        })
    }
}

#[async_trait]
impl CandleSource for MarketDataClient {
    async fn fetch(
        &self,
        ticker: &str,
        unit: Unit,
        sample_count: usize,
        end_timestamp: Option<DateTime<Utc>>,
    ) -> Result<CandleSeries> {
        let url = format!("{}/data/v2/histo{}", self.base_url, unit.endpoint());
        let limit = sample_count.clamp(1, PROVIDER_LIMIT_CAP);

        let mut query: Vec<(&str, String)> = vec![
            ("fsym", ticker.to_string()),
            ("tsym", self.quote_currency.clone()),
            ("limit", limit.to_string()),
            ("aggregate", "1".to_string()),
        ];
        if let Some(end) = end_timestamp {
            query.push(("toTs", end.timestamp().to_string()));
        }

        debug!(ticker, unit = unit.endpoint(), limit, "fetching candles");

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ProviderError(format!("http status {status}")));
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_histo_body(&body)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::ProviderUnavailable(err.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoResponse {
    response: String,
    #[serde(default)]
    message: Option<String>,
    // Left as a raw value until the status field is checked: error bodies
    // carry `Data` shapes that are not candle arrays.
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HistoData {
    #[serde(rename = "Data")]
    data: Option<Vec<RawCandle>>,
}

#[derive(Debug, Deserialize)]
struct RawCandle {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volumefrom: f64,
    volumeto: f64,
}

impl TryFrom<RawCandle> for Candle {
    type Error = Error;

    fn try_from(raw: RawCandle) -> Result<Candle> {
        let timestamp = DateTime::from_timestamp(raw.time, 0)
            .ok_or_else(|| Error::MalformedResponse(format!("bad unix timestamp {}", raw.time)))?;

        Ok(Candle::new(
            timestamp,
            raw.open,
            raw.high,
            raw.low,
            raw.close,
            raw.volumefrom,
            raw.volumeto,
        ))
    }
}

/// Parse a histo-candle response body into a series. Pure function, exercised
/// directly by tests without a network.
pub fn parse_histo_body(body: &str) -> Result<CandleSeries> {
    let parsed: HistoResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if !parsed.response.eq_ignore_ascii_case("success") {
        return Err(Error::ProviderError(
            parsed
                .message
                .unwrap_or_else(|| "provider signalled failure".to_string()),
        ));
    }

    let data: HistoData = parsed
        .data
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| Error::MalformedResponse(e.to_string()))?
        .ok_or_else(|| Error::MalformedResponse("missing Data object".to_string()))?;

    let rows = data
        .data
        .ok_or_else(|| Error::MalformedResponse("missing Data.Data candle array".to_string()))?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        candles.push(Candle::try_from(row)?);
    }

    Ok(CandleSeries::from_vec(candles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_body() {
        let body = r#"{
            "Response": "Success",
            "Data": { "Data": [
                { "time": 1700000000, "open": 1.0, "high": 2.0, "low": 0.5,
                  "close": 1.5, "volumefrom": 10.0, "volumeto": 15.0 },
                { "time": 1700086400, "open": 1.5, "high": 2.5, "low": 1.0,
                  "close": 2.0, "volumefrom": 11.0, "volumeto": 16.0 }
            ] }
        }"#;

        let series = parse_histo_body(body).unwrap();

        assert_eq!(series.len(), 2);
        let first = series.first().unwrap();
        assert_eq!(first.open, 1.0);
        assert_eq!(first.volume_to, 15.0);
        assert!(series.get(0).unwrap().timestamp < series.get(1).unwrap().timestamp);
    }

    #[test]
    fn test_parse_reorders_descending_rows() {
        let body = r#"{
            "Response": "Success",
            "Data": { "Data": [
                { "time": 1700086400, "open": 2.0, "high": 2.0, "low": 2.0,
                  "close": 2.0, "volumefrom": 1.0, "volumeto": 1.0 },
                { "time": 1700000000, "open": 1.0, "high": 1.0, "low": 1.0,
                  "close": 1.0, "volumefrom": 1.0, "volumeto": 1.0 }
            ] }
        }"#;

        let series = parse_histo_body(body).unwrap();

        assert_eq!(series.first().unwrap().close, 1.0);
        assert_eq!(series.last().unwrap().close, 2.0);
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{
            "Response": "Error",
            "Message": "You are over your rate limit",
            "Data": []
        }"#;

        let err = parse_histo_body(body).unwrap_err();

        assert!(matches!(err, Error::ProviderError(msg) if msg.contains("rate limit")));
    }

    #[test]
    fn test_parse_missing_data_array() {
        let body = r#"{ "Response": "Success", "Data": {} }"#;

        let err = parse_histo_body(body).unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_bad_row() {
        let body = r#"{
            "Response": "Success",
            "Data": { "Data": [ { "time": 1700000000, "open": 1.0 } ] }
        }"#;

        let err = parse_histo_body(body).unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_histo_body("<html>gateway timeout</html>").unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_empty_candle_array_is_valid() {
        let body = r#"{ "Response": "Success", "Data": { "Data": [] } }"#;

        let series = parse_histo_body(body).unwrap();

        assert!(series.is_empty());
    }
}
