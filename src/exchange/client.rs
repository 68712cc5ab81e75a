//! NBP REST API client.

use crate::config::NbpConfig;
use crate::error::{FetchError, FetchResult};
use crate::exchange::traits::RateSource;
use crate::exchange::types::*;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the NBP exchange rates API.
#[derive(Debug, Clone)]
pub struct NbpClient {
    http: Client,
    base_url: String,
    table: String,
    currency: String,
}

impl NbpClient {
    /// Create a new NBP client from configuration.
    pub fn new(config: &NbpConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.to_lowercase(),
            currency: config.currency.to_lowercase(),
        })
    }

    /// Upper-case currency code, for display.
    pub fn currency_code(&self) -> String {
        self.currency.to_uppercase()
    }

    fn rate_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/exchangerates/rates/{}/{}/{}/",
            self.base_url,
            self.table,
            self.currency,
            date.format("%Y-%m-%d")
        )
    }

    /// Get the mid rate published for `date`.
    ///
    /// HTTP 404 is how NBP says "no table for this date" and maps to `None`.
    #[instrument(skip(self), fields(currency = %self.currency))]
    pub async fn get_rate(&self, date: NaiveDate) -> FetchResult<Option<RateQuote>> {
        let url = self.rate_url(date);
        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport { date, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No rate published for {}", date);
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::UnexpectedStatus { date, status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { date, source })?;

        let series: ExchangeRatesSeries = serde_json::from_str(&body)
            .map_err(|source| FetchError::MalformedResponse { date, source })?;

        series
            .first_quote()
            .map(Some)
            .ok_or(FetchError::EmptyRates { date })
    }
}

#[async_trait]
impl RateSource for NbpClient {
    async fn fetch_rate(&self, date: NaiveDate) -> FetchResult<Option<RateQuote>> {
        self.get_rate(date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NbpClient {
        let config = NbpConfig {
            base_url: server.uri(),
            ..NbpConfig::default()
        };
        NbpClient::new(&config).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_found_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchangerates/rates/a/usd/2024-02-02/"))
            .and(header_eq("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"table":"A","currency":"dolar amerykański","code":"USD",
                    "rates":[{"no":"024/A/NBP/2024","effectiveDate":"2024-02-02","mid":3.9725}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let quote = client_for(&server)
            .get_rate(date(2024, 2, 2))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.rate, dec!(3.9725));
        assert_eq!(quote.effective_date, date(2024, 2, 2));
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchangerates/rates/a/usd/2024-02-03/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404 NotFound - Not Found - Brak danych"))
            .mount(&server)
            .await;

        let result = client_for(&server).get_rate(date(2024, 2, 3)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_rate(date(2024, 2, 2))
            .await
            .unwrap_err();

        match err {
            FetchError::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_request_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("400 BadRequest"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_rate(date(2024, 2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedStatus { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_rate(date(2024, 2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_empty_rates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"table":"A","code":"USD","rates":[]}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_rate(date(2024, 2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::EmptyRates { .. }));
    }

    #[test]
    fn test_rate_url_normalizes_config() {
        let config = NbpConfig {
            base_url: "https://api.nbp.pl/api/".to_string(),
            table: "A".to_string(),
            currency: "EUR".to_string(),
            ..NbpConfig::default()
        };
        let client = NbpClient::new(&config).unwrap();

        assert_eq!(
            client.rate_url(date(2024, 1, 5)),
            "https://api.nbp.pl/api/exchangerates/rates/a/eur/2024-01-05/"
        );
        assert_eq!(client.currency_code(), "EUR");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_fetch() {
        let client = NbpClient::new(&NbpConfig::default()).unwrap();
        let quote = client.get_rate(date(2024, 2, 2)).await.unwrap();

        assert!(quote.is_some());
        println!("USD mid rate: {}", quote.unwrap());
    }
}
