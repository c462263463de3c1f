//! HTTP client for the backend dashboard endpoints

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::types::{
    AnalyzeRequest, MarketBrief, Notification, PositionsResponse, PriceBoard, Profile,
    TelegramStatus,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    /// The backend answered with an `{"error": "..."}` payload
    #[error("{0}")]
    Backend(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for the trading-assistant backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(host: &str) -> ApiResult<Self> {
        let base = Url::parse(host)?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base })
    }

    pub fn host(&self) -> &str {
        self.base.as_str()
    }

    /// GET a JSON payload, rejecting non-2xx statuses and payloads that
    /// carry an `error` field before decoding into the endpoint shape.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.base.join(path)?;
        debug!(%url, "GET");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let value: Value = response.json().await?;
        Self::decode(value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(ApiError::Backend(message.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /prices?syms=<csv>`
    pub async fn prices(&self, symbols: &[String]) -> ApiResult<PriceBoard> {
        let syms = symbols.join(",");
        self.get_json("/prices", &[("syms", syms.as_str())]).await
    }

    /// `GET /portfolio/profile`
    pub async fn profile(&self) -> ApiResult<Profile> {
        self.get_json("/portfolio/profile", &[]).await
    }

    /// `GET /portfolio/positions`
    pub async fn positions(&self) -> ApiResult<PositionsResponse> {
        self.get_json("/portfolio/positions", &[]).await
    }

    /// `GET /notifications`
    pub async fn notifications(&self) -> ApiResult<Vec<Notification>> {
        self.get_json("/notifications", &[]).await
    }

    /// `GET /telegram_status`
    pub async fn telegram_status(&self) -> ApiResult<TelegramStatus> {
        self.get_json("/telegram_status", &[]).await
    }

    /// `GET /hourly_summary`
    pub async fn hourly_summary(&self) -> ApiResult<MarketBrief> {
        self.get_json("/hourly_summary", &[]).await
    }

    /// `POST /analyze`
    pub async fn analyze(&self, request: &AnalyzeRequest) -> ApiResult<MarketBrief> {
        let url = self.base.join("/analyze")?;
        debug!(%url, capital = %request.capital, "POST");

        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let value: Value = response.json().await?;
        Self::decode(value)
    }
}
