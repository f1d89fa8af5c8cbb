//! ValueSERP API client implementation

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use super::models::SearchResponse;
use super::{OrganicResult, RESULT_COUNT, SerpApi};
use crate::config::DEFAULT_API_HOST;
use crate::error::{ApiError, Result};

/// ValueSERP API client
///
/// No request timeout is configured; the transport default applies.
pub struct ValueSerpClient {
    http: HttpClient,
    base_url: String,
}

impl ValueSerpClient {
    /// Create a client, optionally for a custom API host (mock servers, proxies)
    pub fn with_host(api_host: Option<&str>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("serprank/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = api_host
            .unwrap_or(DEFAULT_API_HOST)
            .trim_end_matches('/')
            .to_string();

        Ok(Self { http, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Error envelope ValueSERP sends alongside failures
#[derive(Deserialize)]
struct ErrorBody {
    request_info: Option<RequestInfo>,
}

#[derive(Deserialize)]
struct RequestInfo {
    message: Option<String>,
}

/// Pull a readable message out of an error body, falling back to the raw text
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.request_info)
        .and_then(|info| info.message)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {}", status)
            } else {
                trimmed.chars().take(200).collect()
            }
        })
}

/// Map a non-success status to an error
fn status_error(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(status.as_u16()),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::PAYMENT_REQUIRED => ApiError::RateLimit,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(error_message(body, status))
        }
        status if status.is_server_error() => ApiError::ServerError(error_message(body, status)),
        status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

#[async_trait]
impl SerpApi for ValueSerpClient {
    async fn organic_results(
        &self,
        keyword: &str,
        location: &str,
        api_key: &str,
    ) -> Result<Vec<OrganicResult>> {
        let url = format!("{}/search", self.base_url);
        let num = RESULT_COUNT.to_string();

        log::debug!("GET {} q={:?} location={:?}", url, keyword, location);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("q", keyword),
                ("location", location),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            return Err(status_error(status, &body).into());
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse search response: {}", e))
        })?;

        log::debug!(
            "Received {} organic results for {:?} in {:?}",
            parsed.organic_results.len(),
            keyword,
            location
        );

        Ok(parsed.organic_results)
    }
}
