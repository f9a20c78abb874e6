use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::HashMap, time::Duration};
use tracing::{debug, warn};

use super::{CHAT_PATH, ChatRequest, REPORT_PATH, RawResponse, SCAN_PATH, ScanRequest, ScanService};
use crate::{config::ServiceConfig, error::TransportError};

// best effort parsing of headers, anything invalid is ignored
fn parse_headers(headers: &HashMap<String, String>) -> HeaderMap {
    let mut parsed_headers = HeaderMap::new();

    for (key, value) in headers {
        let Ok(key) = HeaderName::try_from(key.as_str()) else {
            warn!(header = %key, "ignoring invalid header name");
            continue;
        };

        let Ok(value) = HeaderValue::try_from(value.as_str()) else {
            warn!(header = %key, "ignoring invalid header value");
            continue;
        };

        parsed_headers.insert(key, value);
    }

    parsed_headers
}

/// [`ScanService`] over HTTP.
#[derive(Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl HttpService {
    pub fn setup(config: &ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: parse_headers(&config.headers),
            timeout: config.timeout(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<RawResponse, TransportError> {
        let endpoint = self.endpoint(path);

        debug!(%endpoint, "sending request");

        let response = self
            .client
            .post(&endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(%endpoint, status, "response received");

        Ok(RawResponse { status, body })
    }
}

impl ScanService for HttpService {
    async fn scan(&self, request: &ScanRequest) -> Result<RawResponse, TransportError> {
        self.post_json(SCAN_PATH, request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<RawResponse, TransportError> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn export_report(&self) -> Result<Vec<u8>, TransportError> {
        let endpoint = self.endpoint(REPORT_PATH);

        debug!(%endpoint, "requesting report");

        let response = self
            .client
            .get(&endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(serde_json::Value::as_str)
                        .map(ToString::to_string)
                })
                .unwrap_or_else(|| format!("report export failed (HTTP {})", status.as_u16()));

            return Err(TransportError::new(message));
        }

        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }
}
