//! reqwest-backed transport for the submission endpoint.

use std::time::Duration;

use reqwest::Client;
use reqwest::header;
use url::Url;
use uuid::Uuid;

use super::{RawResponse, SubmitTransport};
use crate::error::{Result, SupportError};
use crate::ticket::WirePayload;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// POSTs multipart tickets to a single configured endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    accept_json: bool,
}

impl HttpTransport {
    /// Create a transport for `endpoint`.
    ///
    /// `timeout` of `None` leaves reqwest's defaults in place.
    pub fn new(endpoint: Url, timeout: Option<Duration>, accept_json: bool) -> Result<Self> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SupportError::Config(format!(
                "endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            accept_json,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SubmitTransport for HttpTransport {
    fn send(
        &self,
        payload: WirePayload,
        idempotency_key: Uuid,
    ) -> impl std::future::Future<Output = Result<RawResponse>> + Send {
        async move {
            let form = payload.into_multipart()?;

            let mut request = self
                .client
                .post(self.endpoint.clone())
                .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
                .multipart(form);
            if self.accept_json {
                request = request.header(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/json"),
                );
            }

            let response = request.send().await?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await?;

            tracing::debug!(status, content_type = ?content_type, "endpoint responded");

            Ok(RawResponse {
                status,
                content_type,
                body,
            })
        }
    }
}
