//! Reqwest-backed user-pool provider adapter.
//!
//! This adapter owns transport details only: request framing, signing of
//! privileged operations, timeout and HTTP error mapping, and JSON decoding.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::debug;

use super::dto::{ErrorBodyDto, header_exception_name};
use super::signing::{StaticCredentials, signature_headers};
use crate::domain::ports::{IdentityProvider, IdentityProviderError, ProviderOperation};

const CONTENT_TYPE_JSON_1_1: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "x-amz-target";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const THROTTLED_EXCEPTION: &str = "TooManyRequestsException";

/// Default regional endpoint for `region`.
///
/// # Errors
///
/// Returns an error when `region` does not form a valid host name.
pub fn regional_endpoint(region: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://cognito-idp.{region}.amazonaws.com/"))
}

/// Provider adapter that POSTs JSON 1.1 requests to one endpoint.
pub struct HttpIdentityProvider {
    client: Client,
    endpoint: Url,
    region: String,
    credentials: Option<StaticCredentials>,
}

impl HttpIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. Privileged operations fail until credentials are attached.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        region: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            region: region.into(),
            credentials: None,
        })
    }

    /// Attach the access-key pair used to sign privileged operations.
    #[must_use]
    pub fn with_credentials(mut self, credentials: StaticCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn signing_headers(
        &self,
        operation: ProviderOperation,
        target: &str,
        body: &[u8],
    ) -> Result<Vec<(String, String)>, IdentityProviderError> {
        if !operation.is_privileged() {
            return Ok(Vec::new());
        }
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            IdentityProviderError::invalid_request(format!(
                "{operation} requires pool credentials"
            ))
        })?;
        signature_headers(
            credentials,
            &self.region,
            self.endpoint.as_str(),
            &[
                (CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON_1_1),
                (TARGET_HEADER, target),
            ],
            body,
            SystemTime::now(),
        )
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn call(
        &self,
        operation: ProviderOperation,
        payload: Value,
    ) -> Result<Value, IdentityProviderError> {
        let target = target_header(operation);
        let body = serde_json::to_vec(&payload).map_err(|error| {
            IdentityProviderError::invalid_request(format!("unencodable payload: {error}"))
        })?;
        let signed = self.signing_headers(operation, &target, &body)?;

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_1_1)
            .header(TARGET_HEADER, target.as_str());
        for (name, value) in signed {
            request = request.header(name, value);
        }
        let response = request
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, &headers, body.as_ref());
            debug!(
                operation = %operation,
                status = status.as_u16(),
                error = %error,
                "identity provider returned failure"
            );
            return Err(error);
        }
        debug!(operation = %operation, status = status.as_u16(), "identity provider call succeeded");
        parse_body(body.as_ref())
    }
}

fn target_header(operation: ProviderOperation) -> String {
    format!("{TARGET_PREFIX}.{}", operation.wire_name())
}

fn parse_body(body: &[u8]) -> Result<Value, IdentityProviderError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid provider JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> IdentityProviderError {
    let decoded = ErrorBodyDto::parse(body);
    let name = decoded.exception_name().or_else(|| {
        headers
            .get(ERROR_TYPE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(header_exception_name)
    });
    let message = decoded
        .message
        .clone()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status_message(status, body));

    match (name, status) {
        (Some(name), _) => IdentityProviderError::rejected(name, message),
        (None, StatusCode::TOO_MANY_REQUESTS) => {
            IdentityProviderError::rejected(THROTTLED_EXCEPTION, message)
        }
        (None, StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT) => {
            IdentityProviderError::timeout(message)
        }
        (None, _) if status.is_client_error() => IdentityProviderError::invalid_request(message),
        (None, _) => IdentityProviderError::transport(message),
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let body_preview = body_preview(body);
    if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
