// API client module: a small blocking HTTP client that posts the cover
// fields to the KTH cover generator and hands back the raw response.
// One request, no retries; every failure comes back as a `CoverError`.

use crate::config::{CoverParams, RequestConfig};
use crate::error::CoverError;
use reqwest::blocking::{multipart, Client, ClientBuilder};
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::{debug, info};

/// Longest slice of an error body kept in `CoverError::Status`.
const ERROR_BODY_LIMIT: usize = 512;

/// Blocking client bound to one request configuration.
#[derive(Clone)]
pub struct CoverClient {
    client: Client,
    config: RequestConfig,
}

/// What the generator sent back.
#[derive(Debug, Clone)]
pub struct CoverResponse {
    pub status: StatusCode,
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CoverResponse {
    /// Whether the body carries a PDF signature.
    pub fn is_pdf(&self) -> bool {
        self.body.starts_with(b"%PDF-")
    }
}

impl CoverClient {
    /// Build a client from the request configuration.
    pub fn new(config: RequestConfig) -> Result<Self, CoverError> {
        let client = Self::client_builder(&config)
            .build()
            .map_err(|e| CoverError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(CoverClient { client, config })
    }

    /// Client settings for a cover request: the configured timeout, and
    /// no redirects, so a 3xx from the generator surfaces as a status error.
    pub fn client_builder(config: &RequestConfig) -> ClientBuilder {
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    /// Use an already configured `reqwest` client.
    pub fn with_client(client: Client, config: RequestConfig) -> Self {
        CoverClient { client, config }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// POST the cover fields as multipart/form-data and return the raw
    /// response. A non-2xx status is an error and its body is not returned.
    pub fn request_cover(&self, params: &CoverParams) -> Result<CoverResponse, CoverError> {
        let headers = self.config.headers()?;
        let form = params
            .fields()
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| form.text(name, value));

        info!(endpoint = %self.config.endpoint, "requesting cover");
        let res = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .multipart(form)
            .send()
            .map_err(CoverError::from_transport)?;

        let status = res.status();
        debug!(%status, "cover generator responded");
        if !status.is_success() {
            let body = res.bytes().map(|b| excerpt(&b)).unwrap_or_default();
            return Err(CoverError::Status { status, body });
        }

        let content_disposition = header_string(&res, CONTENT_DISPOSITION);
        let content_type = header_string(&res, CONTENT_TYPE);
        let body = res.bytes().map_err(CoverError::from_transport)?.to_vec();

        Ok(CoverResponse {
            status,
            content_disposition,
            content_type,
            body,
        })
    }
}

fn header_string(res: &reqwest::blocking::Response, name: HeaderName) -> Option<String> {
    res.headers()
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(&body[..body.len().min(ERROR_BODY_LIMIT)]);
    text.trim().to_string()
}
