//! Reqwest-based client for posting requests to the hosted payment page

use crate::codec::request_to_json;
use crate::error::HppHttpError;
use hpp_canonical::Charset;
use hpp_core::HppRequest;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Sandbox endpoint; production URLs are account-specific.
pub const SANDBOX_URL: &str = "https://pay.sandbox.realexpayments.com/pay";

/// HTTP client for server-initiated HPP exchanges.
///
/// Prepares the request through the full outbound pipeline (validate,
/// default, sign, encode) and posts the resulting JSON. No retry or backoff
/// happens at this layer.
///
/// # Example
///
/// ```ignore
/// use hpp_http::HppClient;
/// use hpp_canonical::Charset;
/// use hpp_core::HppRequest;
///
/// let client = HppClient::new("https://pay.example.com/pay");
///
/// let request = HppRequest { /* ... */ };
/// let body = client.send(request, "mysecret", Charset::Utf8).await?;
/// ```
pub struct HppClient {
    client: Client,
    hpp_url: String,
}

impl HppClient {
    /// Create a new client posting to the given HPP endpoint URL.
    pub fn new(hpp_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(65))
                .build()
                .unwrap(),
            hpp_url: hpp_url.into(),
        }
    }

    /// Create a client with custom reqwest settings.
    pub fn with_client(client: Client, hpp_url: impl Into<String>) -> Self {
        Self {
            client,
            hpp_url: hpp_url.into(),
        }
    }

    /// Get the endpoint URL.
    pub fn hpp_url(&self) -> &str {
        &self.hpp_url
    }

    /// Prepare and post a request, returning the raw response body.
    ///
    /// The request is consumed: signing and encoding mutate it, and a
    /// signed field set must not be reused for another transmission
    /// attempt.
    pub async fn send(
        &self,
        mut request: HppRequest,
        secret: &str,
        charset: Charset,
    ) -> Result<String, HppHttpError> {
        let body = request_to_json(&mut request, secret, charset)?;

        let response = self
            .client
            .post(&self.hpp_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Ok(response.text().await?)
    }
}

impl Default for HppClient {
    fn default() -> Self {
        Self::new(SANDBOX_URL)
    }
}
