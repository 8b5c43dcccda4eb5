//! Axum extractors for the merchant's response-callback endpoint

use crate::error::HppHttpError;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use hpp_core::HppResponse;

/// Axum extractor for the JSON the payment page posts back to the
/// merchant's callback endpoint.
///
/// The extracted response is still transport-encoded and unverified. The
/// handler must run [`crate::decode_and_verify_response`] with the shared
/// secret before trusting any field — keeping that step explicit means a
/// signature failure cannot be skipped by accident.
///
/// # Example
///
/// ```ignore
/// use axum::{routing::post, Router};
/// use hpp_http::{decode_and_verify_response, HppResponseExtractor};
/// use hpp_canonical::Charset;
///
/// async fn callback(
///     HppResponseExtractor(mut response): HppResponseExtractor,
/// ) -> Result<(), hpp_http::HppHttpError> {
///     decode_and_verify_response(&mut response, "mysecret", Charset::Utf8)?;
///     // response fields are now plain and trustworthy
///     Ok(())
/// }
///
/// let app = Router::new().route("/hpp/callback", post(callback));
/// ```
pub struct HppResponseExtractor(pub HppResponse);

#[async_trait]
impl<S> FromRequest<S> for HppResponseExtractor
where
    S: Send + Sync,
{
    type Rejection = HppHttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(response) = Json::<HppResponse>::from_request(req, state)
            .await
            .map_err(|e| HppHttpError::ParseError(e.to_string()))?;

        Ok(HppResponseExtractor(response))
    }
}
