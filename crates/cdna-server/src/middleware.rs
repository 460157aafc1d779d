//! Request correlation for the scanner API.
//!
//! Every request carries an `x-request-id`: a caller-supplied value is kept,
//! otherwise a `UUIDv4` is minted. The id is echoed on the response and
//! reaches handlers through the [`RequestId`] extractor, which stamps it into
//! each envelope's `meta`.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId as HeaderRequestId, SetRequestIdLayer,
};
use uuid::Uuid;

/// Correlation id of the current request, as a plain string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<HeaderRequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);
        Ok(Self(id))
    }
}

type RequestIdLayers =
    Stack<PropagateRequestIdLayer, Stack<SetRequestIdLayer<MakeRequestUuid>, Identity>>;

/// Assign (or keep) `x-request-id` on the way in and copy it to the response.
pub fn request_id_layers() -> ServiceBuilder<RequestIdLayers> {
    ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
}
