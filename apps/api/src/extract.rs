//! Request extractors that reject with `AppError` so every failure carries the
//! JSON error body clients expect.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
};
use serde_json::{Map, Value};

use crate::errors::AppError;

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// A request body parsed as untyped JSON.
///
/// Field presence and type checks happen in the handlers, in a fixed order,
/// so the body is not deserialized into a struct here. An empty body is an
/// empty object; the content type is not checked.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {e}")))
}
