//! Response writing and request body draining.
//!
//! # Design Decisions
//! - Every response is `text/plain; charset=utf-8`
//! - Non-empty bodies declare their exact `Content-Length`
//! - Empty bodies carry no body at all; the transport picks the length signal
//! - Request bodies are read to the end so the connection stays reusable

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;

use crate::http::dispatch::Reply;

/// `Content-Type` sent on every response.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let body = if self.body.is_empty() {
            Body::empty()
        } else {
            Body::from(Bytes::from_static(self.body))
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        if let Some(allow) = self.allow {
            headers.insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        if !self.body.is_empty() {
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.body.len()));
        }

        response
    }
}

/// Drop a `Content-Length: 0` so an empty response carries no length signal.
///
/// Axum adds one from the body's size hint after the handler returns. With it
/// gone hyper writes `content-length: 0` itself where a length is required,
/// and sends HEAD responses with none.
pub fn defer_empty_length(mut response: Response) -> Response {
    if response
        .headers()
        .get(header::CONTENT_LENGTH)
        .is_some_and(|len| len == "0")
    {
        response.headers_mut().remove(header::CONTENT_LENGTH);
    }
    response
}

/// Read and discard a request body. Returns the number of bytes drained.
pub async fn drain_body(body: Body) -> Result<u64, axum::Error> {
    let mut stream = body.into_data_stream();
    let mut drained = 0u64;
    while let Some(chunk) = stream.next().await {
        drained += chunk?.len() as u64;
    }
    Ok(drained)
}
