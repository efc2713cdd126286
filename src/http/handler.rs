//! The request dispatcher.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::http::dispatch::{request_target, route};
use crate::http::response::drain_body;
use crate::observability::{ExchangeContext, ExchangeError, SharedDiagnostics};

/// Produces exactly one response per request and always drains the request body.
///
/// Holds no per-request state; clones share the diagnostics sink.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    diagnostics: SharedDiagnostics,
}

impl Dispatcher {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        Self { diagnostics }
    }

    pub async fn handle(&self, request: Request<Body>) -> Response {
        let (parts, body) = request.into_parts();
        let target = request_target(&parts.uri);
        let reply = route(&target, &parts.method);

        // A drain failure is reported but never changes the reply.
        match drain_body(body).await {
            Ok(drained) => {
                tracing::trace!(bytes = drained, "Request body drained");
            }
            Err(e) => {
                self.diagnostics
                    .exchange_failed(ExchangeContext::Handler, &ExchangeError::BodyDrain(e));
            }
        }

        tracing::debug!(
            method = %parts.method,
            target = %target,
            status = reply.status.as_u16(),
            "Dispatched"
        );

        reply.into_response()
    }
}

/// Axum handler wrapping [`Dispatcher::handle`].
pub async fn dispatch(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    dispatcher.handle(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::diagnostics::RecordingDiagnostics;
    use axum::body::Bytes;
    use axum::http::{header, Method, StatusCode};
    use std::sync::Arc;

    fn request(method: Method, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn get_root_with_clean_body() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let dispatcher = Dispatcher::new(diagnostics.clone());

        let response = dispatcher
            .handle(request(Method::GET, "/", Body::from("ignored")))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "Hello World\n");
        assert!(diagnostics.reports().is_empty());
    }

    #[tokio::test]
    async fn drain_failure_reported_and_reply_kept() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let dispatcher = Dispatcher::new(diagnostics.clone());

        let chunks = futures_util::stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated body",
            )),
        ]);
        let response = dispatcher
            .handle(request(Method::PUT, "/", Body::from_stream(chunks)))
            .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, OPTIONS");

        let reports = diagnostics.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, ExchangeContext::Handler);
        assert!(reports[0].1.starts_with("Failed to read request body"));
        assert!(reports[0].1.contains("truncated body"));
    }

    #[tokio::test]
    async fn query_string_misses_root() {
        let dispatcher = Dispatcher::new(Arc::new(RecordingDiagnostics::new()));
        let response = dispatcher
            .handle(request(Method::GET, "/?q=1", Body::empty()))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
