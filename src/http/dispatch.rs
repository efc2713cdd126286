//! Request classification.
//!
//! `route` is a pure function from request target and method to a [`Reply`].
//! It touches no I/O, so the whole routing table is testable without a socket.

use std::borrow::Cow;

use axum::http::{Method, StatusCode, Uri};

use crate::http::method::{RootMethod, ALLOWED_METHODS};

/// The only path served.
pub const ROOT_PATH: &str = "/";

/// Body returned for `GET /`.
pub const GREETING: &[u8] = b"Hello World\n";

/// What to send back for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    /// Value for an `Allow` header, if one is sent.
    pub allow: Option<&'static str>,
    /// Response body. Empty means no body at all.
    pub body: &'static [u8],
}

impl Reply {
    const fn empty(status: StatusCode) -> Self {
        Self {
            status,
            allow: None,
            body: &[],
        }
    }

    const fn with_allow(mut self) -> Self {
        self.allow = Some(ALLOWED_METHODS);
        self
    }
}

/// The request target as sent, compared verbatim against [`ROOT_PATH`].
///
/// Origin-form keeps its query; absolute-form and authority-form keep their
/// scheme and host, so `http://host/` is not the root.
pub fn request_target(uri: &Uri) -> Cow<'_, str> {
    match uri.path_and_query() {
        Some(pq) if uri.scheme().is_none() && uri.authority().is_none() => {
            Cow::Borrowed(pq.as_str())
        }
        _ => Cow::Owned(uri.to_string()),
    }
}

/// Decide the reply for a request target and method.
pub fn route(target: &str, method: &Method) -> Reply {
    if target != ROOT_PATH {
        return Reply::empty(StatusCode::NOT_FOUND);
    }

    match RootMethod::from(method) {
        RootMethod::Get => Reply {
            status: StatusCode::OK,
            allow: None,
            body: GREETING,
        },
        RootMethod::Head => Reply::empty(StatusCode::OK),
        RootMethod::Options => Reply::empty(StatusCode::OK).with_allow(),
        RootMethod::Other => Reply::empty(StatusCode::METHOD_NOT_ALLOWED).with_allow(),
    }
}
