//! Methods the root resource distinguishes.

use axum::http::Method;

/// Value of the `Allow` header for the root resource.
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Request methods as the root resource sees them.
///
/// Everything other than GET, HEAD and OPTIONS collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootMethod {
    Get,
    Head,
    Options,
    Other,
}

impl From<&Method> for RootMethod {
    fn from(method: &Method) -> Self {
        if *method == Method::GET {
            RootMethod::Get
        } else if *method == Method::HEAD {
            RootMethod::Head
        } else if *method == Method::OPTIONS {
            RootMethod::Options
        } else {
            RootMethod::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_methods() {
        assert_eq!(RootMethod::from(&Method::GET), RootMethod::Get);
        assert_eq!(RootMethod::from(&Method::HEAD), RootMethod::Head);
        assert_eq!(RootMethod::from(&Method::OPTIONS), RootMethod::Options);
    }

    #[test]
    fn everything_else_is_other() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH, Method::TRACE] {
            assert_eq!(RootMethod::from(&method), RootMethod::Other);
        }

        // Method tokens are case-sensitive.
        let lowercase = Method::from_bytes(b"get").unwrap();
        assert_eq!(RootMethod::from(&lowercase), RootMethod::Other);
    }
}
