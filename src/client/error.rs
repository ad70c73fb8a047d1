// File: src/client/error.rs
use thiserror::Error;

/// Why a species search did not produce a `PlantList`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Missing API key or an endpoint that cannot be turned into a request URI.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The transport call did not complete.
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The body was not JSON or did not have the expected shape.
    #[error("could not read the server response: {0}")]
    Decode(String),
}

impl SearchError {
    pub(crate) fn network(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Network(describe(err))
    }
}

// hyper's top-level errors are terse ("client error (Connect)"), the cause is in the chain
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.contains(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
