use thiserror::Error;

/// Errors produced while parsing version or range strings.
///
/// A failed parse is fatal to the request that carried the string; it never
/// affects registry state and must never crash the interception host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid version: {0:?}")]
    Version(String),

    #[error("invalid range operator: {0:?}")]
    Operator(String),
}
