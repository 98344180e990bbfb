//! Error types for the todo sync core.
//!
//! # Design
//! `ApiError` covers everything that can go wrong between sending a request
//! and holding a parsed entity: transport failure, a non-2xx status, or a body
//! that does not match the schema. `NotFound` gets a dedicated variant because
//! callers distinguish "the todo is gone" from "the server misbehaved".
//!
//! `ValidationError` never reaches the network layer. `ActionError` is what
//! controller operations return and wraps one or the other.

/// Errors produced by the remote side of an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Input rejected locally before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be blank")]
    BlankTitle,
}

/// Failure of a single controller action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Invalid or unparsable client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
