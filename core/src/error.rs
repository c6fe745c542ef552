//! Error types for the Wazzup connector.
//!
//! # Design
//! Errors are layered the way a call flows through the crate. URL
//! construction fails with `ConfigError`, transports fail with
//! `TransportError`, and everything a facade operation can hit is folded into
//! `ErrorKind`. The facade wraps that kind in `ApiError` together with the
//! `Operation` that produced it, so the rendered message always starts with a
//! prefix naming the failed call.
//!
//! An `IsSuccess=false` envelope is still a fully decoded response. It rides
//! along inside `ErrorKind::Envelope` so callers can read `error_message` (or
//! anything else the remote sent) from the error itself.

use std::fmt;

use thiserror::Error;

use crate::types::Response;

/// Errors raised while resolving a service or composing a request URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The service name is not part of the catalog.
    #[error("'{0}' is not a valid service")]
    UnknownService(String),

    /// The connector was asked to call out with an empty token.
    #[error("no token supplied")]
    MissingToken,

    /// A configuration value could not be interpreted.
    #[error("invalid value for {key}: '{value}'")]
    InvalidSetting { key: &'static str, value: String },
}

/// Adapter-level failure: network, DNS, TLS, timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("fetch error: {0}")]
    Request(String),
}

/// Everything that can go wrong between building a URL and handing back a
/// decoded `Response`.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote answered with a status above 299. The body is discarded.
    #[error("call error, status {0}")]
    Status(u16),

    /// The body was not a well-formed envelope or a field failed to parse.
    #[error("decode error: {0}")]
    Decode(String),

    /// A well-formed envelope carrying `IsSuccess=false`.
    #[error("{message}")]
    Envelope {
        message: String,
        response: Box<Response>,
    },
}

/// Facade operation that produced an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetContracts,
    ActivateContract,
    GetPropertySummary,
    GetProperty,
}

impl Operation {
    /// Message prefix used when rendering a failure of this operation.
    pub fn prefix(self) -> &'static str {
        match self {
            Operation::GetContracts => "could not fetch contracts",
            Operation::ActivateContract => "could not activate contract",
            Operation::GetPropertySummary => "could not fetch summary",
            Operation::GetProperty => "could not fetch property details",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Error returned by every `Connector` operation.
///
/// `kind` is part of the message and is not reported again as `source()`.
#[derive(Debug, Error)]
#[error("{operation}: {kind}")]
pub struct ApiError {
    pub operation: Operation,
    pub kind: ErrorKind,
}

impl ApiError {
    pub fn new(operation: Operation, kind: impl Into<ErrorKind>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    /// The decoded envelope, when the remote reported `IsSuccess=false`.
    pub fn response(&self) -> Option<&Response> {
        match &self.kind {
            ErrorKind::Envelope { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Take ownership of the decoded envelope, if there is one.
    pub fn into_response(self) -> Option<Response> {
        match self.kind {
            ErrorKind::Envelope { response, .. } => Some(*response),
            _ => None,
        }
    }

    /// HTTP status for `ErrorKind::Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Status(status) => Some(status),
            _ => None,
        }
    }
}
