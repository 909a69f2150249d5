//! Error types and handling module.
//!
//! Every failure is surfaced to the immediate caller with structured context.
//! Nothing in the library retries or recovers locally.

use thiserror::Error;

/// Boxed underlying error carried by remote failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Kind of contract interface member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A callable function.
    Function,
    /// An emittable event.
    Event,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Function => f.write_str("function"),
            MemberKind::Event => f.write_str("event"),
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The endpoint was unreachable or returned a malformed network descriptor.
    #[error("Connection error ({endpoint}): {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// An operation was attempted before the required setup.
    #[error("{component} not initialized")]
    NotInitialized { component: &'static str },

    /// A write or address-dependent operation without a signing identity.
    #[error("No signing identity configured; provide a private key for write operations")]
    NoSigningIdentity,

    /// Failure surfaced by a remote call, including reverted transactions.
    #[error("Remote call {contract}.{method}({}) failed: {source}", .args.join(", "))]
    RemoteCall {
        contract: String,
        method: String,
        args: Vec<String>,
        #[source]
        source: BoxError,
    },

    /// Name not present in the contract's interface description.
    #[error("Unknown {kind} `{name}` in {contract} interface")]
    UnknownMember { contract: String, kind: MemberKind, name: String },

    /// Return value did not have the declared shape.
    #[error("Unexpected return value from {method}: expected {expected}")]
    Decode { method: String, expected: &'static str },

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Interface description could not be read or applied.
    #[error("ABI error: {0}")]
    Abi(String),
}

impl AppError {
    /// Build a remote call error from any underlying failure.
    pub fn remote_call(
        contract: &str,
        method: &str,
        args: Vec<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        AppError::RemoteCall {
            contract: contract.to_string(),
            method: method.to_string(),
            args,
            source: source.into(),
        }
    }

    /// Build a connection error for `endpoint`.
    pub fn connection(endpoint: &str, source: impl Into<BoxError>) -> Self {
        AppError::Connection { endpoint: endpoint.to_string(), source: source.into() }
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Abi(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
