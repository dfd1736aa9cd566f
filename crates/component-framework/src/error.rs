//! Error types shared by the host controller, the router and the fetch layer.

use thiserror::Error;

use crate::host::Phase;

/// Errors raised while driving a component instance through its lifecycle.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host closed")]
    HostClosed,
    #[error("Host dropped response channel")]
    HostDropped,
    #[error("Invalid phase: expected {expected:?}, found {actual:?}")]
    InvalidPhase { expected: Phase, actual: Phase },
    #[error("Activation failed: {0}")]
    Activation(Box<dyn std::error::Error + Send + Sync>),
    #[error("Deactivation failed: {0}")]
    Deactivation(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors produced by an outbound data load.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None if e.is_decode() => FetchError::Decode(e.to_string()),
            None => FetchError::Network(e.to_string()),
        }
    }
}

/// A navigation path that no route entry matches.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    #[error("Route not found: {0}")]
    NotFound(String),
}

/// Structural problems detected while building a route table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteTableError {
    #[error("Root route must have path \"/\", found {0:?}")]
    InvalidRoot(String),
    #[error("Duplicate sibling path: {0}")]
    DuplicatePath(String),
}

/// Errors surfaced by [`Router`](crate::router::Router) navigation.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Host(#[from] HostError),
}
