//! Top-level error for the sample application.

use component_framework::{FetchError, RouteTableError, RouterError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteTableError),
    #[error("HTTP client setup failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Router(#[from] RouterError),
}
