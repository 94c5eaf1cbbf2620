//! Error types for route manifest configuration and output.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors raised while configuring or writing a route manifest.
///
/// Classification misses are not errors: files the route or asset rules do not
/// recognize are silently left out of the manifest.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    /// No route classification rule was supplied.
    #[error("A \"routes\" mapping is required")]
    #[diagnostic(
        code(fob::route_manifest::missing_routes),
        help("Provide `routes` as a file -> pattern mapping or as a function")
    )]
    MissingRoutes,

    /// Configuration could not be extracted from file or environment sources.
    #[error("invalid route manifest configuration: {message}")]
    #[diagnostic(
        code(fob::route_manifest::config),
        help("Check the manifest config file syntax and field types")
    )]
    Config { message: String },

    /// The manifest could not be serialized.
    #[error("failed to serialize route manifest: {0}")]
    #[diagnostic(code(fob::route_manifest::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl ManifestError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
