//! Top-level diagnostic error type for the dashboard.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives next to the code it describes. This module stitches them together
//! so the binary can return one type while preserving the full diagnostic
//! chain (error codes, help text, sources) through to the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::config::ConfigError;
use crate::pages::PageError;
use crate::paths::LocateError;
use crate::server::ServerError;

/// Top-level error type for temascope.
///
/// Each variant wraps a subsystem-specific error transparently, so the
/// diagnostic the user sees is always the specific one.
#[derive(Debug, Error, Diagnostic)]
pub enum TemascopeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Server(#[from] ServerError),
}

/// Convenience alias for functions returning temascope results.
pub type TemascopeResult<T> = std::result::Result<T, TemascopeError>;
