use std::path::PathBuf;

use thiserror::Error;

use crate::builders::BuilderState;
use crate::units::Dimension;

/// Top-level error type for the detector geometry builders.
#[derive(Debug, Error)]
pub enum PdvdError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Errors raised while reading or validating builder parameters.
///
/// These are always reported before any shape is registered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),

    #[error("parameter `{parameter}` expects a {expected}, got a {found}")]
    WrongDimension {
        parameter: &'static str,
        expected: Dimension,
        found: Dimension,
    },

    #[error("parameter `{parameter}` = {value} is invalid: {reason}")]
    Invalid {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("cannot parse quantity `{0}`")]
    Parse(String),

    #[error("cannot read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors related to shape construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate shape `{name}`: {reason}")]
    Degenerate { name: String, reason: &'static str },

    #[error("boolean shape `{0}` has no operands")]
    EmptyBoolean(String),
}

/// Errors reported by the geometry store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} `{name}` is already registered")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} not found: {name}")]
    EntityNotFound { kind: &'static str, name: String },
}

/// Errors related to the builder life cycle.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("builder `{builder}` cannot {action} while {state}")]
    InvalidTransition {
        builder: String,
        state: BuilderState,
        action: &'static str,
    },

    #[error("builder `{builder}` is missing its {dependency}")]
    MissingDependency {
        builder: String,
        dependency: &'static str,
    },
}

/// Convenience type alias for results using [`PdvdError`].
pub type Result<T> = std::result::Result<T, PdvdError>;
