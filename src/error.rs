//! Error types for xmlschema-particles
//!
//! This module defines the error taxonomy of the particle core: malformed
//! occurrence bounds or compositors at build time, membership failures of
//! path lookups and model depth overruns. Every error is deterministic for
//! a given tree and depth limit.

use std::fmt;
use thiserror::Error;

use crate::validators::exceptions::{ModelDepthError, ModelError};

/// Result type alias using the crate Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for particle operations
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Malformed minOccurs/maxOccurs values
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Value error (e.g. invalid compositor token)
    #[error("value error: {0}")]
    Value(String),

    /// A particle is not part of the model group
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Model nesting exceeds the configured maximum depth
    #[error("model depth error: {0}")]
    ModelDepth(#[from] ModelDepthError),

    /// XML source error
    #[error("XML error: {0}")]
    Xml(String),

    /// Encoding error (model dump to JSON)
    #[error("encoding error: {0}")]
    Encode(String),

    /// Decoding error (JSON to model dump)
    #[error("decoding error: {0}")]
    Decode(String),
}

impl Error {
    /// Returns `true` for errors raised by the model depth guard.
    pub fn is_depth_exceeded(&self) -> bool {
        matches!(self, Error::ModelDepth(_))
    }

    /// Returns `true` for membership errors of path lookups.
    pub fn is_not_a_member(&self) -> bool {
        matches!(self, Error::Model(_))
    }
}

/// Error building a particle from its source values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Location in the schema source
    pub location: Option<String>,
    /// Schema source that caused the error
    pub source: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            source: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        if let Some(ref src) = self.source {
            write!(f, "\n\nSource:\n{}", src)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
