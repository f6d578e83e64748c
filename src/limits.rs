//! Limits and constraints for content model processing
//!
//! Deeply nested model groups, crafted or accidental, are bounded by a
//! maximum model depth. The limit is configurable process-wide or per call.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;
use crate::validators::exceptions::ModelDepthError;

/// Default maximum nesting depth of model groups
pub const DEFAULT_MAX_MODEL_DEPTH: usize = 15;

static MAX_MODEL_DEPTH: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_MODEL_DEPTH);

/// Get the process-wide maximum model depth
pub fn max_model_depth() -> usize {
    MAX_MODEL_DEPTH.load(Ordering::Relaxed)
}

/// Set the process-wide maximum model depth, returning the previous value
pub fn set_max_model_depth(depth: usize) -> usize {
    MAX_MODEL_DEPTH.swap(depth, Ordering::Relaxed)
}

/// Limits configuration for a single operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of model groups
    pub max_model_depth: usize,
}

impl Default for Limits {
    /// Limits taken from the process-wide settings
    fn default() -> Self {
        Self {
            max_model_depth: max_model_depth(),
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self { max_model_depth: 8 }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self { max_model_depth: 1000 }
    }

    /// Set the maximum model depth
    pub fn with_max_model_depth(mut self, depth: usize) -> Self {
        self.max_model_depth = depth;
        self
    }

    /// Check if model depth is within limits
    pub fn check_model_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_model_depth {
            tracing::debug!(depth, max_depth = self.max_model_depth, "model depth exceeded");
            Err(ModelDepthError::new(depth, self.max_model_depth).into())
        } else {
            Ok(())
        }
    }
}
