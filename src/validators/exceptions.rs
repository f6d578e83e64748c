//! XSD Model Exceptions
//!
//! Error types raised while reasoning over content models: a particle looked
//! up in a group it does not belong to, and a model nested deeper than the
//! configured maximum depth.

use std::fmt;

/// Model error when a particle is not part of a content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelError {
    /// The error message
    message: String,
    /// The group that has the error
    pub component: Option<String>,
}

impl ModelError {
    /// Create a new model error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: None,
        }
    }

    /// Create the error for a particle missing from a group
    pub fn not_a_particle(item: impl fmt::Display) -> Self {
        Self::new(format!("{} is not a particle of the model group", item))
    }

    /// Set the component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref comp) = self.component {
            write!(f, " in {}", comp)?;
        }
        Ok(())
    }
}

impl std::error::Error for ModelError {}

/// Error when maximum model recursion depth is exceeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDepthError {
    /// The group where depth was exceeded
    pub group: Option<String>,
    /// The current depth
    pub depth: usize,
    /// The maximum allowed depth
    pub max_depth: usize,
}

impl ModelDepthError {
    /// Create a new model depth error
    pub fn new(depth: usize, max_depth: usize) -> Self {
        Self {
            group: None,
            depth,
            max_depth,
        }
    }

    /// Set the group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl fmt::Display for ModelDepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "Maximum model recursion depth ({}) exceeded (at depth {})",
            self.max_depth, self.depth
        )?;
        if let Some(ref group) = self.group {
            write!(f, " while iterating {}", group)?;
        }
        Ok(())
    }
}

impl std::error::Error for ModelDepthError {}
