//! # xmlschema-particles
//!
//! Occurrence and model-group algebra for XML Schema (XSD 1.0 and XSD 1.1)
//! content particles.
//!
//! A content model is a tree of model groups (`sequence`, `choice`, `all`)
//! whose leaves are element declarations and wildcards. Every particle
//! carries occurrence bounds, and this library answers the questions a
//! schema processor asks about them.
//!
//! ## Features
//!
//! - Occurrence bounds with restriction checks (`minOccurs`/`maxOccurs`)
//! - Emptiability, singleness and effective occurs of nested groups
//! - Lazy traversal with pointless groups flattened out
//! - Overall occurs of a particle within the whole model
//! - Protection against deeply nested models
//! - JSON dumps of content models for comparison testing
//!
//! ## Example
//!
//! ```rust
//! use xmlschema_particles::namespaces::QName;
//! use xmlschema_particles::validators::{ModelGroup, ModelType, Occurs, Particle};
//!
//! let mut group = ModelGroup::new(ModelType::Choice);
//! group.add_element(QName::local("a"), Occurs::optional());
//! group.add_element(QName::local("b"), Occurs::once());
//!
//! assert!(group.is_emptiable());
//! assert_eq!(group.effective_min_occurs()?, 0);
//! assert_eq!(group.effective_max_occurs()?, Some(1));
//! # Ok::<(), xmlschema_particles::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod error;
pub mod limits;
pub mod namespaces;

// Particles and content models
pub mod validators;

// Testing support
pub mod comparison;

// Re-exports for convenience
pub use error::{Error, Result};
pub use limits::Limits;
pub use validators::{GroupParticle, ModelGroup, ModelType, Occurs, Particle};

/// Version of the xmlschema-particles library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_1_0_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XSD 1.1 namespace
pub const XSD_1_1_NAMESPACE: &str = "http://www.w3.org/2009/XMLSchema";
