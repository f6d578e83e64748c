//! XML Schema content particles
//!
//! This module contains the particle core of content models: occurrence
//! bounds, element and wildcard leaves, model groups and the traversal
//! queries over a tree of groups.

pub mod elements;
pub mod exceptions;
pub mod groups;
pub mod models;
pub mod particles;
pub mod wildcards;

// Re-exports
pub use elements::XsdElement;
pub use exceptions::{ModelDepthError, ModelError};
pub use groups::{GroupParticle, ModelGroup, ModelType};
pub use models::{ElementsIter, ModelIter};
pub use particles::{
    parse_occurs, parse_occurs_lax, parse_particle_attributes, LeafParticle, Occurs, Particle,
};
pub use wildcards::{NamespaceConstraint, XsdAnyElement};
