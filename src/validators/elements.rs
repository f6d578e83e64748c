//! XSD Element particles
//!
//! Element declarations seen as leaf particles of a content model: a
//! qualified name, occurrence bounds and an optional substitution group head.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#cElement_Declarations

use std::any::Any;
use std::fmt;

use crate::namespaces::QName;

use super::particles::{LeafParticle, Occurs, Particle};

/// XSD element declaration used as a particle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdElement {
    /// Element name
    pub name: QName,
    /// Occurrence constraints
    occurs: Occurs,
    /// Head of the substitution group this element belongs to
    pub substitution_group: Option<QName>,
}

impl XsdElement {
    /// Create a new element particle
    pub fn new(name: QName, occurs: Occurs) -> Self {
        Self {
            name,
            occurs,
            substitution_group: None,
        }
    }

    /// Set the substitution group head
    pub fn with_substitution_group(mut self, head: QName) -> Self {
        self.substitution_group = Some(head);
        self
    }

    /// Set the occurrence constraints
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Check if one of the two elements is the substitution group head of the other
    fn is_substitution_related(&self, other: &XsdElement) -> bool {
        other.substitution_group.as_ref() == Some(&self.name)
            || self.substitution_group.as_ref() == Some(&other.name)
    }
}

impl Particle for XsdElement {
    fn occurs(&self) -> Occurs {
        self.occurs
    }
}

impl LeafParticle for XsdElement {
    fn name(&self) -> Option<&QName> {
        Some(&self.name)
    }

    fn is_matching(&self, name: &str, default_namespace: Option<&str>) -> bool {
        if name.is_empty() {
            return false;
        }

        match (name.starts_with('{'), default_namespace) {
            (false, Some(ns)) => {
                self.name.namespace_uri() == ns && self.name.local_name == name
            }
            _ => QName::from_clark(name).is_some_and(|qname| qname == self.name),
        }
    }

    fn is_overlap(&self, other: &dyn LeafParticle) -> bool {
        match other.name() {
            Some(name) if *name == self.name => true,
            Some(_) => other
                .as_any()
                .downcast_ref::<XsdElement>()
                .is_some_and(|element| self.is_substitution_related(element)),
            None => other.is_matching(&self.name.to_string(), None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for XsdElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XsdElement(name='{}', occurs={})", self.name, self.occurs)
    }
}
