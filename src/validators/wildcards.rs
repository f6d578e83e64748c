//! XSD Wildcard particles
//!
//! This module implements xs:any seen as a leaf particle of a content model.
//! A wildcard matches names by namespace only.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Wildcards

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ParseError;
use crate::namespaces::QName;

use super::particles::{LeafParticle, Occurs, Particle};

/// Namespace constraint for wildcards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceConstraint {
    /// Any namespace is allowed (##any)
    #[default]
    Any,
    /// Any namespace except target namespace and no namespace (##other)
    Other {
        /// The target namespace to exclude
        target_namespace: Option<String>,
    },
    /// Specific set of allowed namespaces, "" standing for no namespace
    Enumeration(BTreeSet<String>),
    /// XSD 1.1: Set of disallowed namespaces (notNamespace)
    Not(BTreeSet<String>),
}

fn parse_namespace_list(
    value: &str,
    attribute: &str,
    target_namespace: Option<&str>,
) -> Result<BTreeSet<String>, ParseError> {
    let mut namespaces = BTreeSet::new();
    for ns in value.split_whitespace() {
        match ns {
            "##local" => {
                namespaces.insert(String::new());
            }
            "##targetNamespace" => {
                namespaces.insert(target_namespace.unwrap_or("").to_string());
            }
            s if s.starts_with("##") => {
                return Err(ParseError::new(format!(
                    "wrong value '{}' in '{}' attribute",
                    s, attribute
                )));
            }
            uri => {
                namespaces.insert(uri.to_string());
            }
        }
    }
    Ok(namespaces)
}

impl NamespaceConstraint {
    /// Create from namespace attribute value
    pub fn from_namespace_attr(
        value: &str,
        target_namespace: Option<&str>,
    ) -> Result<Self, ParseError> {
        match value.trim() {
            "##any" => Ok(Self::Any),
            "##other" => Ok(Self::Other {
                target_namespace: target_namespace.map(String::from),
            }),
            value => Ok(Self::Enumeration(parse_namespace_list(
                value,
                "namespace",
                target_namespace,
            )?)),
        }
    }

    /// Create from notNamespace attribute (XSD 1.1)
    pub fn from_not_namespace_attr(
        value: &str,
        target_namespace: Option<&str>,
    ) -> Result<Self, ParseError> {
        Ok(Self::Not(parse_namespace_list(
            value,
            "notNamespace",
            target_namespace,
        )?))
    }

    /// Check if a namespace is allowed by this constraint
    pub fn is_allowed(&self, namespace: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Other { target_namespace } => {
                !namespace.is_empty() && target_namespace.as_deref() != Some(namespace)
            }
            Self::Enumeration(set) => set.contains(namespace),
            Self::Not(set) => !set.contains(namespace),
        }
    }

    /// Check if some namespace is allowed by both constraints
    pub fn is_overlap(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Enumeration(set), other) | (other, Self::Enumeration(set)) => {
                set.iter().any(|ns| other.is_allowed(ns))
            }
            // Both admit all but finitely many namespaces
            _ => true,
        }
    }
}

/// XSD any element wildcard (xs:any)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdAnyElement {
    /// Namespace constraint
    pub namespace: NamespaceConstraint,
    /// Occurrence constraints
    occurs: Occurs,
}

impl XsdAnyElement {
    /// Create a new any element wildcard
    pub fn new(namespace: NamespaceConstraint, occurs: Occurs) -> Self {
        Self { namespace, occurs }
    }

    /// Create a wildcard that allows any element (##any)
    pub fn any() -> Self {
        Self::new(NamespaceConstraint::Any, Occurs::zero_or_more())
    }

    /// Check if a namespace is allowed
    pub fn is_namespace_allowed(&self, namespace: &str) -> bool {
        self.namespace.is_allowed(namespace)
    }
}

impl Particle for XsdAnyElement {
    fn occurs(&self) -> Occurs {
        self.occurs
    }
}

impl LeafParticle for XsdAnyElement {
    fn name(&self) -> Option<&QName> {
        None
    }

    fn is_matching(&self, name: &str, default_namespace: Option<&str>) -> bool {
        if name.is_empty() {
            return false;
        }

        let namespace = if name.starts_with('{') {
            match QName::from_clark(name) {
                Some(qname) => qname.namespace.unwrap_or_default(),
                None => return false,
            }
        } else {
            default_namespace.unwrap_or("").to_string()
        };

        self.is_namespace_allowed(&namespace)
    }

    fn is_overlap(&self, other: &dyn LeafParticle) -> bool {
        if let Some(name) = other.name() {
            return self.is_namespace_allowed(name.namespace_uri());
        }
        other
            .as_any()
            .downcast_ref::<XsdAnyElement>()
            .is_some_and(|any| self.namespace.is_overlap(&any.namespace))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for XsdAnyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XsdAnyElement(occurs={})", self.occurs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::elements::XsdElement;

    const NS: &str = "http://example.com/ns";

    #[test]
    fn test_namespace_constraint_parsing() {
        assert_eq!(
            NamespaceConstraint::from_namespace_attr("##any", Some(NS)).unwrap(),
            NamespaceConstraint::Any
        );

        let constraint =
            NamespaceConstraint::from_namespace_attr("##local ##targetNamespace urn:x", Some(NS))
                .unwrap();
        assert!(constraint.is_allowed(""));
        assert!(constraint.is_allowed(NS));
        assert!(constraint.is_allowed("urn:x"));
        assert!(!constraint.is_allowed("urn:y"));

        assert!(NamespaceConstraint::from_namespace_attr("##bogus", None).is_err());
        assert!(NamespaceConstraint::from_not_namespace_attr("##other", None).is_err());
    }

    #[test]
    fn test_other_constraint() {
        let other = NamespaceConstraint::from_namespace_attr("##other", Some(NS)).unwrap();
        assert!(!other.is_allowed(""));
        assert!(!other.is_allowed(NS));
        assert!(other.is_allowed("urn:x"));
    }

    #[test]
    fn test_is_matching() {
        let any = XsdAnyElement::any();
        assert!(any.is_matching("a", None));
        assert!(any.is_matching(&format!("{{{}}}a", NS), None));
        assert!(!any.is_matching("", None));
        assert!(any.is_emptiable());
        assert!(any.is_multiple());

        let not_ns = XsdAnyElement::new(
            NamespaceConstraint::from_not_namespace_attr(NS, None).unwrap(),
            Occurs::once(),
        );
        assert!(not_ns.is_matching("a", None));
        assert!(!not_ns.is_matching("a", Some(NS)));
        assert!(!not_ns.is_matching(&format!("{{{}}}a", NS), None));
    }

    #[test]
    fn test_is_overlap() {
        let local_only = XsdAnyElement::new(
            NamespaceConstraint::from_namespace_attr("##local", None).unwrap(),
            Occurs::once(),
        );
        let other = XsdAnyElement::new(
            NamespaceConstraint::from_namespace_attr("##other", Some(NS)).unwrap(),
            Occurs::once(),
        );
        let any = XsdAnyElement::any();

        assert!(!local_only.is_overlap(&other));
        assert!(!other.is_overlap(&local_only));
        assert!(any.is_overlap(&other));
        assert!(other.is_overlap(&any));

        let element = XsdElement::new(QName::namespaced(NS, "a"), Occurs::once());
        assert!(!other.is_overlap(&element));
        assert!(any.is_overlap(&element));
        assert!(element.is_overlap(&any));
        assert!(!element.is_overlap(&local_only));
    }
}
