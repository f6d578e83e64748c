//! XML qualified names
//!
//! Leaf particles are identified by qualified names written in Clark
//! notation (`{namespace}localName`) or as bare local names.

use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Parse a name in Clark notation (`{namespace}local`) or a bare local name
    pub fn from_clark(name: &str) -> Option<Self> {
        match name.strip_prefix('{') {
            Some(rest) => {
                let (namespace, local_name) = rest.split_once('}')?;
                if local_name.is_empty() {
                    return None;
                }
                if namespace.is_empty() {
                    Some(Self::local(local_name))
                } else {
                    Some(Self::namespaced(namespace, local_name))
                }
            }
            None if name.is_empty() => None,
            None => Some(Self::local(name)),
        }
    }

    /// Namespace URI, the empty string for no namespace
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}
