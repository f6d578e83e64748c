//! XSD Particle Schema Components
//!
//! This module implements the occurrence contract shared by every particle,
//! elements and wildcards as well as model groups. Particles define
//! occurrence constraints (minOccurs, maxOccurs) for schema components.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use std::any::Any;
use std::fmt;

use crate::error::{Error, ParseError, Result};
use crate::namespaces::QName;

use super::groups::ModelGroup;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds, failing if `min > max`
    pub fn new(min: u32, max: Option<u32>) -> Result<Self> {
        match max {
            Some(max) if min > max => Err(ParseError::new(format!(
                "minOccurs ({}) must be lesser or equal than maxOccurs ({})",
                min, max
            ))
            .into()),
            _ => Ok(Self { min, max }),
        }
    }

    /// Create occurrence bounds from signed integers, as read from an
    /// external source
    pub fn from_ints(min: i64, max: Option<i64>) -> Result<Self> {
        let min = u32::try_from(min).map_err(|_| {
            ParseError::new("minOccurs value must be a non negative integer")
        })?;
        let max = match max {
            Some(max) => Some(u32::try_from(max).map_err(|_| {
                ParseError::new("maxOccurs value must be a non negative integer or 'unbounded'")
            })?),
            None => None,
        };
        Self::new(min, max)
    }

    /// Default occurrence (1, 1)
    pub const fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub const fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub const fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub const fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Empty (0, 0)
    pub const fn empty() -> Self {
        Self { min: 0, max: Some(0) }
    }

    /// Minimum number of occurrences
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Maximum number of occurrences (None = unbounded)
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle is empty (maxOccurs == 0)
    pub fn is_empty(&self) -> bool {
        self.max == Some(0)
    }

    /// Check if particle has maxOccurs == 1
    pub fn is_single(&self) -> bool {
        self.max == Some(1)
    }

    /// Check if particle can have multiple occurrences
    pub fn is_multiple(&self) -> bool {
        !self.is_empty() && !self.is_single()
    }

    /// Check if minOccurs != maxOccurs
    pub fn is_ambiguous(&self) -> bool {
        self.max != Some(self.min)
    }

    /// Check if minOccurs == maxOccurs
    pub fn is_univocal(&self) -> bool {
        !self.is_ambiguous()
    }

    /// Check if occurrence count is under the minimum
    pub fn is_missing(&self, count: u32) -> bool {
        count < self.min
    }

    /// Check if occurrence count is at or over the maximum
    pub fn is_over(&self, count: u32) -> bool {
        match self.max {
            Some(max) => count >= max,
            None => false,
        }
    }

    /// Check if occurrence count exceeds the maximum
    pub fn is_exceeded(&self, count: u32) -> bool {
        match self.max {
            Some(max) => count > max,
            None => false,
        }
    }

    /// Check if these bounds are a valid restriction of other bounds
    pub fn has_occurs_restriction(&self, other: &Occurs) -> bool {
        if self.min < other.min {
            return false;
        }

        match (self.max, other.max) {
            (Some(0), _) => true,
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(max), Some(other_max)) => max <= other_max,
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "({}, {})", self.min, max),
            None => write!(f, "({}, unbounded)", self.min),
        }
    }
}

/// Multiply two maximum bounds, None being unbounded.
///
/// Zero absorbs unbounded. A finite product beyond `u32::MAX` exceeds
/// every representable bound and is returned as unbounded.
pub(crate) fn mul_max(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(0), _) | (_, Some(0)) => Some(0),
        (Some(a), Some(b)) => a.checked_mul(b),
        _ => None,
    }
}

/// Maximum of a sequence of bounds, None if any is unbounded.
pub(crate) fn max_of<I>(values: I) -> Option<Option<u32>>
where
    I: IntoIterator<Item = Option<u32>>,
{
    let mut result: Option<Option<u32>> = None;
    for value in values {
        result = match (result, value) {
            (_, None) | (Some(None), _) => Some(None),
            (None, Some(v)) => Some(Some(v)),
            (Some(Some(acc)), Some(v)) => Some(Some(acc.max(v))),
        };
    }
    result
}

/// Sum of a sequence of bounds, None if any is unbounded or the sum
/// does not fit a bound.
pub(crate) fn sum_of<I>(values: I) -> Option<u32>
where
    I: IntoIterator<Item = Option<u32>>,
{
    values
        .into_iter()
        .try_fold(0u32, |acc, value| value.and_then(|v| acc.checked_add(v)))
}

/// Occurrence contract for XSD components that have particle semantics.
///
/// Leaf particles (elements, wildcards) get the declared semantics from the
/// provided methods. Model groups override the methods whose outcome depends
/// on the nested particles.
pub trait Particle {
    /// Get the occurrence bounds
    fn occurs(&self) -> Occurs;

    /// Get minimum occurrences
    fn min_occurs(&self) -> u32 {
        self.occurs().min()
    }

    /// Get maximum occurrences (None = unbounded)
    fn max_occurs(&self) -> Option<u32> {
        self.occurs().max()
    }

    /// The model group behind this particle, if it is one
    fn as_group(&self) -> Option<&ModelGroup> {
        None
    }

    /// Minimum occurrences once the nested structure is folded in.
    /// Equal to minOccurs for elements and wildcards.
    fn effective_min_occurs(&self) -> Result<u32> {
        Ok(self.min_occurs())
    }

    /// Maximum occurrences once the nested structure is folded in.
    /// Equal to maxOccurs for elements and wildcards.
    fn effective_max_occurs(&self) -> Result<Option<u32>> {
        Ok(self.max_occurs())
    }

    /// Check if this particle can be empty
    fn is_emptiable(&self) -> bool {
        self.occurs().is_emptiable()
    }

    /// Check if this particle is empty (max = 0)
    fn is_empty(&self) -> bool {
        self.occurs().is_empty()
    }

    /// Check if this particle is single occurrence
    fn is_single(&self) -> bool {
        self.occurs().is_single()
    }

    /// Check if this particle can have multiple occurrences
    fn is_multiple(&self) -> bool {
        !self.is_empty() && !self.is_single()
    }

    /// Check if minOccurs != maxOccurs
    fn is_ambiguous(&self) -> bool {
        self.occurs().is_ambiguous()
    }

    /// Check if minOccurs == maxOccurs
    fn is_univocal(&self) -> bool {
        self.occurs().is_univocal()
    }

    /// Check if the observed occurrences are under the minimum
    fn is_missing(&self, occurs: u32) -> bool {
        if occurs == 0 {
            !self.is_emptiable()
        } else {
            self.min_occurs() > occurs
        }
    }

    /// Check if the observed occurrences are at or over the maximum
    fn is_over(&self, occurs: u32) -> bool {
        self.occurs().is_over(occurs)
    }

    /// Check if this particle's occurs are a valid restriction of other's
    fn has_occurs_restriction(&self, other: &dyn Particle) -> bool {
        self.occurs().has_occurs_restriction(&other.occurs())
    }
}

impl Particle for Occurs {
    fn occurs(&self) -> Occurs {
        *self
    }
}

/// Capabilities of leaf particles (element declarations and wildcards).
///
/// Name matching and overlap testing are used by the collaborators doing
/// content matching and ambiguity analysis on top of the occurrence algebra.
pub trait LeafParticle: Particle + fmt::Debug + fmt::Display + Send + Sync {
    /// Qualified name of the particle, None for wildcards
    fn name(&self) -> Option<&QName>;

    /// Check if a name (`{namespace}local` or local) matches this particle
    fn is_matching(&self, name: &str, default_namespace: Option<&str>) -> bool;

    /// Check if this particle and another one may match the same element
    fn is_overlap(&self, other: &dyn LeafParticle) -> bool;

    /// Upcast for leaf-specific comparisons
    fn as_any(&self) -> &dyn Any;
}

struct OccursAttributes {
    occurs: Occurs,
    errors: Vec<ParseError>,
    clamped: bool,
}

fn parse_occurs_attributes(min_occurs: Option<&str>, max_occurs: Option<&str>) -> OccursAttributes {
    let mut errors = Vec::new();
    let mut min = 1u32;
    let mut max = Some(1u32);

    if let Some(min_str) = min_occurs {
        match min_str.trim().parse::<i64>() {
            Err(_) => errors.push(ParseError::new("minOccurs value is not an integer value")),
            Ok(value) => match u32::try_from(value) {
                Ok(value) => min = value,
                Err(_) => errors.push(ParseError::new(
                    "minOccurs value must be a non negative integer",
                )),
            },
        }
    }

    match max_occurs.map(str::trim) {
        None => {
            if min > 1 {
                errors.push(ParseError::new(
                    "minOccurs must be lesser or equal than maxOccurs",
                ));
            }
        }
        Some("unbounded") => max = None,
        Some(max_str) => match max_str.parse::<u32>() {
            Ok(value) => {
                if min > value {
                    errors.push(ParseError::new(
                        "maxOccurs must be 'unbounded' or greater than minOccurs",
                    ));
                }
                max = Some(value);
            }
            Err(_) => errors.push(ParseError::new(
                "maxOccurs value must be a non negative integer or 'unbounded'",
            )),
        },
    }

    let clamped = matches!(max, Some(value) if value < min);
    if clamped {
        max = None;
    }

    OccursAttributes {
        occurs: Occurs { min, max },
        errors,
        clamped,
    }
}

/// Parse minOccurs/maxOccurs from XML attribute values
pub fn parse_occurs(min_occurs: Option<&str>, max_occurs: Option<&str>) -> Result<Occurs> {
    let parsed = parse_occurs_attributes(min_occurs, max_occurs);
    match parsed.errors.into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(parsed.occurs),
    }
}

/// Parse minOccurs/maxOccurs collecting errors instead of failing.
///
/// Unreadable values keep their defaults. A maxOccurs lower than minOccurs
/// is reported and replaced by unbounded, as legacy schema processors do.
pub fn parse_occurs_lax(
    min_occurs: Option<&str>,
    max_occurs: Option<&str>,
) -> (Occurs, Vec<ParseError>) {
    let parsed = parse_occurs_attributes(min_occurs, max_occurs);
    if parsed.clamped {
        tracing::warn!(
            min_occurs = parsed.occurs.min,
            "maxOccurs lower than minOccurs, using 'unbounded'"
        );
    }
    (parsed.occurs, parsed.errors)
}

/// Parse the minOccurs/maxOccurs attributes of a schema element node
pub fn parse_particle_attributes(node: roxmltree::Node<'_, '_>) -> Result<Occurs> {
    if !node.is_element() {
        return Err(Error::Xml(format!(
            "expected an element node, found {:?}",
            node.node_type()
        )));
    }

    parse_occurs(node.attribute("minOccurs"), node.attribute("maxOccurs")).map_err(|err| {
        match err {
            Error::Parse(parse_error) => {
                let pos = node.document().text_pos_at(node.range().start);
                Error::Parse(
                    parse_error
                        .with_location(format!("{}:{}", pos.row, pos.col))
                        .with_source(node.tag_name().name().to_string()),
                )
            }
            other => other,
        }
    })
}
