//! XSD Model Group particles
//!
//! This module implements model groups for XSD content models:
//! - xs:sequence - ordered content
//! - xs:choice - alternative content
//! - xs:all - unordered content
//!
//! Groups own their particles and override the occurrence contract where
//! the outcome depends on the nested structure.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Model_Groups

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::QName;

use super::elements::XsdElement;
use super::particles::{
    max_of, mul_max, parse_occurs, sum_of, LeafParticle, Occurs, Particle,
};
use super::wildcards::XsdAnyElement;

/// Model group compositor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelType {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl ModelType {
    /// Parse from element tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sequence" | "{http://www.w3.org/2001/XMLSchema}sequence" => Some(Self::Sequence),
            "choice" | "{http://www.w3.org/2001/XMLSchema}choice" => Some(Self::Choice),
            "all" | "{http://www.w3.org/2001/XMLSchema}all" => Some(Self::All),
            _ => None,
        }
    }

    /// Get the compositor as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Choice => "choice",
            Self::All => "all",
        }
    }
}

impl FromStr for ModelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequence" => Ok(Self::Sequence),
            "choice" => Ok(Self::Choice),
            "all" => Ok(Self::All),
            _ => Err(Error::Value(format!("invalid model '{}' for a group", s))),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A particle in a model group (element, wildcard, or nested group)
#[derive(Debug)]
pub enum GroupParticle {
    /// Element declaration or wildcard
    Leaf(Box<dyn LeafParticle>),
    /// Nested model group
    Group(ModelGroup),
}

impl GroupParticle {
    /// Wrap a leaf particle
    pub fn leaf(leaf: impl LeafParticle + 'static) -> Self {
        Self::Leaf(Box::new(leaf))
    }

    /// Get the leaf particle, if this is not a group
    pub fn as_leaf(&self) -> Option<&dyn LeafParticle> {
        match self {
            Self::Leaf(leaf) => Some(leaf.as_ref()),
            Self::Group(_) => None,
        }
    }

    /// Check if this particle is a nested group
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub(crate) fn effective_min_occurs_at(&self, depth: usize, limits: &Limits) -> Result<u32> {
        match self {
            Self::Leaf(leaf) => leaf.effective_min_occurs(),
            Self::Group(group) => group.effective_min_occurs_at(depth, limits),
        }
    }

    pub(crate) fn effective_max_occurs_at(
        &self,
        depth: usize,
        limits: &Limits,
    ) -> Result<Option<u32>> {
        match self {
            Self::Leaf(leaf) => leaf.effective_max_occurs(),
            Self::Group(group) => group.effective_max_occurs_at(depth, limits),
        }
    }
}

impl Particle for GroupParticle {
    fn occurs(&self) -> Occurs {
        match self {
            Self::Leaf(leaf) => leaf.occurs(),
            Self::Group(group) => group.occurs,
        }
    }

    fn as_group(&self) -> Option<&ModelGroup> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    fn effective_min_occurs(&self) -> Result<u32> {
        self.effective_min_occurs_at(0, &Limits::default())
    }

    fn effective_max_occurs(&self) -> Result<Option<u32>> {
        self.effective_max_occurs_at(0, &Limits::default())
    }

    fn is_emptiable(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.is_emptiable(),
            Self::Group(group) => group.is_emptiable(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.is_empty(),
            Self::Group(group) => group.is_empty(),
        }
    }

    fn is_single(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.is_single(),
            Self::Group(group) => group.is_single(),
        }
    }

    fn has_occurs_restriction(&self, other: &dyn Particle) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.has_occurs_restriction(other),
            Self::Group(group) => group.has_occurs_restriction(other),
        }
    }
}

impl fmt::Display for GroupParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => fmt::Display::fmt(leaf, f),
            Self::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

impl From<ModelGroup> for GroupParticle {
    fn from(group: ModelGroup) -> Self {
        Self::Group(group)
    }
}

impl From<XsdElement> for GroupParticle {
    fn from(element: XsdElement) -> Self {
        Self::leaf(element)
    }
}

impl From<XsdAnyElement> for GroupParticle {
    fn from(any: XsdAnyElement) -> Self {
        Self::leaf(any)
    }
}

/// XSD Model Group (sequence, choice, all)
///
/// The compositor is fixed at construction. Particles are owned by the
/// group, so a content model is a tree without back-references.
#[derive(Debug)]
pub struct ModelGroup {
    /// Model type (sequence, choice, all)
    model: ModelType,
    /// Occurrence constraints
    occurs: Occurs,
    /// Particles in this group
    particles: Vec<GroupParticle>,
}

#[allow(clippy::len_without_is_empty)]
impl ModelGroup {
    /// Create a new model group occurring exactly once
    pub fn new(model: ModelType) -> Self {
        Self::with_occurs(model, Occurs::once())
    }

    /// Create a new model group with occurrence constraints
    pub fn with_occurs(model: ModelType, occurs: Occurs) -> Self {
        Self {
            model,
            occurs,
            particles: Vec::new(),
        }
    }

    /// Create a model group from a compositor token
    pub fn from_token(model: &str, occurs: Occurs) -> Result<Self> {
        Ok(Self::with_occurs(model.parse()?, occurs))
    }

    /// Get the model type
    pub fn model(&self) -> ModelType {
        self.model
    }

    /// Replace the occurrence constraints
    pub fn set_occurs(&mut self, occurs: Occurs) {
        self.occurs = occurs;
    }

    /// Set the occurrence constraints from minOccurs/maxOccurs attribute values
    pub fn set_occurs_from_attributes(
        &mut self,
        min_occurs: Option<&str>,
        max_occurs: Option<&str>,
    ) -> Result<()> {
        self.occurs = parse_occurs(min_occurs, max_occurs)?;
        Ok(())
    }

    /// Add a particle to the group
    pub fn push(&mut self, particle: impl Into<GroupParticle>) {
        self.particles.push(particle.into());
    }

    /// Insert a particle at a position
    pub fn insert(&mut self, index: usize, particle: impl Into<GroupParticle>) {
        self.particles.insert(index, particle.into());
    }

    /// Remove and return the particle at a position
    pub fn remove(&mut self, index: usize) -> GroupParticle {
        self.particles.remove(index)
    }

    /// Remove all particles
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add an element particle
    pub fn add_element(&mut self, name: QName, occurs: Occurs) {
        self.push(XsdElement::new(name, occurs));
    }

    /// Add a wildcard particle
    pub fn add_any(&mut self, any: XsdAnyElement) {
        self.push(any);
    }

    /// Add a nested group
    pub fn add_group(&mut self, group: ModelGroup) {
        self.push(group);
    }

    /// Add any other kind of leaf particle
    pub fn add_leaf(&mut self, leaf: impl LeafParticle + 'static) {
        self.push(GroupParticle::leaf(leaf));
    }

    /// Get a particle by position
    pub fn get(&self, index: usize) -> Option<&GroupParticle> {
        self.particles.get(index)
    }

    /// Get a mutable particle by position
    pub fn get_mut(&mut self, index: usize) -> Option<&mut GroupParticle> {
        self.particles.get_mut(index)
    }

    /// Iterate over direct particles
    pub fn iter(&self) -> std::slice::Iter<'_, GroupParticle> {
        self.particles.iter()
    }

    /// Get number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the group may be eliminated without affecting the model.
    ///
    /// A group is pointless if it has no particles, or if it occurs exactly
    /// once and either has a single particle or repeats the compositor of
    /// its parent (sequence in sequence, choice in choice).
    ///
    /// Ref: https://www.w3.org/TR/2004/REC-xmlschema-1-20041028/#coss-particle
    pub fn is_pointless(&self, parent: ModelType) -> bool {
        if self.particles.is_empty() {
            return true;
        }
        if self.occurs != Occurs::once() {
            return false;
        }
        if self.particles.len() == 1 {
            return true;
        }

        matches!(
            (self.model, parent),
            (ModelType::Sequence, ModelType::Sequence) | (ModelType::Choice, ModelType::Choice)
        )
    }

    /// Effective minimum occurs computed under the given limits
    pub fn effective_min_occurs_with(&self, limits: &Limits) -> Result<u32> {
        self.effective_min_occurs_at(0, limits)
    }

    /// Effective maximum occurs computed under the given limits
    pub fn effective_max_occurs_with(&self, limits: &Limits) -> Result<Option<u32>> {
        self.effective_max_occurs_at(0, limits)
    }

    pub(crate) fn effective_min_occurs_at(&self, depth: usize, limits: &Limits) -> Result<u32> {
        if self.occurs.min() == 0 || self.particles.is_empty() {
            return Ok(0);
        }

        let mut items = self.iter_model(depth).limits(*limits);
        while let Some(item) = items.next() {
            let value = item?.effective_min_occurs_at(items.depth() + 1, limits)?;
            match self.model {
                ModelType::Choice if value == 0 => return Ok(0),
                ModelType::Sequence | ModelType::All if value > 0 => {
                    return Ok(self.occurs.min())
                }
                _ => {}
            }
        }

        match self.model {
            ModelType::Choice => Ok(self.occurs.min()),
            ModelType::Sequence | ModelType::All => Ok(0),
        }
    }

    pub(crate) fn effective_max_occurs_at(
        &self,
        depth: usize,
        limits: &Limits,
    ) -> Result<Option<u32>> {
        if self.occurs.max() == Some(0) || self.particles.is_empty() {
            return Ok(Some(0));
        }

        let mut effective_items = Vec::new();
        let mut items = self.iter_model(depth).limits(*limits);
        while let Some(item) = items.next() {
            let item = item?;
            let child_depth = items.depth() + 1;
            let max_occurs = item.effective_max_occurs_at(child_depth, limits)?;
            if max_occurs != Some(0) {
                effective_items.push((item, child_depth, max_occurs));
            }
        }

        if effective_items.is_empty() {
            return Ok(Some(0));
        }
        if self.occurs.max().is_none() {
            return Ok(None);
        }

        let scaled_max = |values: &mut dyn Iterator<Item = Option<u32>>| {
            max_of(values).and_then(|value| mul_max(self.occurs.max(), value))
        };

        if self.model == ModelType::Choice {
            return Ok(scaled_max(&mut effective_items.iter().map(|(_, _, max)| *max)));
        }

        let mut not_emptiable = Vec::new();
        for (item, child_depth, max_occurs) in &effective_items {
            if item.effective_min_occurs_at(*child_depth, limits)? > 0 {
                not_emptiable.push(*max_occurs);
            }
        }

        match not_emptiable.as_slice() {
            [] => Ok(scaled_max(&mut effective_items.iter().map(|(_, _, max)| *max))),
            [max_occurs] => Ok(mul_max(self.occurs.max(), *max_occurs)),
            _ => Ok(self.occurs.max()),
        }
    }

    fn is_trivially_emptiable(&self) -> bool {
        self.occurs.min() == 0 || self.particles.is_empty()
    }

    /// Sum or minimum of particle minOccurs, multiplied by the group minOccurs.
    ///
    /// Computed in `u64`, where the product of two bounds always fits.
    fn min_contribution(&self) -> u64 {
        let mins = self.particles.iter().map(|p| u64::from(p.min_occurs()));
        let value = match self.model {
            ModelType::Choice => mins.min().unwrap_or(0),
            ModelType::Sequence | ModelType::All => mins.fold(0u64, u64::saturating_add),
        };
        u64::from(self.occurs.min()).saturating_mul(value)
    }

    /// Sum or maximum of particle maxOccurs, multiplied by the group maxOccurs.
    ///
    /// The factor is the group maxOccurs, not its minOccurs. None when
    /// unbounded or beyond `u32::MAX`.
    fn max_contribution(&self) -> Option<u32> {
        let maxima = self.particles.iter().map(|p| p.max_occurs());
        let value = match self.model {
            ModelType::Choice => max_of(maxima).unwrap_or(Some(0)),
            ModelType::Sequence | ModelType::All => sum_of(maxima),
        };
        mul_max(self.occurs.max(), value)
    }
}

impl Particle for ModelGroup {
    fn occurs(&self) -> Occurs {
        self.occurs
    }

    fn as_group(&self) -> Option<&ModelGroup> {
        Some(self)
    }

    fn effective_min_occurs(&self) -> Result<u32> {
        self.effective_min_occurs_at(0, &Limits::default())
    }

    fn effective_max_occurs(&self) -> Result<Option<u32>> {
        self.effective_max_occurs_at(0, &Limits::default())
    }

    /// Walks the nested groups with an explicit stack, so the nesting depth
    /// of the model is not bounded by the thread stack.
    fn is_emptiable(&self) -> bool {
        if self.is_trivially_emptiable() {
            return true;
        }

        let mut stack: Vec<(ModelType, slice::Iter<'_, GroupParticle>)> =
            vec![(self.model, self.particles.iter())];
        // Outcome of the last particle or group evaluated, not yet consumed by its parent
        let mut outcome: Option<bool> = None;

        while let Some((model, children)) = stack.last_mut() {
            // A choice is decided by an emptiable branch, a sequence or all
            // by a non-emptiable one.
            let decisive = *model == ModelType::Choice;

            if outcome.take() == Some(decisive) {
                stack.pop();
                outcome = Some(decisive);
                continue;
            }

            match children.next() {
                None => {
                    stack.pop();
                    outcome = Some(!decisive);
                }
                Some(GroupParticle::Leaf(leaf)) => outcome = Some(leaf.is_emptiable()),
                Some(GroupParticle::Group(group)) if group.is_trivially_emptiable() => {
                    outcome = Some(true)
                }
                Some(GroupParticle::Group(group)) => {
                    stack.push((group.model, group.particles.iter()));
                }
            }
        }

        outcome.unwrap_or(true)
    }

    fn is_empty(&self) -> bool {
        self.particles.is_empty() || self.occurs.max() == Some(0)
    }

    fn is_single(&self) -> bool {
        let mut group = self;
        loop {
            if group.occurs.max() != Some(1) || group.particles.is_empty() {
                return false;
            }
            if group.particles.len() > 1 {
                return true;
            }

            // Single nested group: its outcome decides
            match &group.particles[0] {
                GroupParticle::Group(inner) => group = inner,
                GroupParticle::Leaf(_) => return true,
            }
        }
    }

    fn has_occurs_restriction(&self, other: &dyn Particle) -> bool {
        if self.particles.is_empty() {
            return true;
        }
        if other.as_group().is_some() {
            return self.occurs.has_occurs_restriction(&other.occurs());
        }

        // Group particle compared to an element particle
        let other = other.occurs();
        let unbounded = self.occurs.max().is_none()
            || self.particles.iter().any(|p| p.max_occurs().is_none());

        if unbounded {
            return other.max().is_none() && self.min_contribution() >= u64::from(other.min());
        }
        if self.min_contribution() < u64::from(other.min()) {
            return false;
        }

        match (self.max_contribution(), other.max()) {
            (_, None) => true,
            (Some(value), Some(other_max)) => value <= other_max,
            (None, Some(_)) => false,
        }
    }
}

impl Drop for ModelGroup {
    /// Unlinks nested groups one at a time, keeping the drop of a deeply
    /// nested model off the thread stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.particles);
        while let Some(particle) = pending.pop() {
            if let GroupParticle::Group(mut group) = particle {
                pending.append(&mut group.particles);
            }
        }
    }
}

impl Index<usize> for ModelGroup {
    type Output = GroupParticle;

    fn index(&self, index: usize) -> &GroupParticle {
        &self.particles[index]
    }
}

impl IndexMut<usize> for ModelGroup {
    fn index_mut(&mut self, index: usize) -> &mut GroupParticle {
        &mut self.particles[index]
    }
}

impl<'a> IntoIterator for &'a ModelGroup {
    type Item = &'a GroupParticle;
    type IntoIter = std::slice::Iter<'a, GroupParticle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

impl fmt::Display for ModelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelGroup(model='{}', occurs={})", self.model, self.occurs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurs(min: u32, max: Option<u32>) -> Occurs {
        Occurs::new(min, max).unwrap()
    }

    fn group_of(model: ModelType, group_occurs: Occurs, children: &[(&str, Occurs)]) -> ModelGroup {
        let mut group = ModelGroup::with_occurs(model, group_occurs);
        for (name, child_occurs) in children {
            group.add_element(QName::local(*name), *child_occurs);
        }
        group
    }

    #[test]
    fn test_model_type_from_tag() {
        assert_eq!(ModelType::from_tag("sequence"), Some(ModelType::Sequence));
        assert_eq!(ModelType::from_tag("choice"), Some(ModelType::Choice));
        assert_eq!(ModelType::from_tag("all"), Some(ModelType::All));
        assert_eq!(
            ModelType::from_tag("{http://www.w3.org/2001/XMLSchema}all"),
            Some(ModelType::All)
        );
        assert_eq!(ModelType::from_tag("invalid"), None);
    }

    #[test]
    fn test_model_type_from_str() {
        assert_eq!("choice".parse::<ModelType>().unwrap(), ModelType::Choice);
        let err = "interleave".parse::<ModelType>().unwrap_err();
        assert!(matches!(err, Error::Value(_)));
        assert!(err.to_string().contains("invalid model 'interleave'"));
        assert!(ModelGroup::from_token("group", Occurs::once()).is_err());
    }

    #[test]
    fn test_group_creation() {
        let group = ModelGroup::new(ModelType::Sequence);
        assert_eq!(group.model(), ModelType::Sequence);
        assert_eq!(group.len(), 0);
        assert_eq!(group.occurs(), Occurs::once());
        assert_eq!(group.to_string(), "ModelGroup(model='sequence', occurs=(1, 1))");
    }

    #[test]
    fn test_group_collection() {
        let mut group = ModelGroup::new(ModelType::Sequence);
        group.add_element(QName::local("first"), Occurs::once());
        group.add_element(QName::local("third"), Occurs::zero_or_more());
        group.insert(1, XsdElement::new(QName::local("second"), Occurs::optional()));
        assert_eq!(group.len(), 3);
        assert_eq!(group[1].occurs(), Occurs::optional());

        let removed = group.remove(0);
        assert_eq!(removed.occurs(), Occurs::once());
        assert_eq!(group.len(), 2);
        assert!(group.get(2).is_none());

        group[0] = GroupParticle::from(ModelGroup::new(ModelType::Choice));
        assert!(group[0].is_group());

        group.clear();
        assert!(group.is_empty());
    }

    #[test]
    fn test_set_occurs_from_attributes() {
        let mut group = ModelGroup::new(ModelType::Choice);
        group.set_occurs_from_attributes(Some("0"), Some("unbounded")).unwrap();
        assert_eq!(group.occurs(), Occurs::zero_or_more());
        assert!(group.set_occurs_from_attributes(Some("2"), Some("1")).is_err());
        assert_eq!(group.occurs(), Occurs::zero_or_more());
    }

    #[test]
    fn test_is_emptiable_sequence() {
        let mut group = ModelGroup::new(ModelType::Sequence);
        assert!(group.is_emptiable());

        group.add_element(QName::local("required"), Occurs::once());
        assert!(!group.is_emptiable());

        group.add_element(QName::local("optional"), Occurs::optional());
        assert!(!group.is_emptiable());

        group.set_occurs(Occurs::optional());
        assert!(group.is_emptiable());
    }

    #[test]
    fn test_is_emptiable_choice() {
        let group = group_of(
            ModelType::Choice,
            Occurs::once(),
            &[("required", Occurs::once()), ("optional", Occurs::optional())],
        );
        assert!(group.is_emptiable());

        let group = group_of(
            ModelType::Choice,
            Occurs::once(),
            &[("a", Occurs::once()), ("b", occurs(2, Some(2)))],
        );
        assert!(!group.is_emptiable());
    }

    #[test]
    fn test_is_empty() {
        let mut group = ModelGroup::new(ModelType::Sequence);
        assert!(group.is_empty());
        group.add_element(QName::local("a"), Occurs::once());
        assert!(!group.is_empty());
        group.set_occurs(Occurs::empty());
        assert!(group.is_empty());
    }

    #[test]
    fn test_is_single() {
        let mut group = ModelGroup::new(ModelType::Sequence);
        assert!(!group.is_single());

        let mut inner = ModelGroup::with_occurs(ModelType::Choice, Occurs::one_or_more());
        inner.add_element(QName::local("a"), Occurs::once());
        group.add_group(inner);
        assert!(!group.is_single());
        assert!(group.is_multiple());

        group.add_element(QName::local("b"), Occurs::once());
        assert!(group.is_single());

        let repeated = group_of(ModelType::Sequence, occurs(1, Some(2)), &[("a", Occurs::once())]);
        assert!(!repeated.is_single());
    }

    #[test]
    fn test_is_pointless() {
        let empty = ModelGroup::new(ModelType::Sequence);
        assert!(empty.is_pointless(ModelType::Sequence));

        let single = group_of(ModelType::Sequence, Occurs::once(), &[("elem", Occurs::once())]);
        assert!(single.is_pointless(ModelType::Choice));

        let multi = group_of(
            ModelType::Sequence,
            Occurs::once(),
            &[("a", Occurs::once()), ("b", Occurs::once())],
        );
        assert!(multi.is_pointless(ModelType::Sequence));
        assert!(!multi.is_pointless(ModelType::Choice));

        let choice = group_of(
            ModelType::Choice,
            Occurs::once(),
            &[("a", Occurs::once()), ("b", Occurs::once())],
        );
        assert!(choice.is_pointless(ModelType::Choice));
        assert!(!choice.is_pointless(ModelType::All));

        let all = group_of(
            ModelType::All,
            Occurs::once(),
            &[("a", Occurs::once()), ("b", Occurs::once())],
        );
        assert!(!all.is_pointless(ModelType::All));

        let repeated = group_of(ModelType::Sequence, Occurs::zero_or_more(), &[("elem", Occurs::once())]);
        assert!(!repeated.is_pointless(ModelType::Sequence));
    }

    #[test]
    fn test_effective_min_occurs_sequence() {
        let group = group_of(
            ModelType::Sequence,
            occurs(3, Some(3)),
            &[("a", occurs(2, Some(5))), ("b", Occurs::optional())],
        );
        assert_eq!(group.effective_min_occurs().unwrap(), 3);

        let group = group_of(
            ModelType::Sequence,
            Occurs::once(),
            &[("a", Occurs::optional()), ("b", Occurs::zero_or_more())],
        );
        assert_eq!(group.effective_min_occurs().unwrap(), 0);
    }

    #[test]
    fn test_effective_min_occurs_choice() {
        let group = group_of(
            ModelType::Choice,
            occurs(2, Some(2)),
            &[("a", occurs(2, Some(5))), ("b", occurs(1, Some(3)))],
        );
        assert_eq!(group.effective_min_occurs().unwrap(), 2);

        let group = group_of(
            ModelType::Choice,
            Occurs::once(),
            &[("a", Occurs::optional()), ("b", Occurs::once())],
        );
        assert_eq!(group.effective_min_occurs().unwrap(), 0);
        assert_eq!(group.effective_max_occurs().unwrap(), Some(1));
    }

    #[test]
    fn test_effective_min_occurs_zero_bounds() {
        let group = group_of(ModelType::Sequence, Occurs::optional(), &[("a", Occurs::once())]);
        assert_eq!(group.effective_min_occurs().unwrap(), 0);
        assert_eq!(ModelGroup::new(ModelType::Choice).effective_min_occurs().unwrap(), 0);
    }

    #[test]
    fn test_effective_max_occurs_choice() {
        let group = group_of(
            ModelType::Choice,
            occurs(1, Some(2)),
            &[("a", occurs(1, Some(5))), ("b", occurs(1, Some(3)))],
        );
        assert_eq!(group.effective_max_occurs().unwrap(), Some(10));

        let group = group_of(
            ModelType::Choice,
            Occurs::once(),
            &[("a", occurs(1, Some(5))), ("b", Occurs::one_or_more())],
        );
        assert_eq!(group.effective_max_occurs().unwrap(), None);
    }

    #[test]
    fn test_effective_max_occurs_sequence() {
        // two mandatory particles bound the group to its own maxOccurs
        let group = group_of(
            ModelType::Sequence,
            Occurs::once(),
            &[("a", occurs(1, Some(3))), ("b", occurs(2, Some(4)))],
        );
        assert_eq!(group.effective_max_occurs().unwrap(), Some(1));

        // no mandatory particles: scaled maximum
        let group = group_of(ModelType::Sequence, occurs(2, Some(2)), &[("a", occurs(0, Some(5)))]);
        assert_eq!(group.effective_max_occurs().unwrap(), Some(10));

        // one mandatory particle: scaled by its maximum
        let group = group_of(
            ModelType::All,
            occurs(1, Some(3)),
            &[("a", occurs(1, Some(4))), ("b", Occurs::optional())],
        );
        assert_eq!(group.effective_max_occurs().unwrap(), Some(12));

        let group = group_of(
            ModelType::Sequence,
            occurs(1, Some(3)),
            &[("a", Occurs::one_or_more()), ("b", Occurs::optional())],
        );
        assert_eq!(group.effective_max_occurs().unwrap(), None);
    }

    #[test]
    fn test_effective_max_occurs_empty_cases() {
        let group = group_of(ModelType::Sequence, Occurs::empty(), &[("a", Occurs::once())]);
        assert_eq!(group.effective_max_occurs().unwrap(), Some(0));

        let group = group_of(ModelType::Choice, Occurs::zero_or_more(), &[("a", Occurs::empty())]);
        assert_eq!(group.effective_max_occurs().unwrap(), Some(0));

        let group = group_of(ModelType::Choice, Occurs::zero_or_more(), &[("a", Occurs::once())]);
        assert_eq!(group.effective_max_occurs().unwrap(), None);
    }

    #[test]
    fn test_effective_occurs_nested() {
        let mut inner = ModelGroup::with_occurs(ModelType::Choice, occurs(0, Some(3)));
        inner.add_element(QName::local("a"), occurs(1, Some(2)));
        inner.add_element(QName::local("b"), Occurs::once());

        let mut outer = ModelGroup::with_occurs(ModelType::Sequence, occurs(1, Some(2)));
        outer.add_group(inner);

        assert_eq!(outer[0].effective_max_occurs().unwrap(), Some(6));
        assert_eq!(outer.effective_min_occurs().unwrap(), 0);
        assert_eq!(outer.effective_max_occurs().unwrap(), Some(12));
    }

    #[test]
    fn test_group_restriction_of_group() {
        let derived = group_of(ModelType::Sequence, occurs(1, Some(2)), &[("a", Occurs::once())]);
        let base = group_of(ModelType::Choice, occurs(0, Some(5)), &[("a", Occurs::once())]);
        assert!(derived.has_occurs_restriction(&base));
        assert!(!base.has_occurs_restriction(&derived));

        let empty = ModelGroup::with_occurs(ModelType::Sequence, Occurs::zero_or_more());
        assert!(empty.has_occurs_restriction(&derived));
    }

    #[test]
    fn test_group_restriction_of_element() {
        let element = XsdElement::new(QName::local("a"), occurs(1, Some(6)));

        let sequence = group_of(
            ModelType::Sequence,
            occurs(1, Some(2)),
            &[("a", Occurs::once()), ("b", occurs(1, Some(2)))],
        );
        assert!(sequence.has_occurs_restriction(&element)); // 2..6 within 1..6

        let choice = group_of(
            ModelType::Choice,
            occurs(1, Some(2)),
            &[("a", occurs(1, Some(4))), ("b", Occurs::once())],
        );
        // Scaled by the group maxOccurs: 2 * 4 = 8 exceeds 6
        assert!(!choice.has_occurs_restriction(&element));
        let wide_element = XsdElement::new(QName::local("a"), occurs(1, Some(8)));
        assert!(choice.has_occurs_restriction(&wide_element));

        let unbounded = group_of(ModelType::Choice, Occurs::one_or_more(), &[("a", Occurs::once())]);
        assert!(!unbounded.has_occurs_restriction(&element));
        let unbounded_element = XsdElement::new(QName::local("a"), Occurs::one_or_more());
        assert!(unbounded.has_occurs_restriction(&unbounded_element));

        let low = group_of(ModelType::Choice, Occurs::once(), &[("a", Occurs::optional())]);
        assert!(!low.has_occurs_restriction(&element)); // min 0 < 1
    }

    #[test]
    fn test_group_with_unbounded_particle_restriction_of_element() {
        let group = group_of(
            ModelType::Sequence,
            Occurs::once(),
            &[("a", Occurs::zero_or_more())],
        );

        let bounded = XsdElement::new(QName::local("x"), occurs(0, Some(100)));
        assert!(!group.has_occurs_restriction(&bounded));

        let unbounded = XsdElement::new(QName::local("x"), Occurs::zero_or_more());
        assert!(group.has_occurs_restriction(&unbounded));

        let required = XsdElement::new(QName::local("x"), Occurs::one_or_more());
        assert!(!group.has_occurs_restriction(&required));
    }

    #[test]
    fn test_bounds_beyond_u32_are_unbounded() {
        let choice = group_of(
            ModelType::Choice,
            occurs(1, Some(u32::MAX)),
            &[("a", occurs(1, Some(2)))],
        );
        assert_eq!(choice.effective_max_occurs().unwrap(), None);

        let element = XsdElement::new(QName::local("x"), occurs(1, Some(u32::MAX)));
        assert!(!choice.has_occurs_restriction(&element));
        assert!(choice.has_occurs_restriction(&XsdElement::new(
            QName::local("x"),
            Occurs::one_or_more()
        )));

        let sequence = group_of(
            ModelType::Sequence,
            occurs(u32::MAX, Some(u32::MAX)),
            &[("a", occurs(1, Some(1))), ("b", occurs(1, Some(1)))],
        );
        // The minimum contribution 2 * u32::MAX is compared without overflow
        let element = XsdElement::new(QName::local("x"), occurs(u32::MAX, None));
        assert!(sequence.has_occurs_restriction(&element));
    }

    #[test]
    fn test_deep_single_chain() {
        let mut group = group_of(ModelType::Choice, Occurs::once(), &[("a", Occurs::once())]);
        for _ in 0..100_000 {
            let mut parent = ModelGroup::new(ModelType::Sequence);
            parent.add_group(group);
            group = parent;
        }
        assert!(group.is_single());
        assert!(!group.is_emptiable());

        group.set_occurs(Occurs::one_or_more());
        assert!(!group.is_single());
    }
}
