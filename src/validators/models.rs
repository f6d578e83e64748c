//! XSD Content Model traversal
//!
//! This module provides read-only queries over a tree of model groups:
//! - lazy iteration of a model with pointless groups flattened out
//! - iteration of the element and wildcard particles of a model
//! - lookup of the groups enclosing a particle and its overall occurs
//!
//! Every query is guarded by the maximum model depth, so a nesting bomb
//! ends with a depth error instead of exhausting the stack.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#coss-particle

use std::iter::FusedIterator;
use std::slice;

use crate::error::{Error, Result};
use crate::limits::Limits;

use super::exceptions::ModelError;
use super::groups::{GroupParticle, ModelGroup, ModelType};
use super::particles::Particle;

/// Check a depth against the limits, naming the group in the error
fn check_depth(limits: &Limits, depth: usize, group: &ModelGroup) -> Result<()> {
    limits.check_model_depth(depth).map_err(|err| match err {
        Error::ModelDepth(err) => err.with_group(group.to_string()).into(),
        other => other,
    })
}

/// Lazy iterator over the particles of a model group.
///
/// Nested groups that are pointless with respect to their parent are not
/// yielded: the iterator descends into them and yields their particles
/// instead. A depth error is yielded once and ends the iteration.
#[derive(Debug)]
pub struct ModelIter<'a> {
    group: &'a ModelGroup,
    depth: usize,
    limits: Limits,
    stack: Vec<(&'a ModelGroup, slice::Iter<'a, GroupParticle>)>,
    started: bool,
    finished: bool,
}

impl<'a> ModelIter<'a> {
    fn new(group: &'a ModelGroup, depth: usize) -> Self {
        Self {
            group,
            depth,
            limits: Limits::default(),
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Use a different maximum model depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_model_depth = max_depth;
        self
    }

    /// Use different limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Depth of the group enclosing the last yielded particle
    pub fn depth(&self) -> usize {
        self.depth + self.stack.len().saturating_sub(1)
    }

    fn fail(&mut self, err: Error) -> Option<Result<&'a GroupParticle>> {
        self.finished = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl<'a> Iterator for ModelIter<'a> {
    type Item = Result<&'a GroupParticle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if let Err(err) = check_depth(&self.limits, self.depth, self.group) {
                return self.fail(err);
            }
            self.stack.push((self.group, self.group.iter()));
        }

        loop {
            let depth = self.depth + self.stack.len();
            let Some((parent, children)) = self.stack.last_mut() else {
                self.finished = true;
                return None;
            };
            let parent_model: ModelType = parent.model();

            match children.next() {
                None => {
                    self.stack.pop();
                }
                Some(GroupParticle::Group(group)) if group.is_pointless(parent_model) => {
                    if let Err(err) = check_depth(&self.limits, depth, group) {
                        return self.fail(err);
                    }
                    self.stack.push((group, group.iter()));
                }
                Some(item) => return Some(Ok(item)),
            }
        }
    }
}

impl FusedIterator for ModelIter<'_> {}

/// Lazy iterator over the leaf particles of a model group, in document order.
///
/// Descends into every nested group and skips groups with maxOccurs == 0.
#[derive(Debug)]
pub struct ElementsIter<'a> {
    group: &'a ModelGroup,
    depth: usize,
    limits: Limits,
    stack: Vec<slice::Iter<'a, GroupParticle>>,
    started: bool,
    finished: bool,
}

impl<'a> ElementsIter<'a> {
    fn new(group: &'a ModelGroup, depth: usize) -> Self {
        Self {
            group,
            depth,
            limits: Limits::default(),
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Use a different maximum model depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_model_depth = max_depth;
        self
    }

    /// Use different limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn fail(&mut self, err: Error) -> Option<Result<&'a GroupParticle>> {
        self.finished = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl<'a> Iterator for ElementsIter<'a> {
    type Item = Result<&'a GroupParticle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if let Err(err) = check_depth(&self.limits, self.depth, self.group) {
                return self.fail(err);
            }
            if self.group.max_occurs() != Some(0) {
                self.stack.push(self.group.iter());
            }
        }

        loop {
            let depth = self.depth + self.stack.len();
            let Some(children) = self.stack.last_mut() else {
                self.finished = true;
                return None;
            };

            match children.next() {
                None => {
                    self.stack.pop();
                }
                Some(GroupParticle::Group(group)) => {
                    if let Err(err) = check_depth(&self.limits, depth, group) {
                        return self.fail(err);
                    }
                    if group.max_occurs() != Some(0) {
                        self.stack.push(group.iter());
                    }
                }
                Some(item) => return Some(Ok(item)),
            }
        }
    }
}

impl FusedIterator for ElementsIter<'_> {}

impl ModelGroup {
    /// Iterate the particles of the model, skipping pointless groups and
    /// iterating deeper through them.
    ///
    /// The *depth* argument is the nesting level of this group, it is
    /// incremented at each descent and checked against the maximum model depth.
    pub fn iter_model(&self, depth: usize) -> ModelIter<'_> {
        ModelIter::new(self, depth)
    }

    /// Iterate the element and wildcard particles of the model.
    pub fn iter_elements(&self, depth: usize) -> ElementsIter<'_> {
        ElementsIter::new(self, depth)
    }

    /// Returns the groups that represent the path to the enclosed particle,
    /// from this group down to the parent of the particle.
    ///
    /// Fails with a model error if *item* is not a particle of the model group.
    pub fn get_subgroups(&self, item: &GroupParticle) -> Result<Vec<&ModelGroup>> {
        self.get_subgroups_with(item, &Limits::default())
    }

    /// Same as [`ModelGroup::get_subgroups`], under the given limits.
    pub fn get_subgroups_with<'a>(
        &'a self,
        item: &GroupParticle,
        limits: &Limits,
    ) -> Result<Vec<&'a ModelGroup>> {
        let mut subgroups: Vec<(&'a ModelGroup, slice::Iter<'a, GroupParticle>)> = Vec::new();
        let mut group = self;
        let mut children = self.iter();

        loop {
            let Some(child) = children.next() else {
                match subgroups.pop() {
                    Some((parent, rest)) => {
                        group = parent;
                        children = rest;
                        continue;
                    }
                    None => {
                        tracing::trace!(particle = %item, group = %self, "particle not found in model");
                        return Err(ModelError::not_a_particle(item)
                            .with_component(self.to_string())
                            .into());
                    }
                }
            };

            if std::ptr::eq(child, item) {
                let mut path: Vec<&ModelGroup> = subgroups.iter().map(|(g, _)| *g).collect();
                path.push(group);
                return Ok(path);
            }

            if let GroupParticle::Group(child_group) = child {
                check_depth(limits, subgroups.len(), self)?;
                subgroups.push((group, children));
                group = child_group;
                children = child_group.iter();
            }
        }
    }

    /// Returns the overall min occurs of a particle in the model.
    pub fn overall_min_occurs(&self, item: &GroupParticle) -> Result<u32> {
        let mut min_occurs = item.min_occurs();

        for group in self.get_subgroups(item)? {
            if group.model() == ModelType::Choice && group.len() > 1 {
                return Ok(0);
            }
            min_occurs = min_occurs.saturating_mul(group.min_occurs());
        }

        Ok(min_occurs)
    }

    /// Returns the overall max occurs of a particle in the model.
    pub fn overall_max_occurs(&self, item: &GroupParticle) -> Result<Option<u32>> {
        let mut max_occurs = item.max_occurs();

        for group in self.get_subgroups(item)? {
            max_occurs = match (max_occurs, group.max_occurs()) {
                (Some(0), _) => return Ok(Some(0)),
                (None, _) => continue,
                (Some(_), None) => None,
                (Some(value), Some(group_max)) => value.checked_mul(group_max),
            };
        }

        Ok(max_occurs)
    }
}
