//! Occurrence model for comparison testing
//!
//! These structures describe a content model as a JSON tree: every
//! particle with its declared occurs, its effective occurs and, for
//! elements and wildcards, its overall occurs within the whole model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::validators::{GroupParticle, ModelGroup, Occurs, Particle};

/// Occurrence bounds as serialized (max_occurs None means unbounded)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OccursInfo {
    /// Minimum occurrences
    pub min_occurs: u32,

    /// Maximum occurrences (None means unbounded)
    pub max_occurs: Option<u32>,
}

impl From<Occurs> for OccursInfo {
    fn from(occurs: Occurs) -> Self {
        Self {
            min_occurs: occurs.min(),
            max_occurs: occurs.max(),
        }
    }
}

/// Particle information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticleInfo {
    /// Kind of particle: element, any, sequence, choice or all
    pub kind: String,

    /// Qualified name for element particles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared occurrence bounds
    pub occurs: OccursInfo,

    /// Occurrence bounds with the nested structure folded in
    pub effective_occurs: OccursInfo,

    /// Whether the particle can match empty content
    pub emptiable: bool,

    /// Whether the particle occurs at most once
    pub single: bool,

    /// Occurrence bounds with the enclosing groups folded in (leaves only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_occurs: Option<OccursInfo>,

    /// Nested particles for groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub particles: Vec<ParticleInfo>,
}

/// Complete dump of a content model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDump {
    /// The root model group
    pub root: ParticleInfo,
}

impl ModelDump {
    /// Build the dump of a model group
    pub fn from_group(group: &ModelGroup) -> Result<Self> {
        let limits = Limits::default();
        Ok(Self {
            root: group_info(group, group, 0, &limits)?,
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Encode(e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Iterate the particle infos of the dump in document order
    pub fn iter(&self) -> impl Iterator<Item = &ParticleInfo> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let info = stack.pop()?;
            stack.extend(info.particles.iter().rev());
            Some(info)
        })
    }
}

fn group_info(
    root: &ModelGroup,
    group: &ModelGroup,
    depth: usize,
    limits: &Limits,
) -> Result<ParticleInfo> {
    limits.check_model_depth(depth)?;

    let mut particles = Vec::with_capacity(group.len());
    for particle in group {
        particles.push(match particle {
            GroupParticle::Group(inner) => group_info(root, inner, depth + 1, limits)?,
            GroupParticle::Leaf(leaf) => ParticleInfo {
                kind: if leaf.name().is_some() { "element" } else { "any" }.to_string(),
                name: leaf.name().map(|name| name.to_string()),
                occurs: leaf.occurs().into(),
                effective_occurs: OccursInfo {
                    min_occurs: leaf.effective_min_occurs()?,
                    max_occurs: leaf.effective_max_occurs()?,
                },
                emptiable: leaf.is_emptiable(),
                single: leaf.is_single(),
                overall_occurs: Some(OccursInfo {
                    min_occurs: root.overall_min_occurs(particle)?,
                    max_occurs: root.overall_max_occurs(particle)?,
                }),
                particles: Vec::new(),
            },
        });
    }

    Ok(ParticleInfo {
        kind: group.model().to_string(),
        name: None,
        occurs: group.occurs().into(),
        effective_occurs: OccursInfo {
            min_occurs: group.effective_min_occurs_with(limits)?,
            max_occurs: group.effective_max_occurs_with(limits)?,
        },
        emptiable: group.is_emptiable(),
        single: group.is_single(),
        overall_occurs: None,
        particles,
    })
}
