//! Comparison testing support for xmlschema-particles
//!
//! This module provides serializable dumps of content models, recording
//! declared and effective occurrence bounds, so that the arithmetic can be
//! compared with other XML Schema processors.

pub mod occurs_model;

pub use occurs_model::*;
