// this_file: crates/typecast-core/src/variation.rs

//! Variation coordinates: what the caller asks for, what the font gets
//!
//! A [`VariationState`] is the raw request: axis tag to value, either in the
//! font's design space or in the unit space the host UI works with. Resolving
//! it against the font's axes yields [`ResolvedVariations`], which lists every
//! axis of the font exactly once and is what shapers, advance queries, and
//! outline extraction receive. [`GlyphIdentity`] is built from the resolved
//! form so that two requests producing the same outline always compare equal.

use std::collections::BTreeMap;
use std::hash::Hasher;

use rustc_hash::FxHasher;

use serde::{Deserialize, Serialize};

/// One axis of a variable font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationAxis {
    pub tag: String,
    pub name: Option<String>,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

impl VariationAxis {
    /// Map a 0..1 value onto this axis' design range
    pub fn from_unit(&self, value: f32) -> f32 {
        let t = value.clamp(0.0, 1.0);
        self.min + t * (self.max - self.min)
    }

    /// Map a design coordinate onto 0..1
    pub fn to_unit(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (value.clamp(self.min, self.max) - self.min) / span
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// How the numbers in a [`VariationState`] are meant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationSpace {
    /// Real axis coordinates, e.g. `wght = 700`
    #[default]
    Design,
    /// 0..1 between the axis minimum and maximum
    Unit,
}

/// Requested axis values, keyed by four-letter tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationState(BTreeMap<String, f32>);

impl VariationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tag: impl Into<String>, value: f32) {
        self.0.insert(tag.into(), value);
    }

    pub fn get(&self, tag: &str) -> Option<f32> {
        self.0.get(tag).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(tag, value)| (tag.as_str(), *value))
    }

    /// A copy of `self` with every entry of `other` written over it
    pub fn overlaid(&self, other: &VariationState) -> VariationState {
        let mut merged = self.clone();
        for (tag, value) in other.iter() {
            merged.set(tag, value);
        }
        merged
    }

    /// Resolve against the font's axes
    ///
    /// Every axis appears once, sorted by tag. Axes the state does not
    /// mention sit at their default; tags the font does not have are dropped.
    pub fn resolve(&self, axes: &[VariationAxis], space: VariationSpace) -> ResolvedVariations {
        let mut coords: Vec<(String, f32)> = axes
            .iter()
            .map(|axis| {
                let value = match (self.get(&axis.tag), space) {
                    (Some(v), VariationSpace::Design) => axis.clamp(v),
                    (Some(v), VariationSpace::Unit) => axis.from_unit(v),
                    (None, _) => axis.default,
                };
                (axis.tag.clone(), value)
            })
            .collect();
        coords.sort_by(|a, b| a.0.cmp(&b.0));
        coords.dedup_by(|a, b| a.0 == b.0);
        ResolvedVariations { coords }
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for VariationState {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(tag, value)| (tag.into(), value)).collect())
    }
}

/// Design-space coordinates for every axis of a font, sorted by tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVariations {
    coords: Vec<(String, f32)>,
}

impl ResolvedVariations {
    /// Coordinates for a font without variation axes
    pub fn none() -> Self {
        Self::default()
    }

    pub fn coords(&self) -> &[(String, f32)] {
        &self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn get(&self, tag: &str) -> Option<f32> {
        self.coords
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, value)| *value)
    }
}

/// Exact deduplication key for one glyph outline
///
/// Two identities are equal only when the glyph id and every coordinate bit
/// pattern match, so distinct shapes never merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlyphIdentity {
    pub glyph_id: u32,
    /// (axis tag, f32::to_bits)
    pub coords: Vec<(String, u32)>,
}

impl GlyphIdentity {
    pub fn new(glyph_id: u32, variations: &ResolvedVariations) -> Self {
        let coords = variations
            .coords()
            .iter()
            .map(|(tag, value)| {
                // -0.0 and 0.0 draw the same outline
                let value = if *value == 0.0 { 0.0f32 } else { *value };
                (tag.clone(), value.to_bits())
            })
            .collect();
        Self { glyph_id, coords }
    }

    /// FxHash digest of the glyph id and coordinates, used only as an
    /// informational id slot
    ///
    /// Unseeded and fed explicit bytes, so it repeats across runs and
    /// toolchains on targets of the same pointer width.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_u32(self.glyph_id);
        for (tag, bits) in &self.coords {
            hasher.write(tag.as_bytes());
            hasher.write_u8(0);
            hasher.write_u32(*bits);
        }
        hasher.finish()
    }
}
