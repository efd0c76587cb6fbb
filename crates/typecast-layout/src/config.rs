// this_file: crates/typecast-layout/src/config.rs

//! Request configuration for [`LayoutAssembler`](crate::LayoutAssembler)

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use typecast_core::{
    error::{Result, TypecastError},
    VariationSpace, VariationState,
};

/// Variation values supplied per glyph, indexed by stable index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerGlyphInput {
    /// Set by the host when the points actually carry axis values
    pub has_axes: bool,
    pub points: Vec<VariationState>,
}

impl PerGlyphInput {
    pub fn new(points: Vec<VariationState>) -> Self {
        Self {
            has_axes: true,
            points,
        }
    }

    /// State for one stable index, None past the end
    pub fn at(&self, stable_index: usize) -> Option<&VariationState> {
        self.points.get(stable_index)
    }
}

/// Everything a layout request can be asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Feature toggles written over the defaults
    pub features: BTreeMap<String, bool>,
    /// Global axis values
    pub variations: VariationState,
    /// Space both `variations` and per-glyph points are expressed in
    pub variation_space: VariationSpace,
    pub per_glyph: Option<PerGlyphInput>,
    pub use_bidi_segmentation: bool,
    /// Reshape small substrings to keep kerning under per-glyph variation
    pub recover_kerning: bool,
    /// Reshape whole runs under per-glyph variation to pick up substitutions
    pub reprocess_for_glyph_substitution: bool,
    pub remove_overlaps: bool,
    /// Seed features from the built-in default-state table
    pub apply_feature_defaults: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            features: BTreeMap::new(),
            variations: VariationState::new(),
            variation_space: VariationSpace::Design,
            per_glyph: None,
            use_bidi_segmentation: false,
            recover_kerning: true,
            reprocess_for_glyph_substitution: false,
            remove_overlaps: false,
            apply_feature_defaults: true,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TypecastError::ConfigError(format!("Invalid layout config: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            TypecastError::ConfigError(msg) => {
                TypecastError::ConfigError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn with_feature(mut self, tag: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(tag.into(), enabled);
        self
    }

    pub fn with_variation(mut self, tag: impl Into<String>, value: f32) -> Self {
        self.variations.set(tag, value);
        self
    }

    pub fn with_per_glyph(mut self, per_glyph: PerGlyphInput) -> Self {
        self.per_glyph = Some(per_glyph);
        self
    }

    pub fn with_bidi(mut self, enabled: bool) -> Self {
        self.use_bidi_segmentation = enabled;
        self
    }

    pub fn with_overlap_removal(mut self, enabled: bool) -> Self {
        self.remove_overlaps = enabled;
        self
    }
}
