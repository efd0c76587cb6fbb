// this_file: crates/typecast-core/src/features.rs

//! Default states for OpenType features
//!
//! Some features only make sense when the shaper decides per glyph (initial
//! and final forms, mark positioning) and should never be toggled by a user.
//! Others are sensible user choices with a known default. Features missing
//! from the table are left to the caller.

use std::collections::BTreeMap;

/// How a feature behaves when nobody asks for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDefault {
    pub enabled: bool,
    /// Whether a host UI should offer a toggle for it
    pub exposed: bool,
}

const fn entry(tag: &'static str, enabled: bool, exposed: bool) -> (&'static str, FeatureDefault) {
    (tag, FeatureDefault { enabled, exposed })
}

/// Sorted by tag
pub const FEATURE_DEFAULTS: &[(&str, FeatureDefault)] = &[
    entry("REQD", true, false),
    entry("calt", true, true),
    entry("ccmp", true, false),
    entry("clig", true, true),
    entry("cpsp", true, false),
    entry("dist", true, false),
    entry("falt", true, false),
    entry("fina", true, false),
    entry("init", true, false),
    entry("jalt", true, true),
    entry("kern", true, true),
    entry("liga", true, true),
    entry("locl", true, false),
    entry("mark", true, false),
    entry("medi", true, false),
    entry("mkmk", true, false),
    entry("opbd", true, true),
    entry("rclt", true, false),
    entry("rlig", true, false),
    entry("rtlm", true, false),
    entry("rvrn", true, false),
    entry("size", true, true),
    entry("valt", true, true),
    entry("vert", false, true),
    entry("vkrn", true, true),
    entry("vrt2", false, true),
    entry("vrtr", false, true),
];

pub fn feature_default(tag: &str) -> Option<FeatureDefault> {
    FEATURE_DEFAULTS
        .binary_search_by(|(entry, _)| (*entry).cmp(tag))
        .ok()
        .map(|idx| FEATURE_DEFAULTS[idx].1)
}

/// Default states for the given font features, with `requested` written over them
///
/// Only tags from the defaults table get a default; anything else is left
/// out unless `requested` names it.
pub fn with_defaults<'a>(
    font_features: impl IntoIterator<Item = &'a str>,
    requested: &BTreeMap<String, bool>,
) -> BTreeMap<String, bool> {
    let mut merged: BTreeMap<String, bool> = font_features
        .into_iter()
        .filter_map(|tag| feature_default(tag).map(|default| (tag.to_string(), default.enabled)))
        .collect();
    for (tag, enabled) in requested {
        merged.insert(tag.clone(), *enabled);
    }
    merged
}
