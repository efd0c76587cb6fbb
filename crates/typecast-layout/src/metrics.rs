// this_file: crates/typecast-layout/src/metrics.rs

//! Per-glyph box height

use typecast_core::{types::GlyphId, FontRef};

/// Height used when a font reports no usable vertical metric
pub const FALLBACK_HEIGHT: f32 = 750.0;

/// Vertical advance, then cap height, then typographic ascender
///
/// Zero counts as missing at every step.
pub fn glyph_height(font: &dyn FontRef, glyph_id: GlyphId) -> f32 {
    let metrics = font.metrics();
    let vertical = if metrics.has_vertical_metrics {
        font.vertical_advance(glyph_id).filter(|v| *v != 0.0)
    } else {
        None
    };
    vertical
        .or_else(|| Some(metrics.cap_height).filter(|v| *v != 0.0))
        .or_else(|| Some(metrics.ascender).filter(|v| *v != 0.0))
        .unwrap_or(FALLBACK_HEIGHT)
}
