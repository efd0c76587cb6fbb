// this_file: crates/typecast-core/src/traits.rs

//! The contracts that bind fonts, shapers, and pens together
//!
//! - [`FontRef`] - Your window into font data, metrics, and outlines
//! - [`Shaper`] - Where characters become glyphs
//! - [`OutlineSink`] - Where outline drawing commands land

use crate::{error::Result, types::*, variation::*, ShapingParams};
use std::sync::Arc;

/// Your key to unlocking font secrets
///
/// Everything the layout stage needs to know about a font beyond shaping:
/// metrics, variation axes, unkerned advances, and outlines.
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
///     metrics: FontMetrics,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///     // ...
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// Which face of a collection these bytes describe
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Vertical metrics used for glyph boxes and line spacing
    fn metrics(&self) -> &FontMetrics;

    /// Variation axes, empty for static fonts
    fn axes(&self) -> &[VariationAxis];

    /// Whether the face carries variation data at all
    fn has_variations(&self) -> bool {
        !self.axes().is_empty()
    }

    /// OpenType feature tags listed in the GPOS table
    fn positioning_features(&self) -> &[String];

    /// OpenType feature tags listed in the GSUB table
    fn substitution_features(&self) -> &[String] {
        &[]
    }

    /// Quadratic (TrueType) or cubic (CFF) outlines
    fn bezier_order(&self) -> BezierOrder;

    /// Unkerned horizontal advance in font units
    ///
    /// Returns None when the glyph is not in the font.
    fn advance_width(&self, glyph_id: GlyphId, variations: &ResolvedVariations) -> Option<f32>;

    /// Vertical advance from the vertical metrics table, if the font has one
    fn vertical_advance(&self, glyph_id: GlyphId) -> Option<f32>;

    /// Stream the glyph outline, in font units, into `sink`
    fn draw_glyph(
        &self,
        glyph_id: GlyphId,
        variations: &ResolvedVariations,
        sink: &mut dyn OutlineSink,
    ) -> Result<()>;
}

/// Where characters learn their positions
///
/// The shaper is a black box: given a run of text, feature toggles,
/// variation coordinates, and an optional direction, it returns glyphs in
/// visual order with char-index clusters and font-unit positions.
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Transform characters into positioned glyphs
    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>>;

    /// Flush any cached shaping data
    fn clear_cache(&self) {}
}

/// Receiver for outline drawing commands
///
/// Coordinates are font units, y pointing up. Every contour starts with
/// `move_to` and ends with `close`.
pub trait OutlineSink {
    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);

    fn close(&mut self);
}
