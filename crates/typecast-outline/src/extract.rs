// this_file: crates/typecast-outline/src/extract.rs

//! Glyph outline extraction into control-point contours.

use typecast_core::{
    error::Result,
    traits::FontRef,
    types::{BezierOrder, GlyphId},
    variation::ResolvedVariations,
};

use crate::pen::{Contour, ControlPointPen};
use crate::recorder::{replay, PathRecorder};
use crate::simplify::{OverlapRemover, PathSimplifier};

/// Draws glyphs into [`ControlPointPen`] records
///
/// In direct mode the font's outline goes straight into the pen. With
/// overlap removal the outline is first collected as a `kurbo` path, passed
/// through the simplifier, and the result replayed into the pen.
pub struct OutlineExtractor {
    order: BezierOrder,
    simplifier: Option<Box<dyn PathSimplifier>>,
}

impl OutlineExtractor {
    /// Direct extraction
    pub fn new(order: BezierOrder) -> Self {
        Self {
            order,
            simplifier: None,
        }
    }

    /// Overlap-removed extraction using the built-in [`OverlapRemover`]
    pub fn with_overlap_removal(order: BezierOrder) -> Self {
        Self::with_simplifier(order, Box::new(OverlapRemover::new()))
    }

    /// Overlap-removed extraction using a caller-supplied simplifier
    pub fn with_simplifier(order: BezierOrder, simplifier: Box<dyn PathSimplifier>) -> Self {
        Self {
            order,
            simplifier: Some(simplifier),
        }
    }

    pub fn order(&self) -> BezierOrder {
        self.order
    }

    pub fn removes_overlaps(&self) -> bool {
        self.simplifier.is_some()
    }

    pub fn extract(
        &self,
        font: &dyn FontRef,
        glyph_id: GlyphId,
        variations: &ResolvedVariations,
    ) -> Result<Vec<Contour>> {
        let mut pen = ControlPointPen::new(self.order);
        match &self.simplifier {
            None => font.draw_glyph(glyph_id, variations, &mut pen)?,
            Some(simplifier) => {
                let mut recorder = PathRecorder::new();
                font.draw_glyph(glyph_id, variations, &mut recorder)?;
                let simplified = simplifier.simplify(&recorder.finish())?;
                replay(&simplified, &mut pen);
            }
        }
        Ok(pen.finish())
    }
}
