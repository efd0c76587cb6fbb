// this_file: crates/typecast-core/src/lib.rs

//! Typecast Core: shared vocabulary for glyph layout
//!
//! Text enters as lines, leaves as a layout skeleton plus one outline record
//! per unique glyph. This crate holds what every stage of that journey agrees
//! on: the data model, the traits backends implement, and the error type.
//!
//! ## The Pipeline
//!
//! 1. **Bidi segmentation** - A line splits into directionally uniform runs
//! 2. **Shaping** - Each run becomes positioned glyphs
//! 3. **Assembly** - Glyphs become a block → line → glyph skeleton
//! 4. **Outlines** - Each unique glyph becomes closed control-point contours
//!
//! ## The Traits That Power Everything
//!
//! - [`FontRef`] - Metrics, axes, advances, and outlines of one font face
//! - [`Shaper`] - Where characters become glyphs
//! - [`OutlineSink`] - Where outline commands land
//!
//! Data flows through the types in [`types`] and [`variation`].

use std::collections::BTreeMap;

pub mod error;
pub mod features;
pub mod traits;
pub mod variation;

pub use error::{Result, TypecastError};
pub use features::{feature_default, FeatureDefault};
pub use traits::{FontRef, OutlineSink, Shaper};
pub use variation::{
    GlyphIdentity, ResolvedVariations, VariationAxis, VariationSpace, VariationState,
};

/// The data structures that power the pipeline
pub mod types {
    use serde::{Deserialize, Serialize};

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way a run of text flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
    }

    impl Direction {
        pub fn is_rtl(self) -> bool {
            matches!(self, Direction::RightToLeft)
        }
    }

    /// A directionally uniform piece of one line, ready for the shaper
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TextRun {
        /// Run text in logical order
        pub text: String,
        pub direction: Direction,
        pub bidi_level: u8,
        /// Char offset of the run within its line
        pub start: usize,
    }

    impl TextRun {
        /// Length in chars
        pub fn len(&self) -> usize {
            self.text.chars().count()
        }

        pub fn is_empty(&self) -> bool {
            self.text.is_empty()
        }
    }

    /// Bookkeeping that travels with each bidi run
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RunInfo {
        pub run_id: usize,
        pub is_level_odd: bool,
        /// Base direction of the line the run came from
        pub line_is_rtl: bool,
    }

    /// A glyph as the shaper hands it over
    ///
    /// `cluster` is a char index into the shaped text. Distances are font units.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ShapedGlyph {
        pub glyph_id: GlyphId,
        pub cluster: u32,
        pub advance_x: f32,
        pub offset_x: f32,
        pub offset_y: f32,
    }

    /// Curve order of the font's outlines
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(into = "u8", try_from = "u8")]
    pub enum BezierOrder {
        /// Order 3: TrueType quadratic curves
        Quadratic,
        /// Order 4: CFF cubic curves
        Cubic,
    }

    impl BezierOrder {
        /// Bezier order as hosts count it (points per segment + 1)
        pub fn order(self) -> u8 {
            match self {
                BezierOrder::Quadratic => 3,
                BezierOrder::Cubic => 4,
            }
        }

        /// Floats recorded per outline segment
        pub fn stride(self) -> usize {
            match self {
                BezierOrder::Quadratic => 4,
                BezierOrder::Cubic => 6,
            }
        }
    }

    impl From<BezierOrder> for u8 {
        fn from(order: BezierOrder) -> u8 {
            order.order()
        }
    }

    impl TryFrom<u8> for BezierOrder {
        type Error = String;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            match value {
                3 => Ok(BezierOrder::Quadratic),
                4 => Ok(BezierOrder::Cubic),
                other => Err(format!("Unsupported bezier order {other}")),
            }
        }
    }

    /// Vertical font metrics, in font units
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct FontMetrics {
        /// Whether a `vmtx` table is present
        pub has_vertical_metrics: bool,
        /// OS/2 `sCapHeight`, 0 when absent
        pub cap_height: f32,
        /// OS/2 `sTypoAscender`, 0 when absent
        pub ascender: f32,
        /// Preferred distance between baselines
        pub line_spacing: f32,
    }
}

/// How shaping should behave
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapingParams {
    /// Feature toggles by four-letter tag
    pub features: BTreeMap<String, bool>,
    /// Coordinates for every axis of the font
    pub variations: ResolvedVariations,
    /// None lets the shaper guess from the text
    pub direction: Option<types::Direction>,
}

#[cfg(test)]
mod tests {
    use super::types::*;

    #[test]
    fn bezier_order_numbers() {
        assert_eq!(BezierOrder::Quadratic.order(), 3);
        assert_eq!(BezierOrder::Cubic.order(), 4);
        assert_eq!(BezierOrder::Quadratic.stride(), 4);
        assert_eq!(BezierOrder::Cubic.stride(), 6);
        assert_eq!(BezierOrder::try_from(4), Ok(BezierOrder::Cubic));
        assert!(BezierOrder::try_from(2).is_err());
    }

    #[test]
    fn run_length_counts_chars() {
        let run = TextRun {
            text: "مرحبا".to_string(),
            direction: Direction::RightToLeft,
            bidi_level: 1,
            start: 0,
        };
        assert_eq!(run.len(), 5);
        assert!(run.direction.is_rtl());
    }
}
