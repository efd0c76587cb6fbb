// this_file: crates/typecast-outline/src/lib.rs

//! Glyph outlines as flat control-point contours
//!
//! - [`ControlPointPen`] records outline commands with a fixed stride per
//!   segment, quadratic or cubic
//! - [`OutlineExtractor`] draws a glyph from a font into a pen, optionally
//!   removing overlaps first
//! - [`OverlapRemover`] is the built-in [`PathSimplifier`]

pub mod extract;
pub mod pen;
pub mod recorder;
pub mod simplify;

pub use extract::OutlineExtractor;
pub use pen::{Contour, ControlPointPen};
pub use recorder::{replay, PathRecorder};
pub use simplify::{signed_area, OverlapRemover, PathSimplifier};
