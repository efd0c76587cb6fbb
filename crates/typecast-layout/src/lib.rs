// this_file: crates/typecast-layout/src/lib.rs

//! Typecast Layout: shaped runs into a layout skeleton
//!
//! [`LayoutAssembler`] walks text line by line, optionally splits each line
//! into bidi runs, shapes every run, and emits:
//!
//! - a [`Skeleton`] of block, line, glyph, and glyph-extension nodes, each
//!   glyph carrying its size, offset, and [`GlyphIds`]
//! - one [`GlyphGeometryRecord`] per distinct glyph identity, holding the
//!   control-point contours of its outline
//!
//! Per-glyph variation is supported: each glyph may get its own axis
//! values, in which case advances are re-derived and kerning is recovered
//! by reshaping small fragments.

pub mod assembler;
pub mod cluster;
pub mod config;
pub mod dedup;
pub mod metrics;
pub mod skeleton;

#[cfg(test)]
mod test_support;

pub use assembler::{GlyphLayout, LayoutAssembler};
pub use config::{LayoutConfig, PerGlyphInput};
pub use dedup::{GlyphDeduper, GlyphGeometryRecord};
pub use skeleton::{GlyphIds, GlyphPlacement, GlyphSize, NodeId, NodeKind, Skeleton, SkeletonNode};
