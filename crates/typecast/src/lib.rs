// this_file: crates/typecast/src/lib.rs

//! Typecast: glyph shaping and layout skeletons for 3D typography
//!
//! Typecast turns lines of text into two things a 3D host can build from:
//!
//! 1. A **skeleton**: block → lines → glyphs → glyph extensions, every glyph
//!    carrying its advance, height, shaper offset, and a tuple of ids
//! 2. **Geometry records**: the outline of each distinct glyph (id plus
//!    variation coordinates) as flat control-point contours
//!
//! Positioning itself is left to the host; the skeleton only says what sits
//! where in reading order and how big it is.
//!
//! # Example
//!
//! ```ignore
//! use typecast::prelude::*;
//!
//! let config = LayoutConfig::default().with_variation("wght", 700.0);
//! let layout = typecast::layout_file("MyFont.ttf", 0, "Hello\nworld", &config)?;
//! for record in layout.records() {
//!     println!("{:?}: {} contours", record.identity, record.contours.len());
//! }
//! ```
//!
//! # Crates
//!
//! - [`error`], [`traits`], [`types`]: data model and contracts
//! - [`bidi`]: per-line bidi run segmentation
//! - [`fontdb`]: font loading and metadata
//! - [`shape_hr`]: harfrust shaping backend
//! - [`outline`]: control-point pens and overlap removal
//! - [`layout`]: skeleton assembly and glyph deduplication

use std::path::Path;
use std::sync::Arc;

pub use typecast_bidi as bidi;
pub use typecast_fontdb as fontdb;
pub use typecast_layout as layout;
pub use typecast_outline as outline;
pub use typecast_shape_hr as shape_hr;

pub use typecast_core::{error, traits, types};

use typecast_core::{error::Result, FontRef};
use typecast_fontdb::{Font, FontCache};
use typecast_layout::{GlyphLayout, LayoutAssembler, LayoutConfig};
use typecast_shape_hr::HarfrustShaper;

/// Lay out `text` with an already loaded font and the harfrust shaper
pub fn layout_font(font: Arc<dyn FontRef>, text: &str, config: &LayoutConfig) -> Result<GlyphLayout> {
    LayoutAssembler::new(font, Arc::new(HarfrustShaper::new()), config.clone()).layout(text)
}

/// Load face `face_index` of the font at `path` and lay out `text`
pub fn layout_file(
    path: impl AsRef<Path>,
    face_index: u32,
    text: &str,
    config: &LayoutConfig,
) -> Result<GlyphLayout> {
    let path = path.as_ref();
    log::debug!("Loading {} (face {face_index})", path.display());
    let font = Font::from_file_index(path, face_index)?;
    layout_font(Arc::new(font), text, config)
}

/// Like [`layout_file`], reusing fonts already held by `cache`
pub fn layout_cached(
    cache: &FontCache,
    path: impl AsRef<Path>,
    face_index: u32,
    text: &str,
    config: &LayoutConfig,
) -> Result<GlyphLayout> {
    let font = cache.load(path, face_index)?;
    layout_font(font, text, config)
}

/// Common imports for typical usage
pub mod prelude {
    pub use typecast_core::{
        error::{Result, TypecastError},
        traits::{FontRef, OutlineSink, Shaper},
        types::{BezierOrder, Direction, ShapedGlyph},
        GlyphIdentity, ShapingParams, VariationSpace, VariationState,
    };
    pub use typecast_fontdb::{Font, FontCache};
    pub use typecast_layout::{
        GlyphGeometryRecord, GlyphIds, GlyphLayout, LayoutAssembler, LayoutConfig, NodeKind,
        PerGlyphInput, Skeleton,
    };
    pub use typecast_shape_hr::HarfrustShaper;
}
