// this_file: backends/typecast-shape-hr/src/lib.rs

//! Pure Rust text shaping backend using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz, providing text shaping without
//! any C dependencies. Glyphs come back in font units with clusters counted
//! in chars, which is what the layout stage indexes text by.

use std::sync::Arc;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, GlyphBuffer, ShaperData,
    ShaperInstance, Tag, UnicodeBuffer, Variation,
};

use typecast_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::{Direction, ShapedGlyph},
    ShapingParams,
};

/// Pure Rust text shaping powered by harfrust
#[derive(Debug, Default, Clone, Copy)]
pub struct HarfrustShaper;

impl HarfrustShaper {
    /// Creates a new harfrust shaper ready to handle any script
    pub fn new() -> Self {
        Self
    }

    /// Translates our direction enum to harfrust's format
    fn to_hr_direction(dir: Direction) -> HrDirection {
        match dir {
            Direction::LeftToRight => HrDirection::LeftToRight,
            Direction::RightToLeft => HrDirection::RightToLeft,
        }
    }

    /// Parse a 4-character tag string into a harfrust Tag
    fn parse_tag(tag_str: &str) -> Option<Tag> {
        let bytes: [u8; 4] = tag_str.as_bytes().try_into().ok()?;
        Some(Tag::new(&bytes))
    }

    /// Turn harfrust's output into glyphs with char-index clusters
    fn extract_glyphs(buffer: &GlyphBuffer, text: &str) -> Vec<ShapedGlyph> {
        // Byte offset of every char, so byte clusters map back to char indices
        let byte_starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        let to_char_index = |cluster: u32| -> u32 {
            let char_index = byte_starts
                .partition_point(|&byte| byte <= cluster as usize)
                .saturating_sub(1);
            char_index as u32
        };

        buffer
            .glyph_infos()
            .iter()
            .zip(buffer.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster: to_char_index(info.cluster),
                advance_x: pos.x_advance as f32,
                offset_x: pos.x_offset as f32,
                offset_y: pos.y_offset as f32,
            })
            .collect()
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "Harfrust"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let hr_font = HrFontRef::from_index(font.data(), font.face_index()).map_err(|err| {
            ShapingError::BackendError(format!("harfrust could not read the font: {err}"))
        })?;

        // ShaperData caches font tables for this call
        let shaper_data = ShaperData::new(&hr_font);

        let instance = if params.variations.is_empty() {
            None
        } else {
            let variations: Vec<Variation> = params
                .variations
                .coords()
                .iter()
                .filter_map(|(tag_str, value)| {
                    Self::parse_tag(tag_str).map(|tag| Variation { tag, value: *value })
                })
                .collect();
            Some(ShaperInstance::from_variations(&hr_font, variations))
        };

        // No point size: positions stay in font units
        let shaper = shaper_data
            .shaper(&hr_font)
            .instance(instance.as_ref())
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        if let Some(direction) = params.direction {
            buffer.set_direction(Self::to_hr_direction(direction));
        }
        buffer.guess_segment_properties();

        // Convert OpenType features (liga, kern, etc.) to harfrust format
        let features: Vec<Feature> = params
            .features
            .iter()
            .filter_map(|(name, enabled)| {
                Self::parse_tag(name).map(|tag| Feature {
                    tag,
                    value: u32::from(*enabled),
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect();

        let output = shaper.shape(buffer, &features);
        let glyphs = Self::extract_glyphs(&output, text);

        log::debug!(
            "Shaped {} chars into {} glyphs (direction {:?})",
            text.chars().count(),
            glyphs.len(),
            params.direction
        );

        Ok(glyphs)
    }
}
