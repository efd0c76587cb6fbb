// this_file: crates/typecast-layout/src/test_support.rs

//! Deterministic font and shaper doubles for layout tests
//!
//! Glyph ids are the code points of the characters they come from, with a
//! few rules layered on top so the interesting layout paths can be hit:
//!
//! - `fi` ligates into U+FB01 unless `liga` is off
//! - `b` after `a` becomes glyph `b + 3000` (a contextual alternate, 700 wide)
//! - `$` becomes glyph `$ + 1000` once `wght` exceeds 600
//! - `A` before `V` loses 80 units unless `kern` is off
//! - combining marks join the preceding cluster with zero advance
//! - Hebrew text, or an explicit RTL direction, comes out reversed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use typecast_core::{
    error::{OutlineError, Result},
    types::{BezierOrder, Direction, FontMetrics, GlyphId, ShapedGlyph},
    FontRef, OutlineSink, ResolvedVariations, Shaper, ShapingParams, VariationAxis,
};

pub const KERN_AV: f32 = 80.0;
pub const MARK_OFFSET: (f32, f32) = (-250.0, 100.0);
pub const ALTERNATE_OFFSET: u32 = 3000;
pub const BOLD_DOLLAR: u32 = '$' as u32 + 1000;

pub fn is_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c) || ('\u{0591}'..='\u{05C7}').contains(&c)
}

fn is_rtl(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

pub struct MockFont {
    pub metrics: FontMetrics,
    pub axes: Vec<VariationAxis>,
    pub gpos: Vec<String>,
    pub gsub: Vec<String>,
    pub vertical: Vec<(GlyphId, f32)>,
    pub upem: u16,
    pub draws: AtomicUsize,
}

impl MockFont {
    /// Static font with kerning
    pub fn latin() -> Self {
        Self {
            metrics: FontMetrics {
                has_vertical_metrics: false,
                cap_height: 700.0,
                ascender: 800.0,
                line_spacing: 1200.0,
            },
            axes: Vec::new(),
            gpos: vec!["kern".to_string(), "mark".to_string()],
            gsub: vec!["liga".to_string(), "ss01".to_string()],
            vertical: Vec::new(),
            upem: 1000,
            draws: AtomicUsize::new(0),
        }
    }

    /// Same font with a 100..900 weight axis
    pub fn variable() -> Self {
        Self {
            axes: vec![VariationAxis {
                tag: "wght".to_string(),
                name: Some("Weight".to_string()),
                min: 100.0,
                default: 400.0,
                max: 900.0,
            }],
            ..Self::latin()
        }
    }

    pub fn without_kerning(mut self) -> Self {
        self.gpos.retain(|tag| tag != "kern");
        self
    }

    pub fn draw_count(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl FontRef for MockFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        self.upem
    }

    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn axes(&self) -> &[VariationAxis] {
        &self.axes
    }

    fn positioning_features(&self) -> &[String] {
        &self.gpos
    }

    fn substitution_features(&self) -> &[String] {
        &self.gsub
    }

    fn bezier_order(&self) -> BezierOrder {
        BezierOrder::Quadratic
    }

    fn advance_width(&self, glyph_id: GlyphId, variations: &ResolvedVariations) -> Option<f32> {
        if char::from_u32(glyph_id).is_some_and(is_mark) {
            return Some(0.0);
        }
        let base = if glyph_id >= ALTERNATE_OFFSET { 700.0 } else { 500.0 };
        let wght = variations.get("wght").unwrap_or(400.0);
        Some(base + (wght - 400.0) * 0.5)
    }

    fn vertical_advance(&self, glyph_id: GlyphId) -> Option<f32> {
        self.vertical
            .iter()
            .find(|(gid, _)| *gid == glyph_id)
            .map(|(_, advance)| *advance)
    }

    fn draw_glyph(
        &self,
        glyph_id: GlyphId,
        variations: &ResolvedVariations,
        sink: &mut dyn OutlineSink,
    ) -> Result<()> {
        if glyph_id == 0 {
            return Err(OutlineError::MissingGlyph(0).into());
        }
        self.draws.fetch_add(1, Ordering::SeqCst);
        let width = self.advance_width(glyph_id, variations).unwrap_or(500.0);
        sink.move_to(0.0, 0.0);
        sink.line_to(width, 0.0);
        sink.line_to(width, 700.0);
        sink.line_to(0.0, 700.0);
        sink.close();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockShaper {
    pub calls: AtomicUsize,
}

impl MockShaper {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Shaper for MockShaper {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let kern = params.features.get("kern").copied().unwrap_or(true);
        let liga = params.features.get("liga").copied().unwrap_or(true);
        let wght = params.variations.get("wght").unwrap_or(400.0);
        let chars: Vec<char> = text.chars().collect();

        let mut glyphs = Vec::new();
        let mut base_cluster = 0u32;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            if liga && c == 'f' && next == Some('i') {
                base_cluster = i as u32;
                glyphs.push(glyph(0xFB01, base_cluster, font.as_ref(), params));
                i += 2;
                continue;
            }
            let mut gid = c as u32;
            if c == 'b' && i > 0 && chars[i - 1] == 'a' {
                gid += ALTERNATE_OFFSET;
            }
            if c == '$' && wght > 600.0 {
                gid = BOLD_DOLLAR;
            }
            if is_mark(c) {
                let mut mark = glyph(gid, base_cluster, font.as_ref(), params);
                mark.advance_x = 0.0;
                mark.offset_x = MARK_OFFSET.0;
                mark.offset_y = MARK_OFFSET.1;
                glyphs.push(mark);
            } else {
                base_cluster = i as u32;
                let mut g = glyph(gid, base_cluster, font.as_ref(), params);
                if kern && c == 'A' && next == Some('V') {
                    g.advance_x -= KERN_AV;
                }
                glyphs.push(g);
            }
            i += 1;
        }

        let rtl = match params.direction {
            Some(direction) => direction == Direction::RightToLeft,
            None => chars.iter().any(|&c| is_rtl(c)),
        };
        if rtl {
            glyphs.reverse();
        }
        Ok(glyphs)
    }
}

fn glyph(glyph_id: GlyphId, cluster: u32, font: &dyn FontRef, params: &ShapingParams) -> ShapedGlyph {
    ShapedGlyph {
        glyph_id,
        cluster,
        advance_x: font.advance_width(glyph_id, &params.variations).unwrap_or(0.0),
        offset_x: 0.0,
        offset_y: 0.0,
    }
}
