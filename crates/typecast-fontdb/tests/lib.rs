// this_file: crates/typecast-fontdb/tests/lib.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use typecast_core::traits::{FontRef, OutlineSink};
use typecast_core::types::BezierOrder;
use typecast_core::variation::{ResolvedVariations, VariationSpace};
use typecast_fontdb::{FeatureGroup, Font, FontCache};

const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn system_font_path() -> Option<PathBuf> {
    let path = Path::new(SYSTEM_FONT);
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        eprintln!("skipping: {SYSTEM_FONT} not installed");
        None
    }
}

#[derive(Default)]
struct CountingSink {
    moves: usize,
    closes: usize,
    segments: usize,
}

impl OutlineSink for CountingSink {
    fn move_to(&mut self, _x: f32, _y: f32) {
        self.moves += 1;
    }

    fn line_to(&mut self, _x: f32, _y: f32) {
        self.segments += 1;
    }

    fn quad_to(&mut self, _cx: f32, _cy: f32, _x: f32, _y: f32) {
        self.segments += 1;
    }

    fn curve_to(&mut self, _cx0: f32, _cy0: f32, _cx1: f32, _cy1: f32, _x: f32, _y: f32) {
        self.segments += 1;
    }

    fn close(&mut self) {
        self.closes += 1;
    }
}

#[test]
fn test_metrics_when_loading_real_font_then_match_read_fonts_tables() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");

    let data = std::fs::read(&path).expect("read font bytes");
    let read_font = ReadFontRef::from_index(&data, 0).expect("parse font");
    let expected_upem = read_font.head().map(|h| h.units_per_em()).unwrap_or(1000);
    let os2 = read_font.os2().expect("OS/2 table");

    assert_eq!(font.units_per_em(), expected_upem);
    assert_eq!(font.metrics().ascender, f32::from(os2.s_typo_ascender()));
    assert_eq!(
        font.metrics().cap_height,
        os2.s_cap_height().map(f32::from).unwrap_or(0.0)
    );
    assert!(font.best_line_spacing() > 0.0);
    assert_eq!(font.metrics().has_vertical_metrics, read_font.vmtx().is_ok());
}

#[test]
fn test_truetype_font_is_quadratic_and_static() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");
    assert_eq!(font.bezier_order(), BezierOrder::Quadratic);
    assert!(!font.has_variations());
    assert!(font.named_instances(VariationSpace::Unit).is_empty());
}

#[test]
fn test_feature_tables_are_listed() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");
    assert!(font.positioning_features().iter().any(|tag| tag == "kern"));
    assert!(font.gsub_features().windows(2).all(|pair| pair[0] < pair[1]));

    let toggles = font.feature_toggles(true);
    let kern = toggles.iter().find(|t| t.tag == "kern").expect("kern toggle");
    assert!(kern.enabled);
    assert_eq!(kern.group, FeatureGroup::General);
    // Internal features are never offered
    assert!(toggles.iter().all(|t| t.tag != "mark" && t.tag != "ccmp"));
}

#[test]
fn test_advance_and_outline_for_letter() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");
    let gid = font.glyph_id('O').expect("glyph for O");
    let none = ResolvedVariations::none();

    let advance = font.advance_width(gid, &none).expect("advance");
    assert!(advance > 0.0);

    let mut sink = CountingSink::default();
    font.draw_glyph(gid, &none, &mut sink).expect("draw O");
    // Outer and inner contour
    assert_eq!(sink.moves, 2);
    assert_eq!(sink.closes, 2);
    assert!(sink.segments > 0);
}

#[test]
fn test_drawing_out_of_range_glyph_fails() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");
    let mut sink = CountingSink::default();
    assert!(font
        .draw_glyph(u32::from(u16::MAX), &ResolvedVariations::none(), &mut sink)
        .is_err());
}

#[test]
fn test_cache_returns_same_font_until_invalidated() {
    let Some(path) = system_font_path() else {
        return;
    };
    let cache = FontCache::new();
    let first = cache.load(&path, 0).expect("first load");
    let second = cache.load(&path, 0).expect("second load");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    assert_eq!(cache.invalidate(&path), 1);
    assert!(cache.is_empty());

    let third = cache.load(&path, 0).expect("reload");
    assert!(!Arc::ptr_eq(&first, &third));
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_face_index_out_of_range() {
    let Some(path) = system_font_path() else {
        return;
    };
    let result = Font::from_file_index(&path, 3);
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("no face at index 3"), "{message}");
}
