// this_file: crates/typecast-fontdb/src/lib.rs

//! Where fonts come to life: loading and inspection for Typecast
//!
//! A [`Font`] owns the raw bytes of one face and answers everything the
//! layout stage asks about it: metrics, variation axes, named instances,
//! OpenType feature tables, unkerned advances, and outlines.
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create a parser view on demand. This keeps
//! `Font` free of self-references and works the same for single fonts and
//! TTC collections.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use read_fonts::tables::layout::FeatureParams;
use read_fonts::types::{GlyphId as ReadGlyphId, Tag};
use read_fonts::{FontRef as ReadFontRef, ReadError, TableProvider};
use skrifa::instance::{Location, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::string::StringId;
use skrifa::MetadataProvider;

use typecast_core::{
    error::{FontLoadError, OutlineError, Result},
    features::feature_default,
    traits::{FontRef, OutlineSink},
    types::{BezierOrder, FontMetrics, GlyphId},
    variation::{ResolvedVariations, VariationAxis, VariationSpace, VariationState},
};

pub mod font_cache;

pub use font_cache::FontCache;

/// OS/2 fsSelection bit 7
const USE_TYPO_METRICS: u16 = 1 << 7;

/// A font face brought into memory
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    path: Option<PathBuf>,
    units_per_em: u16,
    metrics: FontMetrics,
    axes: Vec<VariationAxis>,
    gsub_features: Vec<String>,
    gpos_features: Vec<String>,
    bezier_order: BezierOrder,
}

/// A preset from the font's `fvar` table
#[derive(Debug, Clone, PartialEq)]
pub struct NamedInstance {
    pub name: String,
    pub coords: VariationState,
}

/// Which folder a host UI should put a feature toggle in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGroup {
    General,
    StylisticSet,
    CharacterVariant,
}

/// One user-facing feature switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureToggle {
    pub tag: String,
    pub label: String,
    pub enabled: bool,
    pub group: FeatureGroup,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;

        Self::load(data, face_index, Some(path.to_path_buf()))
    }

    /// Turns raw font bytes into a font
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        Self::load(data, face_index, None)
    }

    fn load(data: Vec<u8>, face_index: u32, path: Option<PathBuf>) -> Result<Self> {
        let label = path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());

        let font_ref = ReadFontRef::from_index(&data, face_index).map_err(|err| match err {
            ReadError::InvalidCollectionIndex(_) => FontLoadError::FaceIndexOutOfRange {
                path: label.clone(),
                index: face_index,
            },
            _ => FontLoadError::InvalidData(label.clone()),
        })?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let metrics = read_metrics(&font_ref, units_per_em);
        let axes = read_axes(&font_ref);
        let gsub_features = font_ref
            .gsub()
            .ok()
            .and_then(|gsub| gsub.feature_list().ok())
            .map(|list| feature_tags(list.feature_records().iter().map(|r| r.feature_tag())))
            .unwrap_or_default();
        let gpos_features = font_ref
            .gpos()
            .ok()
            .and_then(|gpos| gpos.feature_list().ok())
            .map(|list| feature_tags(list.feature_records().iter().map(|r| r.feature_tag())))
            .unwrap_or_default();
        let bezier_order = detect_bezier_order(&data, &font_ref, path.as_deref());

        log::debug!(
            "Loaded {} (face {}): upem {}, {} axes, bezier order {}",
            label,
            face_index,
            units_per_em,
            axes.len(),
            bezier_order.order()
        );

        Ok(Font {
            data,
            face_index,
            path,
            units_per_em,
            metrics,
            axes,
            gsub_features,
            gpos_features,
            bezier_order,
        })
    }

    /// Creates a parser view on demand
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Where the font was loaded from, if it came from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Counts how many different glyphs this font contains
    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }

    pub fn family_name(&self) -> Option<String> {
        self.name_string(StringId::FAMILY_NAME)
    }

    pub fn subfamily_name(&self) -> Option<String> {
        self.name_string(StringId::SUBFAMILY_NAME)
    }

    fn name_string(&self, id: StringId) -> Option<String> {
        let font = self.font_ref()?;
        let name = font.localized_strings(id).english_or_first()?;
        Some(name.to_string())
    }

    /// Preferred distance between baselines, in font units
    pub fn best_line_spacing(&self) -> f32 {
        self.metrics.line_spacing
    }

    /// Feature tags from the GSUB table, sorted
    pub fn gsub_features(&self) -> &[String] {
        &self.gsub_features
    }

    /// Feature tags from the GPOS table, sorted
    pub fn gpos_features(&self) -> &[String] {
        &self.gpos_features
    }

    /// Named instances in `fvar` order
    ///
    /// With [`VariationSpace::Unit`] every coordinate is mapped to 0..1
    /// between the axis minimum and maximum.
    pub fn named_instances(&self, space: VariationSpace) -> Vec<NamedInstance> {
        let Some(font) = self.font_ref() else {
            return Vec::new();
        };

        font.named_instances()
            .iter()
            .map(|instance| {
                let name = font
                    .localized_strings(instance.subfamily_name_id())
                    .english_or_first()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let coords = self
                    .axes
                    .iter()
                    .zip(instance.user_coords())
                    .map(|(axis, value)| {
                        let value = match space {
                            VariationSpace::Design => value,
                            VariationSpace::Unit => axis.to_unit(value),
                        };
                        (axis.tag.clone(), value)
                    })
                    .collect();
                NamedInstance { name, coords }
            })
            .collect()
    }

    /// UI names of the stylistic sets (`ss01`..`ss20`) that declare one
    pub fn stylistic_set_names(&self) -> BTreeMap<String, String> {
        let mut names = BTreeMap::new();
        let Some(font) = self.font_ref() else {
            return names;
        };
        let Ok(list) = font.gsub().and_then(|gsub| gsub.feature_list()) else {
            return names;
        };

        for record in list.feature_records() {
            let tag = record.feature_tag().to_string();
            if !is_stylistic_set(&tag) || names.contains_key(&tag) {
                continue;
            }
            let Ok(feature) = record.feature(list.offset_data()) else {
                continue;
            };
            let Some(Ok(FeatureParams::StylisticSet(params))) = feature.feature_params() else {
                continue;
            };
            if let Some(name) = font
                .localized_strings(params.ui_name_id())
                .english_or_first()
            {
                names.insert(tag, name.to_string());
            }
        }
        names
    }

    /// Feature switches a host UI should offer for this font
    ///
    /// Covers every GSUB and GPOS feature, plus the whole defaults table when
    /// `include_defaults` is set (some fonts apply features they never list).
    /// Features the defaults table marks as internal are left out. Stylistic
    /// sets are labelled with their UI names and start disabled.
    pub fn feature_toggles(&self, include_defaults: bool) -> Vec<FeatureToggle> {
        let mut tags: BTreeSet<String> = self
            .gsub_features
            .iter()
            .chain(&self.gpos_features)
            .cloned()
            .collect();
        if include_defaults {
            tags.extend(
                typecast_core::features::FEATURE_DEFAULTS
                    .iter()
                    .map(|(tag, _)| tag.to_string()),
            );
        }

        let ss_names = self.stylistic_set_names();
        let mut general = Vec::new();
        let mut stylistic = Vec::new();

        for tag in tags {
            if is_stylistic_set(&tag) {
                let label = match ss_names.get(&tag) {
                    Some(name) => format!("{tag}: {name}"),
                    None => tag.clone(),
                };
                stylistic.push(FeatureToggle {
                    tag,
                    label,
                    enabled: false,
                    group: FeatureGroup::StylisticSet,
                });
                continue;
            }

            let (enabled, exposed) = feature_default(&tag)
                .map(|d| (d.enabled, d.exposed))
                .unwrap_or((false, true));
            if !exposed {
                continue;
            }
            let group = if tag.len() == 4 && tag.starts_with("cv") {
                FeatureGroup::CharacterVariant
            } else {
                FeatureGroup::General
            };
            general.push(FeatureToggle {
                label: tag.clone(),
                tag,
                enabled,
                group,
            });
        }

        general.extend(stylistic);
        general
    }

    fn location(&self, variations: &ResolvedVariations) -> Option<Location> {
        let font = self.font_ref()?;
        let settings: Vec<(&str, f32)> = variations
            .coords()
            .iter()
            .map(|(tag, value)| (tag.as_str(), *value))
            .collect();
        Some(font.axes().location(settings))
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn axes(&self) -> &[VariationAxis] {
        &self.axes
    }

    fn positioning_features(&self) -> &[String] {
        &self.gpos_features
    }

    fn substitution_features(&self) -> &[String] {
        &self.gsub_features
    }

    fn bezier_order(&self) -> BezierOrder {
        self.bezier_order
    }

    fn advance_width(&self, glyph_id: GlyphId, variations: &ResolvedVariations) -> Option<f32> {
        let font = self.font_ref()?;
        let location = self.location(variations)?;
        font.glyph_metrics(Size::unscaled(), &location)
            .advance_width(ReadGlyphId::new(glyph_id))
    }

    fn vertical_advance(&self, glyph_id: GlyphId) -> Option<f32> {
        let font = self.font_ref()?;
        let vmtx = font.vmtx().ok()?;
        vmtx.advance(ReadGlyphId::new(glyph_id)).map(f32::from)
    }

    fn draw_glyph(
        &self,
        glyph_id: GlyphId,
        variations: &ResolvedVariations,
        sink: &mut dyn OutlineSink,
    ) -> Result<()> {
        let font = self.font_ref().ok_or(OutlineError::MissingGlyph(glyph_id))?;
        let location = self
            .location(variations)
            .ok_or(OutlineError::MissingGlyph(glyph_id))?;
        let glyph = font
            .outline_glyphs()
            .get(ReadGlyphId::new(glyph_id))
            .ok_or(OutlineError::MissingGlyph(glyph_id))?;

        let settings = DrawSettings::unhinted(Size::unscaled(), &location);
        glyph
            .draw(settings, &mut SinkPen(sink))
            .map_err(|err| OutlineError::DrawFailed {
                glyph_id,
                reason: err.to_string(),
            })?;
        Ok(())
    }
}

/// Forwards skrifa's pen calls to an [`OutlineSink`]
struct SinkPen<'a>(&'a mut dyn OutlineSink);

impl OutlinePen for SinkPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

fn read_metrics(font: &ReadFontRef<'_>, units_per_em: u16) -> FontMetrics {
    let os2 = font.os2().ok();
    FontMetrics {
        has_vertical_metrics: font.vmtx().is_ok(),
        cap_height: os2
            .as_ref()
            .and_then(|os2| os2.s_cap_height())
            .map(f32::from)
            .unwrap_or(0.0),
        ascender: os2
            .as_ref()
            .map(|os2| f32::from(os2.s_typo_ascender()))
            .unwrap_or(0.0),
        line_spacing: best_line_spacing(font, units_per_em),
    }
}

/// OS/2 typo metrics when the font asks for them, else win metrics, then
/// hhea, then the em size.
fn best_line_spacing(font: &ReadFontRef<'_>, units_per_em: u16) -> f32 {
    if let Ok(os2) = font.os2() {
        let spacing = if os2.fs_selection().bits() & USE_TYPO_METRICS != 0 {
            i32::from(os2.s_typo_ascender()) - i32::from(os2.s_typo_descender())
                + i32::from(os2.s_typo_line_gap())
        } else {
            i32::from(os2.us_win_ascent()) + i32::from(os2.us_win_descent())
        };
        if spacing > 0 {
            return spacing as f32;
        }
    }
    if let Ok(hhea) = font.hhea() {
        let spacing = i32::from(hhea.ascender().to_i16()) - i32::from(hhea.descender().to_i16())
            + i32::from(hhea.line_gap().to_i16());
        if spacing > 0 {
            return spacing as f32;
        }
    }
    f32::from(units_per_em)
}

fn read_axes(font: &ReadFontRef<'_>) -> Vec<VariationAxis> {
    font.axes()
        .iter()
        .map(|axis| VariationAxis {
            tag: axis.tag().to_string(),
            name: font
                .localized_strings(axis.name_id())
                .english_or_first()
                .map(|s| s.to_string()),
            min: axis.min_value(),
            default: axis.default_value(),
            max: axis.max_value(),
        })
        .collect()
}

/// CFF outlines are cubic. Without CFF tables fall back to the file suffix.
fn detect_bezier_order(data: &[u8], font: &ReadFontRef<'_>, path: Option<&Path>) -> BezierOrder {
    let has_cff = font.table_data(Tag::new(b"CFF ")).is_some()
        || font.table_data(Tag::new(b"CFF2")).is_some();
    if has_cff || data.starts_with(b"OTTO") {
        return BezierOrder::Cubic;
    }
    let is_otf = path
        .and_then(|p| p.extension())
        .map(|ext| ext.eq_ignore_ascii_case("otf"))
        .unwrap_or(false);
    if is_otf {
        BezierOrder::Cubic
    } else {
        BezierOrder::Quadratic
    }
}

fn feature_tags(tags: impl Iterator<Item = Tag>) -> Vec<String> {
    let unique: BTreeSet<String> = tags.map(|tag| tag.to_string()).collect();
    unique.into_iter().collect()
}

fn is_stylistic_set(tag: &str) -> bool {
    tag.len() == 4 && tag.starts_with("ss") && tag[2..].chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_from_invalid_data() {
        let result = Font::from_data(vec![0; 100]);
        assert!(matches!(
            result,
            Err(typecast_core::TypecastError::FontUnavailable(
                FontLoadError::InvalidData(_)
            ))
        ));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = Font::from_file("/definitely/not/here.ttf")
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert_eq!(err, "Font \"/definitely/not/here.ttf\" does not exist");
    }

    #[test]
    fn test_stylistic_set_tags() {
        assert!(is_stylistic_set("ss01"));
        assert!(is_stylistic_set("ss20"));
        assert!(!is_stylistic_set("ssty"));
        assert!(!is_stylistic_set("salt"));
    }

    #[test]
    fn test_feature_tags_dedup_and_sort() {
        let tags = feature_tags(
            [Tag::new(b"liga"), Tag::new(b"kern"), Tag::new(b"liga")].into_iter(),
        );
        assert_eq!(tags, vec!["kern".to_string(), "liga".to_string()]);
    }
}
