// this_file: crates/typecast-layout/src/assembler.rs

//! Text in, skeleton and unique glyph geometry out

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use typecast_bidi::BidiSegmenter;
use typecast_core::{
    error::Result,
    features::with_defaults,
    types::{BezierOrder, Direction, ShapedGlyph},
    FontRef, GlyphIdentity, ResolvedVariations, Shaper, ShapingParams,
};
use typecast_outline::{OutlineExtractor, PathSimplifier};

use crate::cluster::{cluster_sizes, is_continuation, is_reversed, position_in_cluster};
use crate::config::{LayoutConfig, PerGlyphInput};
use crate::dedup::{GlyphDeduper, GlyphGeometryRecord};
use crate::metrics::glyph_height;
use crate::skeleton::{GlyphIds, GlyphPlacement, GlyphSize, NodeId, Skeleton};

/// Result of one layout request
#[derive(Debug, Clone, Serialize)]
pub struct GlyphLayout {
    pub skeleton: Skeleton,
    pub geometry: GlyphDeduper,
    /// 1000 / units per em
    pub glyph_scale: f32,
    /// Baseline distance in the scaled space, divided by 1000
    pub line_spacing: f32,
    pub varying_per_glyph: bool,
    pub bezier_order: BezierOrder,
}

impl GlyphLayout {
    pub fn records(&self) -> &[GlyphGeometryRecord] {
        self.geometry.records()
    }

    pub fn record(&self, identity: &GlyphIdentity) -> Option<&GlyphGeometryRecord> {
        self.geometry.get(identity)
    }

    /// Glyph and extension nodes in the skeleton
    pub fn glyph_count(&self) -> usize {
        self.skeleton.placements().len()
    }
}

/// Builds [`GlyphLayout`]s for one font, shaper, and configuration
///
/// ```ignore
/// let assembler = LayoutAssembler::new(font, Arc::new(HarfrustShaper::new()), LayoutConfig::default());
/// let layout = assembler.layout("Hello\nworld")?;
/// ```
pub struct LayoutAssembler {
    font: Arc<dyn FontRef>,
    shaper: Arc<dyn Shaper>,
    config: LayoutConfig,
    extractor: OutlineExtractor,
    segmenter: BidiSegmenter,
}

/// What stays fixed for a whole request
struct RequestPlan<'a> {
    features: BTreeMap<String, bool>,
    variations: ResolvedVariations,
    kerning: bool,
    /// Present only when per-glyph variation is active
    per_glyph: Option<&'a PerGlyphInput>,
}

/// Counters and outputs that grow across lines
#[derive(Default)]
struct RequestState {
    skeleton: Skeleton,
    deduper: GlyphDeduper,
    stable_index: usize,
    true_index: usize,
    line_start: usize,
    run_id_cursor: usize,
}

struct LineState {
    node: NodeId,
    line: usize,
    line_index: usize,
    last_standard: Option<NodeId>,
}

struct RunContext {
    text: String,
    chars: Vec<char>,
    direction: Option<Direction>,
    start: usize,
    run_id: usize,
}

impl RunContext {
    fn new(text: String, direction: Option<Direction>, start: usize, run_id: usize) -> Self {
        let chars = text.chars().collect();
        Self {
            text,
            chars,
            direction,
            start,
            run_id,
        }
    }
}

/// A glyph after per-glyph variation and kerning have been settled
struct ResolvedGlyph {
    glyph: ShapedGlyph,
    variations: ResolvedVariations,
    unkerned: Option<f32>,
}

/// Continuation glyphs waiting for the standard glyph they belong to
#[derive(Default)]
struct PendingAttachments(Vec<GlyphPlacement>);

impl PendingAttachments {
    fn push(&mut self, placement: GlyphPlacement) {
        self.0.push(placement);
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn drain(&mut self) -> std::vec::Drain<'_, GlyphPlacement> {
        self.0.drain(..)
    }

    fn into_inner(self) -> Vec<GlyphPlacement> {
        self.0
    }
}

/// Standard glyphs keep their offset only when it moves them
fn standard(mut placement: GlyphPlacement) -> GlyphPlacement {
    placement.offset = placement.offset.filter(|&(x, y)| x != 0.0 || y != 0.0);
    placement
}

impl LayoutAssembler {
    pub fn new(font: Arc<dyn FontRef>, shaper: Arc<dyn Shaper>, config: LayoutConfig) -> Self {
        let order = font.bezier_order();
        let extractor = if config.remove_overlaps {
            OutlineExtractor::with_overlap_removal(order)
        } else {
            OutlineExtractor::new(order)
        };
        Self {
            font,
            shaper,
            config,
            extractor,
            segmenter: BidiSegmenter::new(),
        }
    }

    /// Swap in a different simplifier for overlap removal
    ///
    /// Only takes effect when the configuration has `remove_overlaps` set;
    /// otherwise outlines keep being extracted directly.
    pub fn with_simplifier(mut self, simplifier: Box<dyn PathSimplifier>) -> Self {
        if self.config.remove_overlaps {
            self.extractor = OutlineExtractor::with_simplifier(self.font.bezier_order(), simplifier);
        } else {
            log::debug!("Ignoring custom simplifier, overlap removal is off");
        }
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn font(&self) -> &Arc<dyn FontRef> {
        &self.font
    }

    /// Lay out `text`, one skeleton line per `\n`-separated line
    ///
    /// Nothing is returned unless every line succeeds.
    pub fn layout(&self, text: &str) -> Result<GlyphLayout> {
        let plan = self.plan();
        let mut state = RequestState::default();

        for (line_no, line) in text.split('\n').enumerate() {
            self.layout_line(&plan, &mut state, line_no, line)?;
        }

        let glyph_scale = 1000.0 / f32::from(self.font.units_per_em().max(1));
        let layout = GlyphLayout {
            skeleton: state.skeleton,
            geometry: state.deduper,
            glyph_scale,
            line_spacing: self.font.metrics().line_spacing * glyph_scale / 1000.0,
            varying_per_glyph: plan.per_glyph.is_some(),
            bezier_order: self.font.bezier_order(),
        };
        log::info!(
            "Laid out {} glyphs ({} unique) with {}",
            layout.glyph_count(),
            layout.geometry.len(),
            self.shaper.name()
        );
        Ok(layout)
    }

    fn plan(&self) -> RequestPlan<'_> {
        let font = self.font.as_ref();
        let features = if self.config.apply_feature_defaults {
            let tags: BTreeSet<&str> = font
                .substitution_features()
                .iter()
                .chain(font.positioning_features())
                .map(String::as_str)
                .collect();
            with_defaults(tags, &self.config.features)
        } else {
            self.config.features.clone()
        };

        let kerning = self.config.recover_kerning
            && font.positioning_features().iter().any(|tag| tag == "kern")
            && self.config.features.get("kern").copied().unwrap_or(true);

        let per_glyph = self
            .config
            .per_glyph
            .as_ref()
            .filter(|input| input.has_axes && font.has_variations());

        let variations = self
            .config
            .variations
            .resolve(font.axes(), self.config.variation_space);

        log::debug!(
            "Request plan: kerning={kerning}, varying_per_glyph={}, {} features",
            per_glyph.is_some(),
            features.len()
        );

        RequestPlan {
            features,
            variations,
            kerning,
            per_glyph,
        }
    }

    fn layout_line(
        &self,
        plan: &RequestPlan<'_>,
        state: &mut RequestState,
        line_no: usize,
        line: &str,
    ) -> Result<()> {
        let node = state.skeleton.add_line(line_no);
        let mut line_state = LineState {
            node,
            line: line_no,
            line_index: 0,
            last_standard: None,
        };

        let runs: Vec<RunContext> = if self.config.use_bidi_segmentation {
            let segmentation = self.segmenter.segment(line, state.run_id_cursor);
            state.run_id_cursor = segmentation.next_run_id;
            segmentation
                .runs
                .into_iter()
                .zip(segmentation.run_info)
                .map(|(run, info)| {
                    RunContext::new(run.text, Some(run.direction), run.start, info.run_id)
                })
                .collect()
        } else if line.is_empty() {
            Vec::new()
        } else {
            vec![RunContext::new(line.to_string(), None, 0, line_no)]
        };

        for run in &runs {
            self.layout_run(plan, state, &mut line_state, run)?;
        }

        state.line_start += line.chars().count() + 1;
        state.stable_index += 1;
        Ok(())
    }

    fn layout_run(
        &self,
        plan: &RequestPlan<'_>,
        state: &mut RequestState,
        line: &mut LineState,
        run: &RunContext,
    ) -> Result<()> {
        let params = ShapingParams {
            features: plan.features.clone(),
            variations: plan.variations.clone(),
            direction: run.direction,
        };
        let glyphs = self.shaper.shape(&run.text, self.font.clone(), &params)?;
        if glyphs.is_empty() {
            log::debug!("Run {} shaped to nothing", run.run_id);
            return Ok(());
        }

        let reversed = is_reversed(&glyphs);
        let sizes = cluster_sizes(&glyphs, run.chars.len(), reversed);
        let mut pending = PendingAttachments::default();
        let mut anchor: Option<(NodeId, u32)> = None;

        for (idx, shaped) in glyphs.iter().enumerate() {
            let cluster_size = sizes[idx];
            let resolved =
                self.resolve_glyph(plan, state.stable_index, run, &glyphs, idx, cluster_size);
            let glyph_id = resolved.glyph.glyph_id;

            let height = glyph_height(self.font.as_ref(), glyph_id);
            let size = GlyphSize {
                advance: resolved.glyph.advance_x,
                height,
                unkerned: resolved.unkerned.map(|advance| (advance, height)),
            };

            let identity = GlyphIdentity::new(glyph_id, &resolved.variations);
            let cluster = shaped.cluster as usize;
            let ids = GlyphIds {
                line: line.line,
                stable_index: state.stable_index,
                true_index: state.true_index,
                glyph_id,
                source_index: state.line_start + run.start + cluster,
                codepoint: run.chars.get(cluster).map_or(0, |c| u32::from(*c)),
                line_index: line.line_index,
                identity_hash: identity.stable_hash(),
                run_id: run.run_id,
            };

            let font = self.font.as_ref();
            let extractor = &self.extractor;
            let variations = &resolved.variations;
            let geometry = state.deduper.insert_with(&identity, ids, || {
                extractor.extract(font, glyph_id, variations)
            })?;

            let placement = GlyphPlacement {
                size,
                ids,
                offset: Some((resolved.glyph.offset_x, resolved.glyph.offset_y)),
                identity,
                geometry,
            };

            if is_continuation(&glyphs, idx, reversed) {
                match anchor {
                    Some((node, anchor_cluster)) if !reversed && anchor_cluster == shaped.cluster => {
                        state.skeleton.add_extension(node, placement);
                    }
                    _ => pending.push(placement),
                }
            } else {
                let node = state.skeleton.add_glyph(line.node, standard(placement));
                for queued in pending.drain() {
                    state.skeleton.add_extension(node, queued);
                }
                anchor = Some((node, shaped.cluster));
                line.last_standard = Some(node);
            }

            state.stable_index += cluster_size;
            line.line_index += cluster_size;
            state.true_index += 1;
        }

        if !pending.is_empty() {
            attach_leftovers(&mut state.skeleton, line, pending);
        }
        Ok(())
    }

    /// Settle advance, glyph id, and variation for one shaped glyph
    fn resolve_glyph(
        &self,
        plan: &RequestPlan<'_>,
        stable_index: usize,
        run: &RunContext,
        glyphs: &[ShapedGlyph],
        idx: usize,
        cluster_size: usize,
    ) -> ResolvedGlyph {
        let shaped = glyphs[idx];

        let Some(per_glyph) = plan.per_glyph else {
            let unkerned = if plan.kerning {
                self.font.advance_width(shaped.glyph_id, &plan.variations)
            } else {
                None
            };
            return ResolvedGlyph {
                glyph: shaped,
                variations: plan.variations.clone(),
                unkerned,
            };
        };

        let state = match per_glyph.at(stable_index) {
            Some(point) => self.config.variations.overlaid(point),
            None => self.config.variations.clone(),
        };
        let variations = state.resolve(self.font.axes(), self.config.variation_space);

        let mut glyph = shaped;
        let mut settled = false;

        if self.config.reprocess_for_glyph_substitution {
            match self.reshape(&run.text, run.direction, plan, &variations) {
                Ok(reshaped) if reshaped.len() == glyphs.len() => {
                    glyph = reshaped[idx];
                    settled = true;
                }
                Ok(reshaped) => log::debug!(
                    "Reprocessing run {} gave {} glyphs instead of {}",
                    run.run_id,
                    reshaped.len(),
                    glyphs.len()
                ),
                Err(e) => log::debug!("Reprocessing run {} failed: {e}", run.run_id),
            }
        }

        if !settled {
            let recovered = if plan.kerning {
                self.recover_kerning(plan, run, glyphs, idx, cluster_size, &variations)
            } else {
                None
            };
            match recovered {
                Some(reglyph) => {
                    glyph.advance_x = reglyph.advance_x;
                    glyph.offset_x = reglyph.offset_x;
                    glyph.offset_y = reglyph.offset_y;
                }
                None => {
                    if let Some(advance) = self.font.advance_width(glyph.glyph_id, &variations) {
                        glyph.advance_x = advance;
                    }
                }
            }
        }

        let unkerned = if plan.kerning {
            self.font.advance_width(glyph.glyph_id, &variations)
        } else {
            None
        };
        ResolvedGlyph {
            glyph,
            variations,
            unkerned,
        }
    }

    /// Reshape the smallest fragment that still sees the next character
    ///
    /// Kerning spanning more than two characters is not recovered.
    fn recover_kerning(
        &self,
        plan: &RequestPlan<'_>,
        run: &RunContext,
        glyphs: &[ShapedGlyph],
        idx: usize,
        cluster_size: usize,
        variations: &ResolvedVariations,
    ) -> Option<ShapedGlyph> {
        let shaped = glyphs[idx];
        let cluster = shaped.cluster as usize;
        let end = (cluster + cluster_size + 1).min(run.chars.len());
        if cluster >= end {
            return None;
        }
        let fragment: String = run.chars[cluster..end].iter().collect();

        let reshaped = match self.reshape(&fragment, run.direction, plan, variations) {
            Ok(reshaped) => reshaped,
            Err(e) => {
                log::debug!("Kerning fragment {fragment:?} failed to shape: {e}");
                return None;
            }
        };

        let position = position_in_cluster(glyphs, idx);
        let candidate = reshaped
            .into_iter()
            .filter(|g| g.cluster == 0)
            .nth(position)?;
        if candidate.glyph_id == shaped.glyph_id {
            Some(candidate)
        } else {
            log::debug!(
                "Kerning fragment {fragment:?} produced glyph {} instead of {}, using unkerned advance",
                candidate.glyph_id,
                shaped.glyph_id
            );
            None
        }
    }

    fn reshape(
        &self,
        text: &str,
        direction: Option<Direction>,
        plan: &RequestPlan<'_>,
        variations: &ResolvedVariations,
    ) -> Result<Vec<ShapedGlyph>> {
        let params = ShapingParams {
            features: plan.features.clone(),
            variations: variations.clone(),
            direction,
        };
        self.shaper.shape(text, self.font.clone(), &params)
    }
}

/// Continuations with no standard glyph left in their run
///
/// They go to the latest standard glyph of the line. A line without one
/// promotes the first leftover to a standard glyph and hangs the rest off it.
fn attach_leftovers(skeleton: &mut Skeleton, line: &mut LineState, pending: PendingAttachments) {
    let mut queued = pending.into_inner().into_iter();
    let anchor = match line.last_standard {
        Some(node) => node,
        None => match queued.next() {
            Some(first) => {
                let node = skeleton.add_glyph(line.node, standard(first));
                line.last_standard = Some(node);
                node
            }
            None => return,
        },
    };
    for placement in queued {
        skeleton.add_extension(anchor, placement);
    }
}
