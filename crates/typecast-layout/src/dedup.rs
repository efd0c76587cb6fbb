// this_file: crates/typecast-layout/src/dedup.rs

//! One outline per distinct glyph identity

use std::collections::HashMap;

use serde::Serialize;
use typecast_core::{error::Result, GlyphIdentity};
use typecast_outline::Contour;

use crate::skeleton::GlyphIds;

/// Geometry shared by every occurrence of one identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphGeometryRecord {
    pub identity: GlyphIdentity,
    /// Ids of the first occurrence
    pub ids: GlyphIds,
    pub contours: Vec<Contour>,
    pub references: usize,
}

/// Request-scoped deduplication of glyph outlines
///
/// Records keep the order in which identities were first seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlyphDeduper {
    records: Vec<GlyphGeometryRecord>,
    #[serde(skip)]
    index: HashMap<GlyphIdentity, usize>,
}

impl GlyphDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record index for `identity`, extracting contours on first sight only
    pub fn insert_with<F>(&mut self, identity: &GlyphIdentity, ids: GlyphIds, extract: F) -> Result<usize>
    where
        F: FnOnce() -> Result<Vec<Contour>>,
    {
        if let Some(&idx) = self.index.get(identity) {
            self.records[idx].references += 1;
            return Ok(idx);
        }
        let contours = extract()?;
        let idx = self.records.len();
        self.records.push(GlyphGeometryRecord {
            identity: identity.clone(),
            ids,
            contours,
            references: 1,
        });
        self.index.insert(identity.clone(), idx);
        Ok(idx)
    }

    pub fn get(&self, identity: &GlyphIdentity) -> Option<&GlyphGeometryRecord> {
        self.index.get(identity).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[GlyphGeometryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total occurrences across all identities
    pub fn total_references(&self) -> usize {
        self.records.iter().map(|r| r.references).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typecast_core::{error::OutlineError, VariationAxis, VariationState, VariationSpace};

    fn ids(stable_index: usize) -> GlyphIds {
        GlyphIds {
            line: 0,
            stable_index,
            true_index: stable_index,
            glyph_id: 7,
            source_index: stable_index,
            codepoint: 0x41,
            line_index: stable_index,
            identity_hash: 0,
            run_id: 0,
        }
    }

    fn identity(wght: f32) -> GlyphIdentity {
        let axes = [VariationAxis {
            tag: "wght".to_string(),
            name: None,
            min: 100.0,
            default: 400.0,
            max: 900.0,
        }];
        let vars = VariationState::from_iter([("wght", wght)]).resolve(&axes, VariationSpace::Design);
        GlyphIdentity::new(7, &vars)
    }

    #[test]
    fn extracts_once_per_identity() {
        let mut deduper = GlyphDeduper::new();
        let mut extractions = 0;
        for stable_index in 0..3 {
            let idx = deduper
                .insert_with(&identity(400.0), ids(stable_index), || {
                    extractions += 1;
                    Ok(vec![vec![0.0; 4]])
                })
                .unwrap();
            assert_eq!(idx, 0);
        }
        assert_eq!(extractions, 1);
        assert_eq!(deduper.len(), 1);
        let record = deduper.get(&identity(400.0)).unwrap();
        assert_eq!(record.references, 3);
        assert_eq!(record.ids.stable_index, 0);
    }

    #[test]
    fn nearly_equal_coordinates_stay_apart() {
        let mut deduper = GlyphDeduper::new();
        let a = deduper
            .insert_with(&identity(400.0), ids(0), || Ok(Vec::new()))
            .unwrap();
        let b = deduper
            .insert_with(&identity(400.000_03), ids(1), || Ok(Vec::new()))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(deduper.len(), 2);
        assert_eq!(deduper.total_references(), 2);
    }

    #[test]
    fn failed_extraction_leaves_no_record() {
        let mut deduper = GlyphDeduper::new();
        let result = deduper.insert_with(&identity(400.0), ids(0), || {
            Err(OutlineError::MissingGlyph(7).into())
        });
        assert!(result.is_err());
        assert!(deduper.is_empty());
    }
}
