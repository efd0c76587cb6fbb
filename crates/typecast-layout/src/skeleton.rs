// this_file: crates/typecast-layout/src/skeleton.rs

//! The block → line → glyph tree a layout request produces
//!
//! Nodes live in one arena and refer to each other by [`NodeId`]. The root is
//! always the block; lines hang off it in source order, glyphs off their
//! line in the order they were emitted, and extensions (marks and other
//! continuation glyphs) off the standard glyph they belong to.

use serde::Serialize;
use typecast_core::GlyphIdentity;

/// Index of a node in its [`Skeleton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The box a glyph occupies, in font units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphSize {
    pub advance: f32,
    pub height: f32,
    /// Advance and height without kerning, present when kerning is active
    pub unkerned: Option<(f32, f32)>,
}

/// Identifiers locating one glyph in the source text and the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GlyphIds {
    pub line: usize,
    /// Left-to-right, advanced by cluster size
    pub stable_index: usize,
    /// One per shaped glyph
    pub true_index: usize,
    pub glyph_id: u32,
    /// Char index of the glyph's cluster in the whole text
    pub source_index: usize,
    /// First char of the cluster, 0 when out of range
    pub codepoint: u32,
    /// Like `stable_index`, restarting on every line
    pub line_index: usize,
    pub identity_hash: u64,
    pub run_id: usize,
}

/// A glyph as it sits in the skeleton
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphPlacement {
    pub size: GlyphSize,
    pub ids: GlyphIds,
    /// Positioning offset from the shaper
    pub offset: Option<(f32, f32)>,
    pub identity: GlyphIdentity,
    /// Index into the layout's geometry records
    pub geometry: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Block,
    Line { index: usize },
    Glyph(GlyphPlacement),
    GlyphExtension(GlyphPlacement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SkeletonNode {
    pub fn placement(&self) -> Option<&GlyphPlacement> {
        match &self.kind {
            NodeKind::Glyph(placement) | NodeKind::GlyphExtension(placement) => Some(placement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skeleton {
    nodes: Vec<SkeletonNode>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    /// A skeleton holding only the block root
    pub fn new() -> Self {
        Self {
            nodes: vec![SkeletonNode {
                kind: NodeKind::Block,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &SkeletonNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SkeletonNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    pub fn add_line(&mut self, index: usize) -> NodeId {
        self.push(self.root(), NodeKind::Line { index })
    }

    pub fn add_glyph(&mut self, line: NodeId, placement: GlyphPlacement) -> NodeId {
        self.push(line, NodeKind::Glyph(placement))
    }

    pub fn add_extension(&mut self, glyph: NodeId, placement: GlyphPlacement) -> NodeId {
        self.push(glyph, NodeKind::GlyphExtension(placement))
    }

    pub fn lines(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children(self.root())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// Every glyph placement, extensions right after their anchor
    pub fn placements(&self) -> Vec<&GlyphPlacement> {
        let mut out = Vec::new();
        for line in self.lines() {
            for glyph in self.children(line) {
                out.extend(self.node(glyph).placement());
                for ext in self.children(glyph) {
                    out.extend(self.node(ext).placement());
                }
            }
        }
        out
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SkeletonNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}
