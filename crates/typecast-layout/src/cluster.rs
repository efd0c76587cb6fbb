// this_file: crates/typecast-layout/src/cluster.rs

//! Cluster bookkeeping for one shaped run

use typecast_core::types::ShapedGlyph;

/// A run reads backwards when its last cluster sits before its first
pub fn is_reversed(glyphs: &[ShapedGlyph]) -> bool {
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => last.cluster < first.cluster,
        _ => false,
    }
}

/// Chars covered by each glyph
///
/// Forward runs measure to the next glyph's cluster, the last glyph taking
/// what is left of the run. Reversed runs emit marks before their base, so
/// the whole cluster goes to its last glyph in array order, measured to the
/// nearest earlier glyph of a different cluster (or the run end). Every
/// other glyph of a cluster gets zero, which keeps base and marks on one
/// stable index and makes the sizes of a run add up to the text it covers.
pub fn cluster_sizes(glyphs: &[ShapedGlyph], run_len: usize, reversed: bool) -> Vec<usize> {
    let clusters: Vec<usize> = glyphs.iter().map(|g| g.cluster as usize).collect();
    let last = clusters.len().saturating_sub(1);
    clusters
        .iter()
        .enumerate()
        .map(|(idx, &cluster)| {
            let bound = if reversed {
                if clusters.get(idx + 1) == Some(&cluster) {
                    return 0;
                }
                clusters[..idx]
                    .iter()
                    .rev()
                    .find(|&&earlier| earlier != cluster)
                    .copied()
                    .unwrap_or(run_len)
            } else if idx == last {
                run_len
            } else {
                clusters[idx + 1]
            };
            bound.saturating_sub(cluster)
        })
        .collect()
}

/// Whether the glyph at `idx` continues the cluster of its neighbour
///
/// Reversed runs look at the next glyph, forward runs at the previous one.
pub fn is_continuation(glyphs: &[ShapedGlyph], idx: usize, reversed: bool) -> bool {
    let cluster = glyphs[idx].cluster;
    let neighbour = if reversed {
        glyphs.get(idx + 1)
    } else {
        idx.checked_sub(1).and_then(|prev| glyphs.get(prev))
    };
    neighbour.is_some_and(|n| n.cluster == cluster)
}

/// How many glyphs before `idx` share its cluster
pub fn position_in_cluster(glyphs: &[ShapedGlyph], idx: usize) -> usize {
    let cluster = glyphs[idx].cluster;
    glyphs[..idx].iter().filter(|g| g.cluster == cluster).count()
}
