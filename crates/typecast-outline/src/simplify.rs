// this_file: crates/typecast-outline/src/simplify.rs

//! Overlap removal.
//!
//! Variable fonts routinely draw glyphs as overlapping contours (a stem and
//! a bowl laid on top of each other). Hosts that extrude or fill outlines
//! need the union instead, so the overlap-removed extraction runs every
//! outline through a [`PathSimplifier`].

use std::collections::{BTreeMap, HashMap};

use kurbo::{BezPath, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez, Vec2};
use typecast_core::error::{OutlineError, Result};

/// Turns an outline into an equivalent one without overlapping contours
pub trait PathSimplifier: Send + Sync {
    fn simplify(&self, path: &BezPath) -> Result<BezPath>;
}

/// Snap grid, in steps per font unit
const GRID: f64 = 1024.0;
/// Parameter slack when deciding whether an intersection is inside a segment
const PARAM_EPS: f64 = 1e-9;
/// How far off an edge the fill samples sit
const SAMPLE_OFFSET: f64 = 1e-3;
/// Points closer than this to the chord of their neighbours are dropped
const COLLINEAR_EPS: f64 = 1e-3;
/// Upper bound on the chords a single curve is cut into
const MAX_CHORDS: usize = 256;

/// Built-in [`PathSimplifier`] using the non-zero fill rule
///
/// Curves are cut into chords to find the boundary, then every boundary
/// stretch that runs along one source curve is written back as the matching
/// piece of that curve, in its original order. Outer contours come out
/// clockwise and holes counter-clockwise (y up), i.e. the filled region is
/// always on the right-hand side.
#[derive(Debug, Clone, Copy)]
pub struct OverlapRemover {
    tolerance: f64,
}

impl Default for OverlapRemover {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl OverlapRemover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum distance, in font units, between a curve and its chords
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(1e-4),
        }
    }
}

impl PathSimplifier for OverlapRemover {
    fn simplify(&self, path: &BezPath) -> Result<BezPath> {
        let curves = closed_segments(path)?;
        let chords = cut_into_chords(&curves, self.tolerance);
        if chords.is_empty() {
            return Ok(BezPath::new());
        }

        let segments: Vec<(Point, Point)> =
            chords.iter().map(|chord| (chord.start, chord.end)).collect();
        let mut graph = EdgeGraph::default();
        for (chord, mut splits) in chords.iter().zip(split_points(&segments)) {
            splits.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut previous = (graph.vertex(chord.start), 0.0);
            for (param, point) in splits {
                let next = (graph.vertex(point), param);
                graph.add_edge(previous.0, next.0, chord.origin.part(previous.1, next.1));
                previous = next;
            }
            let end = graph.vertex(chord.end);
            graph.add_edge(previous.0, end, chord.origin.part(previous.1, 1.0));
        }

        let boundary = graph.boundary_edges();
        let loops = chain_loops(&boundary, graph.vertices.len());

        let mut out = BezPath::new();
        let mut kept = 0;
        for ring in loops {
            let points: Vec<Point> = ring
                .iter()
                .map(|&edge| graph.vertices[boundary[edge].from])
                .collect();
            if points.len() < 3 || signed_area(&points).abs() < 1e-9 {
                continue;
            }
            let spans = drop_collinear(contour_spans(&ring, &boundary, &graph.vertices, &curves));
            let Some(last) = spans.last() else {
                continue;
            };

            out.move_to(last.end);
            for (idx, span) in spans.iter().enumerate() {
                match span.kind {
                    // Closing line is implied by close_path
                    SpanKind::Line if idx + 1 == spans.len() => {}
                    SpanKind::Line => out.line_to(span.end),
                    SpanKind::Quad(control) => out.quad_to(control, span.end),
                    SpanKind::Cubic(c0, c1) => out.curve_to(c0, c1, span.end),
                }
            }
            out.close_path();
            kept += 1;
        }

        let contours = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        log::debug!(
            "Overlap removal: {} input contour(s), {} output contour(s)",
            contours,
            kept
        );
        Ok(out)
    }
}

/// Where a chord or edge lies on the source outline
#[derive(Debug, Clone, Copy, PartialEq)]
enum Origin {
    Line,
    /// Parameter span of source curve `seg`, in travel order
    Curve { seg: usize, from: f64, to: f64 },
}

impl Origin {
    /// The stretch between fractions `a` and `b` of this span
    fn part(self, a: f64, b: f64) -> Origin {
        match self {
            Origin::Line => Origin::Line,
            Origin::Curve { seg, from, to } => {
                let at = |f: f64| {
                    if f <= 0.0 {
                        from
                    } else if f >= 1.0 {
                        to
                    } else {
                        from + (to - from) * f
                    }
                };
                Origin::Curve {
                    seg,
                    from: at(a),
                    to: at(b),
                }
            }
        }
    }

    fn reversed(self) -> Origin {
        match self {
            Origin::Line => Origin::Line,
            Origin::Curve { seg, from, to } => Origin::Curve {
                seg,
                from: to,
                to: from,
            },
        }
    }

    /// Whether `next` picks up on the same curve exactly where this stops
    fn continues_into(self, next: Origin) -> bool {
        match (self, next) {
            (
                Origin::Curve { seg, from, to },
                Origin::Curve {
                    seg: next_seg,
                    from: next_from,
                    to: next_to,
                },
            ) => seg == next_seg && to == next_from && (to - from) * (next_to - next_from) > 0.0,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Chord {
    start: Point,
    end: Point,
    origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpanKind {
    Line,
    Quad(Point),
    Cubic(Point, Point),
}

/// One output element, starting where the previous one ends
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    end: Point,
    kind: SpanKind,
}

#[derive(Debug, Clone, Copy)]
struct BoundaryEdge {
    from: usize,
    to: usize,
    origin: Origin,
}

fn snap(point: Point) -> Point {
    Point::new(
        (point.x * GRID).round() / GRID,
        (point.y * GRID).round() / GRID,
    )
}

fn grid_key(point: Point) -> (i64, i64) {
    ((point.x * GRID).round() as i64, (point.y * GRID).round() as i64)
}

/// Source segments, with every subpath closed by a line if it isn't already
fn closed_segments(path: &BezPath) -> Result<Vec<PathSeg>> {
    let finite = path.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        PathEl::QuadTo(c, p) => c.is_finite() && p.is_finite(),
        PathEl::CurveTo(c0, c1, p) => c0.is_finite() && c1.is_finite() && p.is_finite(),
        PathEl::ClosePath => true,
    });
    if !finite {
        return Err(OutlineError::SimplifyFailed("outline has non-finite coordinates".into()).into());
    }

    let mut curves = Vec::new();
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;
    for el in path.elements() {
        let segment = match (*el, last) {
            (PathEl::MoveTo(p), _) => {
                close_subpath(&mut curves, last, start);
                start = Some(p);
                last = Some(p);
                continue;
            }
            (PathEl::ClosePath, _) => {
                close_subpath(&mut curves, last, start);
                last = start;
                continue;
            }
            (PathEl::LineTo(p), Some(from)) => PathSeg::Line(Line::new(from, p)),
            (PathEl::QuadTo(c, p), Some(from)) => PathSeg::Quad(QuadBez::new(from, c, p)),
            (PathEl::CurveTo(c0, c1, p), Some(from)) => {
                PathSeg::Cubic(CubicBez::new(from, c0, c1, p))
            }
            // Drawing before any move has no start point to draw from
            (PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p), None) => {
                start = Some(p);
                last = Some(p);
                continue;
            }
        };
        last = Some(segment.end());
        curves.push(segment);
    }
    close_subpath(&mut curves, last, start);
    Ok(curves)
}

fn close_subpath(curves: &mut Vec<PathSeg>, last: Option<Point>, start: Option<Point>) {
    if let (Some(last), Some(start)) = (last, start) {
        if last != start {
            curves.push(PathSeg::Line(Line::new(last, start)));
        }
    }
}

/// Uniform chords per curve; a uniform split of `n` pieces strays at most
/// max|B''| / (8 n^2) from the curve
fn chord_count(curve: &PathSeg, tolerance: f64) -> usize {
    let bend = match curve {
        PathSeg::Line(_) => return 1,
        PathSeg::Quad(q) => (q.p0.to_vec2() - q.p1.to_vec2() * 2.0 + q.p2.to_vec2()).hypot() * 2.0,
        PathSeg::Cubic(c) => {
            let first = c.p0.to_vec2() - c.p1.to_vec2() * 2.0 + c.p2.to_vec2();
            let second = c.p1.to_vec2() - c.p2.to_vec2() * 2.0 + c.p3.to_vec2();
            first.hypot().max(second.hypot()) * 6.0
        }
    };
    ((bend / (8.0 * tolerance)).sqrt().ceil() as usize).clamp(1, MAX_CHORDS)
}

fn cut_into_chords(curves: &[PathSeg], tolerance: f64) -> Vec<Chord> {
    let mut chords = Vec::new();
    for (seg, curve) in curves.iter().enumerate() {
        let count = chord_count(curve, tolerance);
        let params: Vec<f64> = (0..=count).map(|i| i as f64 / count as f64).collect();
        for pair in params.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let start = snap(curve.eval(from));
            let end = snap(curve.eval(to));
            if start == end {
                continue;
            }
            let origin = match curve {
                PathSeg::Line(_) => Origin::Line,
                _ => Origin::Curve { seg, from, to },
            };
            chords.push(Chord { start, end, origin });
        }
    }
    chords
}

/// Interior split points of every segment against every other, as
/// (parameter, point) pairs
fn split_points(segments: &[(Point, Point)]) -> Vec<Vec<(f64, Point)>> {
    let mut splits: Vec<Vec<(f64, Point)>> = vec![Vec::new(); segments.len()];

    for i in 0..segments.len() {
        let (p, p2) = segments[i];
        for j in (i + 1)..segments.len() {
            let (q, q2) = segments[j];
            if p.x.max(p2.x) < q.x.min(q2.x)
                || q.x.max(q2.x) < p.x.min(p2.x)
                || p.y.max(p2.y) < q.y.min(q2.y)
                || q.y.max(q2.y) < p.y.min(p2.y)
            {
                continue;
            }

            let r = p2 - p;
            let s = q2 - q;
            let qp = q - p;
            let denom = r.cross(s);

            if denom.abs() <= 1e-12 * r.hypot() * s.hypot() {
                // Parallel: only collinear overlaps produce splits
                if qp.cross(r).abs() / r.hypot().max(f64::EPSILON) > SAMPLE_OFFSET {
                    continue;
                }
                push_projection(&mut splits[i], p, r, [q, q2]);
                push_projection(&mut splits[j], q, s, [p, p2]);
                continue;
            }

            let t = qp.cross(s) / denom;
            let u = qp.cross(r) / denom;
            if !(-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t)
                || !(-PARAM_EPS..=1.0 + PARAM_EPS).contains(&u)
            {
                continue;
            }

            // Reuse existing endpoints so both segments meet at one vertex
            let point = if t <= PARAM_EPS {
                p
            } else if t >= 1.0 - PARAM_EPS {
                p2
            } else if u <= PARAM_EPS {
                q
            } else if u >= 1.0 - PARAM_EPS {
                q2
            } else {
                snap(p + r * t)
            };
            if is_interior(t) {
                splits[i].push((t, point));
            }
            if is_interior(u) {
                splits[j].push((u, point));
            }
        }
    }
    splits
}

fn is_interior(t: f64) -> bool {
    t > PARAM_EPS && t < 1.0 - PARAM_EPS
}

fn push_projection(splits: &mut Vec<(f64, Point)>, origin: Point, dir: Vec2, points: [Point; 2]) {
    let length_sq = dir.dot(dir);
    if length_sq == 0.0 {
        return;
    }
    for point in points {
        let t = (point - origin).dot(dir) / length_sq;
        if is_interior(t) {
            splits.push((t, point));
        }
    }
}

/// Planar graph of snapped vertices and directed edges with multiplicity
#[derive(Default)]
struct EdgeGraph {
    vertices: Vec<Point>,
    index: HashMap<(i64, i64), usize>,
    /// (low vertex, high vertex) -> net count of low→high traversals, and
    /// where the edge lies on the source when traveled low→high
    edges: BTreeMap<(usize, usize), (i32, Origin)>,
}

impl EdgeGraph {
    fn vertex(&mut self, point: Point) -> usize {
        let key = grid_key(point);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(snap(point));
        self.index.insert(key, id);
        id
    }

    fn add_edge(&mut self, from: usize, to: usize, origin: Origin) {
        if from == to {
            return;
        }
        let (key, step, origin) = if from < to {
            ((from, to), 1, origin)
        } else {
            ((to, from), -1, origin.reversed())
        };
        let entry = self.edges.entry(key).or_insert((0, origin));
        entry.0 += step;
        // Coincident edges from different sources fall back to a line
        if entry.1 != origin {
            entry.1 = Origin::Line;
        }
    }

    /// Edges with filled space on exactly one side, oriented fill-on-right
    fn boundary_edges(&self) -> Vec<BoundaryEdge> {
        let weighted: Vec<(Point, Point, i32)> = self
            .edges
            .iter()
            .filter(|(_, (count, _))| *count != 0)
            .map(|(&(a, b), &(count, _))| (self.vertices[a], self.vertices[b], count))
            .collect();

        let mut boundary = Vec::new();
        for (&(a, b), &(count, origin)) in &self.edges {
            if count == 0 {
                continue;
            }
            let (pa, pb) = (self.vertices[a], self.vertices[b]);
            let dir = pb - pa;
            let length = dir.hypot();
            if length == 0.0 {
                continue;
            }
            let left_normal = Vec2::new(-dir.y, dir.x) / length;
            let offset = SAMPLE_OFFSET.min(length * 0.25);
            let mid = pa.midpoint(pb);
            let left_filled = winding(mid + left_normal * offset, &weighted) != 0;
            let right_filled = winding(mid - left_normal * offset, &weighted) != 0;
            match (left_filled, right_filled) {
                (false, true) => boundary.push(BoundaryEdge {
                    from: a,
                    to: b,
                    origin,
                }),
                (true, false) => boundary.push(BoundaryEdge {
                    from: b,
                    to: a,
                    origin: origin.reversed(),
                }),
                _ => {}
            }
        }
        boundary
    }
}

/// Non-zero winding number of `point`
fn winding(point: Point, edges: &[(Point, Point, i32)]) -> i32 {
    let mut total = 0;
    for &(a, b, count) in edges {
        let side = (b - a).cross(point - a);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                total += count;
            }
        } else if b.y <= point.y && side < 0.0 {
            total -= count;
        }
    }
    total
}

/// Follow boundary edges head to tail until every one is used; each loop
/// lists edge indices
fn chain_loops(boundary: &[BoundaryEdge], vertex_count: usize) -> Vec<Vec<usize>> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for (idx, edge) in boundary.iter().enumerate() {
        outgoing[edge.from].push(idx);
    }

    let mut used = vec![false; boundary.len()];
    let mut loops = Vec::new();
    for start in 0..boundary.len() {
        if used[start] {
            continue;
        }
        let first = boundary[start].from;
        let mut ring = Vec::new();
        let mut edge = start;
        let closed = loop {
            used[edge] = true;
            ring.push(edge);
            let to = boundary[edge].to;
            if to == first {
                break true;
            }
            match outgoing[to].iter().copied().find(|&next| !used[next]) {
                Some(next) => edge = next,
                None => break false,
            }
        };
        if closed {
            loops.push(ring);
        } else {
            log::debug!("Dropped an open boundary chain of {} edge(s)", ring.len());
        }
    }
    loops
}

/// Boundary edges grouped into output spans. Runs of edges that continue
/// one source curve become a single piece of that curve.
fn contour_spans(
    ring: &[usize],
    boundary: &[BoundaryEdge],
    vertices: &[Point],
    curves: &[PathSeg],
) -> Vec<Span> {
    let n = ring.len();
    let edge = |i: usize| boundary[ring[i % n]];
    // Begin after a break so no run wraps around the end of the ring
    let begin = (0..n)
        .find(|&i| !edge(i + n - 1).origin.continues_into(edge(i).origin))
        .unwrap_or(0);

    let mut spans = Vec::new();
    let mut i = 0;
    while i < n {
        let first = edge(begin + i);
        let mut last = first;
        i += 1;
        while i < n && last.origin.continues_into(edge(begin + i).origin) {
            last = edge(begin + i);
            i += 1;
        }
        let kind = match (first.origin, last.origin) {
            (Origin::Curve { seg, from, .. }, Origin::Curve { to, .. }) => {
                curve_piece(&curves[seg], from, to)
            }
            _ => SpanKind::Line,
        };
        spans.push(Span {
            end: vertices[last.to],
            kind,
        });
    }
    spans
}

/// Control points of the stretch of `curve` from `from` to `to`
fn curve_piece(curve: &PathSeg, from: f64, to: f64) -> SpanKind {
    let piece = if from <= to {
        curve.subsegment(from..to)
    } else {
        curve.subsegment(to..from).reverse()
    };
    match piece {
        PathSeg::Line(_) => SpanKind::Line,
        PathSeg::Quad(q) => SpanKind::Quad(q.p1),
        PathSeg::Cubic(c) => SpanKind::Cubic(c.p1, c.p2),
    }
}

/// Merges consecutive straight spans that continue in the same direction
fn drop_collinear(mut spans: Vec<Span>) -> Vec<Span> {
    loop {
        let n = spans.len();
        if n < 3 {
            return spans;
        }
        let redundant = (0..n).find(|&i| {
            let next = spans[(i + 1) % n];
            spans[i].kind == SpanKind::Line
                && next.kind == SpanKind::Line
                && is_collinear(spans[(i + n - 1) % n].end, spans[i].end, next.end)
        });
        match redundant {
            Some(i) => {
                spans.remove(i);
            }
            None => return spans,
        }
    }
}

fn is_collinear(prev: Point, cur: Point, next: Point) -> bool {
    let chord = next - prev;
    let chord_len = chord.hypot();
    if chord_len == 0.0 {
        return false;
    }
    let distance = chord.cross(cur - prev).abs() / chord_len;
    let between = (cur - prev).dot(chord) > 0.0 && (next - cur).dot(chord) > 0.0;
    distance < COLLINEAR_EPS && between
}

/// Shoelace area; negative for clockwise rings with y pointing up
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Shape};

    fn rect(path: &mut BezPath, x0: f64, y0: f64, x1: f64, y1: f64, clockwise: bool) {
        let corners = if clockwise {
            [(x0, y0), (x0, y1), (x1, y1), (x1, y0)]
        } else {
            [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
        };
        path.move_to(corners[0]);
        for corner in &corners[1..] {
            path.line_to(*corner);
        }
        path.close_path();
    }

    /// On-curve points of every closed contour
    fn rings(path: &BezPath) -> Vec<Vec<Point>> {
        let mut rings = Vec::new();
        let mut current = Vec::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => current = vec![p],
                PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                    current.push(p)
                }
                PathEl::ClosePath => rings.push(std::mem::take(&mut current)),
            }
        }
        rings
    }

    /// (lines, quads, cubics)
    fn element_counts(path: &BezPath) -> (usize, usize, usize) {
        path.elements()
            .iter()
            .fold((0, 0, 0), |(lines, quads, cubics), el| match el {
                PathEl::LineTo(_) => (lines + 1, quads, cubics),
                PathEl::QuadTo(..) => (lines, quads + 1, cubics),
                PathEl::CurveTo(..) => (lines, quads, cubics + 1),
                _ => (lines, quads, cubics),
            })
    }

    #[test]
    fn overlapping_squares_merge_into_one_clockwise_contour() {
        let mut path = BezPath::new();
        rect(&mut path, 0.0, 0.0, 100.0, 100.0, false);
        rect(&mut path, 50.0, 50.0, 150.0, 150.0, false);

        let result = OverlapRemover::new().simplify(&path).unwrap();
        let rings = rings(&result);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 8);
        assert!((signed_area(&rings[0]) + 17_500.0).abs() < 1e-6);
    }

    #[test]
    fn lone_square_is_preserved_and_reoriented() {
        let mut path = BezPath::new();
        rect(&mut path, 0.0, 0.0, 100.0, 100.0, false);

        let result = OverlapRemover::new().simplify(&path).unwrap();
        let rings = rings(&result);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert!((signed_area(&rings[0]) + 10_000.0).abs() < 1e-6);
        for corner in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
            assert!(rings[0].contains(&Point::new(corner.0, corner.1)));
        }
    }

    #[test]
    fn counter_wound_hole_survives() {
        let mut path = BezPath::new();
        rect(&mut path, 0.0, 0.0, 100.0, 100.0, false);
        rect(&mut path, 25.0, 25.0, 75.0, 75.0, true);

        let result = OverlapRemover::new().simplify(&path).unwrap();
        let mut areas: Vec<f64> = rings(&result).iter().map(|r| signed_area(r)).collect();
        areas.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(areas.len(), 2);
        assert!((areas[0] + 10_000.0).abs() < 1e-6);
        assert!((areas[1] - 2_500.0).abs() < 1e-6);
    }

    #[test]
    fn same_wound_inner_contour_is_absorbed() {
        let mut path = BezPath::new();
        rect(&mut path, 0.0, 0.0, 100.0, 100.0, false);
        rect(&mut path, 25.0, 25.0, 75.0, 75.0, false);

        let result = OverlapRemover::new().simplify(&path).unwrap();
        let rings = rings(&result);
        assert_eq!(rings.len(), 1);
        assert!((signed_area(&rings[0]) + 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_squares_stay_separate() {
        let mut path = BezPath::new();
        rect(&mut path, 0.0, 0.0, 10.0, 10.0, true);
        rect(&mut path, 20.0, 0.0, 30.0, 10.0, false);

        let result = OverlapRemover::new().simplify(&path).unwrap();
        let rings = rings(&result);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| signed_area(r) < 0.0));
    }

    #[test]
    fn untouched_curve_keeps_its_control_point() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((50.0, 100.0), (100.0, 0.0));
        path.close_path();

        let result = OverlapRemover::new().simplify(&path).unwrap();
        assert_eq!(rings(&result).len(), 1);
        let (lines, quads, cubics) = element_counts(&result);
        assert_eq!((quads, cubics), (1, 0));
        assert!(lines <= 1);

        let control = result
            .elements()
            .iter()
            .find_map(|el| match *el {
                PathEl::QuadTo(c, _) => Some(c),
                _ => None,
            })
            .unwrap();
        assert!((control - Point::new(50.0, 100.0)).hypot() < 1e-6);
        assert!(result.area() < 0.0);
    }

    #[test]
    fn overlapping_circles_merge_into_curves() {
        let mut path = Circle::new((0.0, 0.0), 300.0).to_path(0.1);
        let second = Circle::new((300.0, 0.0), 300.0).to_path(0.1);
        path.extend(second.elements().iter().copied());
        let input_cubics = element_counts(&path).2;

        let result = OverlapRemover::new().simplify(&path).unwrap();
        assert_eq!(rings(&result).len(), 1);
        let (lines, quads, cubics) = element_counts(&result);
        assert_eq!((lines, quads), (0, 0));
        assert!(cubics >= input_cubics && cubics <= input_cubics * 3);

        // Union of two r=300 discs whose centers are one radius apart
        let expected = 2.0 * std::f64::consts::PI * 90_000.0
            - (180_000.0 * std::f64::consts::FRAC_PI_3 - 150.0 * 270_000f64.sqrt());
        let area = result.area();
        assert!(area < 0.0);
        assert!((area.abs() - expected).abs() / expected < 0.01);
    }

    #[test]
    fn empty_path_stays_empty() {
        let result = OverlapRemover::new().simplify(&BezPath::new()).unwrap();
        assert!(result.elements().is_empty());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((f64::NAN, 1.0));
        path.line_to((1.0, 0.0));
        path.close_path();
        assert!(OverlapRemover::new().simplify(&path).is_err());
    }
}
