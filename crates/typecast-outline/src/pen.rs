// this_file: crates/typecast-outline/src/pen.rs

//! Control-point pen: outline commands in, flat point records out.
//!
//! Every segment is written as a fixed number of floats so a host can walk a
//! contour with a constant stride:
//!
//! | order | stride | move / line        | quadratic      | cubic          |
//! |-------|--------|--------------------|----------------|----------------|
//! | 3     | 4      | `x y x y`          | `cx cy x y`    | approximated   |
//! | 4     | 6      | `x y x y x y`      | `cx cy cx cy x y` | `c1 c2 p`   |

use typecast_core::traits::OutlineSink;
use typecast_core::types::BezierOrder;

/// One closed contour, `stride` floats per segment
pub type Contour = Vec<f32>;

/// Records outline commands as control points for one bezier order.
#[derive(Debug, Clone)]
pub struct ControlPointPen {
    order: BezierOrder,
    current: Contour,
    contours: Vec<Contour>,
    last: (f32, f32),
    approximated: usize,
}

impl ControlPointPen {
    pub fn new(order: BezierOrder) -> Self {
        Self {
            order,
            current: Vec::new(),
            contours: Vec::new(),
            last: (0.0, 0.0),
            approximated: 0,
        }
    }

    pub fn order(&self) -> BezierOrder {
        self.order
    }

    /// Closes any unterminated contour and hands back everything recorded
    pub fn finish(mut self) -> Vec<Contour> {
        self.flush();
        if self.approximated > 0 {
            log::warn!(
                "Approximated {} cubic segment(s) with single quadratics",
                self.approximated
            );
        }
        self.contours
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn point(&mut self, x: f32, y: f32) {
        let repeats = self.order.stride() / 2;
        for _ in 0..repeats {
            self.current.extend_from_slice(&[x, y]);
        }
        self.last = (x, y);
    }
}

impl OutlineSink for ControlPointPen {
    fn move_to(&mut self, x: f32, y: f32) {
        // A new contour without a close means the previous one ended here
        self.flush();
        self.point(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.point(x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        match self.order {
            BezierOrder::Quadratic => self.current.extend_from_slice(&[cx, cy, x, y]),
            BezierOrder::Cubic => self.current.extend_from_slice(&[cx, cy, cx, cy, x, y]),
        }
        self.last = (x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        match self.order {
            BezierOrder::Quadratic => {
                let (x0, y0) = self.last;
                let qx = (3.0 * (cx0 + cx1) - (x0 + x)) / 4.0;
                let qy = (3.0 * (cy0 + cy1) - (y0 + y)) / 4.0;
                self.current.extend_from_slice(&[qx, qy, x, y]);
                self.approximated += 1;
            }
            BezierOrder::Cubic => self
                .current
                .extend_from_slice(&[cx0, cy0, cx1, cy1, x, y]),
        }
        self.last = (x, y);
    }

    fn close(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_records_stride_four() {
        let mut pen = ControlPointPen::new(BezierOrder::Quadratic);
        pen.move_to(0.0, 0.0);
        pen.line_to(10.0, 0.0);
        pen.quad_to(15.0, 5.0, 10.0, 10.0);
        pen.close();
        let contours = pen.finish();
        assert_eq!(
            contours,
            vec![vec![0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 10.0, 0.0, 15.0, 5.0, 10.0, 10.0]]
        );
    }

    #[test]
    fn cubic_records_stride_six() {
        let mut pen = ControlPointPen::new(BezierOrder::Cubic);
        pen.move_to(0.0, 0.0);
        pen.curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        pen.quad_to(7.0, 8.0, 9.0, 10.0);
        pen.close();
        let contours = pen.finish();
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0],
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, //
                7.0, 8.0, 7.0, 8.0, 9.0, 10.0,
            ]
        );
        assert_eq!(contours[0].len() % BezierOrder::Cubic.stride(), 0);
    }

    #[test]
    fn close_flushes_each_contour() {
        let mut pen = ControlPointPen::new(BezierOrder::Quadratic);
        pen.move_to(0.0, 0.0);
        pen.line_to(1.0, 0.0);
        pen.close();
        pen.move_to(5.0, 5.0);
        pen.line_to(6.0, 5.0);
        pen.close();
        // A stray close with nothing open adds nothing
        pen.close();
        assert_eq!(pen.finish().len(), 2);
    }

    #[test]
    fn finish_flushes_unterminated_contour() {
        let mut pen = ControlPointPen::new(BezierOrder::Quadratic);
        pen.move_to(0.0, 0.0);
        pen.line_to(1.0, 1.0);
        pen.move_to(2.0, 2.0);
        pen.line_to(3.0, 3.0);
        let contours = pen.finish();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[1][..2], [2.0, 2.0]);
    }

    #[test]
    fn cubic_in_quadratic_pen_is_approximated() {
        let mut pen = ControlPointPen::new(BezierOrder::Quadratic);
        pen.move_to(0.0, 0.0);
        // Degree-elevated quadratic with control (2, 4)
        pen.curve_to(4.0 / 3.0, 8.0 / 3.0, 8.0 / 3.0, 8.0 / 3.0, 4.0, 0.0);
        pen.close();
        let contours = pen.finish();
        let segment = &contours[0][4..8];
        assert!((segment[0] - 2.0).abs() < 1e-5);
        assert!((segment[1] - 4.0).abs() < 1e-5);
        assert_eq!(segment[2..], [4.0, 0.0]);
    }
}
