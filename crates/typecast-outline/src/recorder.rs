// this_file: crates/typecast-outline/src/recorder.rs

//! Bridges between outline sinks and `kurbo` paths.

use kurbo::{BezPath, PathEl, Point};
use typecast_core::traits::OutlineSink;

/// Records outline commands into a [`BezPath`]
#[derive(Debug, Default, Clone)]
pub struct PathRecorder {
    path: BezPath,
    open: bool,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> BezPath {
        if self.open {
            self.path.close_path();
        }
        self.path
    }
}

fn pt(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

impl OutlineSink for PathRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.path.close_path();
        }
        self.path.move_to(pt(x, y));
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(pt(x, y));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.path.quad_to(pt(cx, cy), pt(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(pt(cx0, cy0), pt(cx1, cy1), pt(x, y));
    }

    fn close(&mut self) {
        if self.open {
            self.path.close_path();
            self.open = false;
        }
    }
}

/// Feed a path back into a sink
pub fn replay(path: &BezPath, sink: &mut dyn OutlineSink) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => sink.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => sink.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => sink.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c0, c1, p) => sink.curve_to(
                c0.x as f32,
                c0.y as f32,
                c1.x as f32,
                c1.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => sink.close(),
        }
    }
}
