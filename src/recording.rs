//! A canvas that records every call it receives.
//!
//! Used by this crate's own tests to assert on the exact operation stream a
//! legend produces, and useful downstream for verifying a backend against
//! the renderer without producing any output file.

use crate::canvas::{Canvas, LineCap, LineJoin};

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    ClosePath,
    DrawPath { fill: bool, stroke: bool },
    ClipPath { fill: bool, stroke: bool },
    Rect { x: f64, y: f64, w: f64, h: f64, fill: bool, stroke: bool },
    Circle { cx: f64, cy: f64, r: f64, fill: bool, stroke: bool },
    StrokeColor(f64, f64, f64, f64),
    FillColor(f64, f64, f64, f64),
    StrokeAlpha(f64),
    FillAlpha(f64),
    StrokeOverprint(bool),
    FillOverprint(bool),
    LineWidth(f64),
    Dash { pattern: Vec<f64>, offset: f64 },
    Cap(LineCap),
    Join(LineJoin),
    MiterLimit(f64),
    Translate(f64, f64),
    Rotate(f64),
    Save,
    Restore,
    Font { name: String, size: f64 },
    Text { x: f64, y: f64, text: String },
}

/// In-memory [`Canvas`] implementation backed by an op log.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    page: (f64, f64),
    pub ops: Vec<CanvasOp>,
    depth: i32,
    min_depth: i32,
}

impl RecordingCanvas {
    /// A4 in millimeters, matching the reference backend's page setup.
    pub fn a4() -> Self {
        Self::with_page_size(210.0, 297.0)
    }

    pub fn with_page_size(width: f64, height: f64) -> Self {
        Self {
            page: (width, height),
            ops: Vec::new(),
            depth: 0,
            min_depth: 0,
        }
    }

    /// True when every `save` was matched by a `restore` and no `restore`
    /// ever ran on an empty stack.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.min_depth == 0
    }

    /// Count ops matching a predicate.
    pub fn count(&self, pred: impl Fn(&CanvasOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// All recorded label strings, in draw order.
    pub fn strings(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f64, f64) {
        self.page
    }

    fn begin_path(&mut self) {
        self.ops.push(CanvasOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::LineTo(x, y));
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ops.push(CanvasOp::CurveTo(x1, y1, x2, y2, x3, y3));
    }

    fn close_path(&mut self) {
        self.ops.push(CanvasOp::ClosePath);
    }

    fn draw_path(&mut self, fill: bool, stroke: bool) {
        self.ops.push(CanvasOp::DrawPath { fill, stroke });
    }

    fn clip_path(&mut self, fill: bool, stroke: bool) {
        self.ops.push(CanvasOp::ClipPath { fill, stroke });
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: bool, stroke: bool) {
        self.ops.push(CanvasOp::Rect { x, y, w, h, fill, stroke });
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: bool, stroke: bool) {
        self.ops.push(CanvasOp::Circle { cx, cy, r, fill, stroke });
    }

    fn set_stroke_color_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
        self.ops.push(CanvasOp::StrokeColor(c, m, y, k));
    }

    fn set_fill_color_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
        self.ops.push(CanvasOp::FillColor(c, m, y, k));
    }

    fn set_stroke_alpha(&mut self, opacity: f64) {
        self.ops.push(CanvasOp::StrokeAlpha(opacity));
    }

    fn set_fill_alpha(&mut self, opacity: f64) {
        self.ops.push(CanvasOp::FillAlpha(opacity));
    }

    fn set_stroke_overprint(&mut self, overprint: bool) {
        self.ops.push(CanvasOp::StrokeOverprint(overprint));
    }

    fn set_fill_overprint(&mut self, overprint: bool) {
        self.ops.push(CanvasOp::FillOverprint(overprint));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(CanvasOp::LineWidth(width));
    }

    fn set_dash(&mut self, pattern: &[f64], offset: f64) {
        self.ops.push(CanvasOp::Dash {
            pattern: pattern.to_vec(),
            offset,
        });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(CanvasOp::Cap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(CanvasOp::Join(join));
    }

    fn set_miter_limit(&mut self, limit: f64) {
        self.ops.push(CanvasOp::MiterLimit(limit));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(CanvasOp::Translate(dx, dy));
    }

    fn rotate(&mut self, angle_degrees: f64) {
        self.ops.push(CanvasOp::Rotate(angle_degrees));
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        self.min_depth = self.min_depth.min(self.depth);
        self.ops.push(CanvasOp::Restore);
    }

    fn set_font(&mut self, name: &str, size: f64) {
        self.ops.push(CanvasOp::Font {
            name: name.to_string(),
            size,
        });
    }

    fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        self.ops.push(CanvasOp::Text {
            x,
            y,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SavedState;

    #[test]
    fn saved_state_restores_on_drop() {
        let mut canvas = RecordingCanvas::a4();
        {
            let mut scope = SavedState::new(&mut canvas);
            scope.translate(1.0, 2.0);
        }
        assert_eq!(
            canvas.ops,
            vec![
                CanvasOp::Save,
                CanvasOp::Translate(1.0, 2.0),
                CanvasOp::Restore,
            ]
        );
        assert!(canvas.is_balanced());
    }

    #[test]
    fn saved_state_restores_on_early_return() {
        fn fails(canvas: &mut RecordingCanvas) -> Result<(), ()> {
            let mut scope = SavedState::new(canvas);
            scope.rotate(45.0);
            Err(())
        }

        let mut canvas = RecordingCanvas::a4();
        assert!(fails(&mut canvas).is_err());
        assert!(canvas.is_balanced());
        assert_eq!(canvas.ops.last(), Some(&CanvasOp::Restore));
    }
}
