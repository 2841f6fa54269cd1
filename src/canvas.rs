//! The canvas capability contract consumed by the renderer.
//!
//! The actual page backend (PDF generation, rasterization) lives outside
//! this crate; the renderer only emits calls against this trait. Angles are
//! in degrees, coordinates in whatever linear unit the backend's page size
//! is reported in (the reference backend uses millimeters, y-up).

use std::ops::{Deref, DerefMut};

use crate::path::{CompiledPath, PathInstruction};

/// Stroke end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke corner-join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

/// An abstract 2-D vector canvas with a save/restore state stack.
///
/// Path construction is stateful: `begin_path` starts a fresh path, the
/// move/line/curve/close calls extend it, and `draw_path`/`clip_path`
/// consume it. Every state-mutating call (colors, line style, transform,
/// clip) is covered by `save`/`restore`.
pub trait Canvas {
    /// Page size as `(width, height)`.
    fn page_size(&self) -> (f64, f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    fn close_path(&mut self);
    /// Fill and/or stroke the current path.
    fn draw_path(&mut self, fill: bool, stroke: bool);
    /// Intersect the clip region with the current path, optionally painting it.
    fn clip_path(&mut self, fill: bool, stroke: bool);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: bool, stroke: bool);
    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: bool, stroke: bool);

    fn set_stroke_color_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64);
    fn set_fill_color_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64);
    fn set_stroke_alpha(&mut self, opacity: f64);
    fn set_fill_alpha(&mut self, opacity: f64);
    fn set_stroke_overprint(&mut self, overprint: bool);
    fn set_fill_overprint(&mut self, overprint: bool);

    fn set_line_width(&mut self, width: f64);
    fn set_dash(&mut self, pattern: &[f64], offset: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_miter_limit(&mut self, limit: f64);

    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotate the coordinate system counter-clockwise, in degrees.
    fn rotate(&mut self, angle_degrees: f64);

    fn save(&mut self);
    fn restore(&mut self);

    fn set_font(&mut self, name: &str, size: f64);
    fn draw_string(&mut self, x: f64, y: f64, text: &str);
}

/// RAII scope over the canvas state stack.
///
/// Calls `save` on construction and `restore` on drop, so every nested
/// drawing region (per-symbol translate, per-decoration translate,
/// per-hatch/pattern clip) is exited on every path out of a function,
/// including early error returns. Derefs to the canvas so drawing code
/// inside the scope reads the same as outside.
pub struct SavedState<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> SavedState<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for SavedState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for SavedState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for SavedState<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

/// Replay a compiled path onto the canvas as the current path.
///
/// The caller follows up with `draw_path` or `clip_path`.
pub fn emit_path<C: Canvas + ?Sized>(canvas: &mut C, path: &CompiledPath) {
    canvas.begin_path();
    for instruction in &path.instructions {
        match *instruction {
            PathInstruction::MoveTo(p) => canvas.move_to(p.x, p.y),
            PathInstruction::LineTo(p) => canvas.line_to(p.x, p.y),
            PathInstruction::CubicTo { c1, c2, to } => {
                canvas.curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y)
            }
            PathInstruction::ClosePath => canvas.close_path(),
        }
    }
}

/// Intersect the clip region with an axis-aligned rectangle.
pub fn clip_rect<C: Canvas + ?Sized>(canvas: &mut C, x: f64, y: f64, w: f64, h: f64) {
    canvas.begin_path();
    canvas.move_to(x, y);
    canvas.line_to(x + w, y);
    canvas.line_to(x + w, y + h);
    canvas.line_to(x, y + h);
    canvas.close_path();
    canvas.clip_path(false, false);
}

/// Intersect the clip region with a closed polygon.
pub fn clip_poly<C: Canvas + ?Sized>(canvas: &mut C, poly: &[glam::DVec2]) {
    canvas.begin_path();
    if let Some((first, rest)) = poly.split_first() {
        canvas.move_to(first.x, first.y);
        for p in rest {
            canvas.line_to(p.x, p.y);
        }
        canvas.close_path();
    }
    canvas.clip_path(false, false);
}
