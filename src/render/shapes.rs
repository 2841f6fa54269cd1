//! Drawing of the basic shape parts (path, rect, circle) and stroke style
//! application.
//!
//! All shapes draw in the current local frame; callers position them with a
//! scoped translate. Fill/stroke flags come from which paint fields the
//! part declares, while the paint itself is whatever layer ink is active on
//! the canvas.

use crate::canvas::{Canvas, emit_path};
use crate::errors::LegendError;
use crate::log::debug;
use crate::path;
use crate::spec::{PathPart, StrokeStyle, SymbolPart};

/// Apply a part's stroke attributes to the canvas.
///
/// `element` names the part in error messages. Width has no usable default
/// and is required; everything else falls back to the style's defaults.
pub fn apply_stroke_style<C: Canvas + ?Sized>(
    canvas: &mut C,
    style: &StrokeStyle,
    element: &str,
) -> Result<(), LegendError> {
    let width = style
        .width
        .ok_or_else(|| LegendError::missing_attribute(element, "stroke-width"))?;

    canvas.set_line_width(width);
    match &style.dash {
        Some(dash) => canvas.set_dash(&dash.pattern, dash.offset),
        None => canvas.set_dash(&[], 0.0),
    }
    canvas.set_line_cap(style.cap);
    canvas.set_line_join(style.join);
    canvas.set_miter_limit(style.miter_limit);
    Ok(())
}

/// Draw a path/rect/circle part at the current origin.
///
/// Hatch, pattern, and decoration parts are not shapes; nested in a context
/// that expects one (ornament or tile content) they are skipped.
pub fn draw_shape<C: Canvas + ?Sized>(canvas: &mut C, part: &SymbolPart) -> Result<(), LegendError> {
    match part {
        SymbolPart::Path(p) => draw_path_part(canvas, p),
        SymbolPart::Rect(r) => {
            canvas.rect(
                r.x,
                r.y,
                r.width,
                r.height,
                r.fill.is_some(),
                r.stroke.is_some(),
            );
            Ok(())
        }
        SymbolPart::Circle(c) => {
            canvas.circle(c.cx, c.cy, c.r, c.fill.is_some(), c.stroke.is_some());
            Ok(())
        }
        SymbolPart::Hatch(_) | SymbolPart::Pattern(_) | SymbolPart::Decoration(_) => {
            debug!("skipping {} nested where a shape is expected", part.element_name());
            Ok(())
        }
    }
}

/// Draw one shape part on the pass for `layer_id`.
///
/// When the part strokes that layer its stroke style is applied first,
/// matching the reference behavior of configuring the pen right before the
/// stroked shape.
pub fn draw_shape_for_layer<C: Canvas + ?Sized>(
    canvas: &mut C,
    part: &SymbolPart,
    layer_id: &str,
) -> Result<(), LegendError> {
    if part.stroke_layer() == Some(layer_id) {
        if let Some(style) = part.stroke_style() {
            apply_stroke_style(canvas, style, part.element_name())?;
        }
    }
    draw_shape(canvas, part)
}

fn draw_path_part<C: Canvas + ?Sized>(canvas: &mut C, part: &PathPart) -> Result<(), LegendError> {
    let compiled = path::compile(&part.d)?;
    emit_path(canvas, &compiled);
    canvas.draw_path(part.fill.is_some(), part.stroke.is_some());
    Ok(())
}
