//! Hatch fill planner: parallel stroked lines inside a clip region.

use glam::DVec2;

use crate::canvas::Canvas;
use crate::errors::LegendError;
use crate::spec::HatchPart;

use super::geometry::{poly_bounds, rotate_poly};
use super::shapes::apply_stroke_style;

/// Fill the clip polygon with parallel lines at the hatch's spacing and
/// rotation.
///
/// The caller has already saved the canvas state and clipped to `clip`.
/// The canvas is rotated by `+rotation` and the lines are planned in that
/// rotated frame (the polygon rotated by `-rotation`), so they come out
/// horizontal locally. The first line's y snaps down to a multiple of the
/// spacing minus the offset, which keeps adjacent hatch regions in phase.
/// With a dash pattern, the line start snaps down to a multiple of the dash
/// cycle so the dash phase is continuous across regions too.
pub fn draw_hatch<C: Canvas + ?Sized>(
    canvas: &mut C,
    hatch: &HatchPart,
    clip: &[DVec2],
) -> Result<(), LegendError> {
    if hatch.spacing <= 0.0 {
        return Err(LegendError::missing_attribute("hatch", "spacing"));
    }
    apply_stroke_style(canvas, &hatch.style, "hatch")?;
    let half_width = hatch.style.width.unwrap_or(0.0) * 0.5;

    canvas.rotate(hatch.rotation);
    let bounds = poly_bounds(&rotate_poly(clip, -hatch.rotation));

    let y_max = bounds.max.y + half_width;
    let y_min = bounds.min.y - half_width;
    let mut x_min = bounds.min.x;
    let x_max = bounds.max.x;
    if let Some(dash) = &hatch.style.dash {
        let cycle = dash.cycle_length();
        if cycle > 0.0 {
            x_min = (x_min / cycle).floor() * cycle;
        }
    }

    let mut y = (y_min / hatch.spacing).floor() * hatch.spacing - hatch.offset;
    while y < y_max {
        canvas.begin_path();
        canvas.move_to(x_min, y);
        canvas.line_to(x_max, y);
        canvas.draw_path(false, true);
        y += hatch.spacing;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{CanvasOp, RecordingCanvas};
    use crate::spec::{DashSpec, StrokeStyle};

    use super::super::geometry::rect_poly;

    fn hatch(spacing: f64, rotation: f64, offset: f64, style: StrokeStyle) -> HatchPart {
        HatchPart {
            stroke: Some("blue".into()),
            style,
            spacing,
            rotation,
            offset,
        }
    }

    fn line_ys(canvas: &RecordingCanvas) -> Vec<f64> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::MoveTo(_, y) => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lines_cover_expanded_bounds_in_phase() {
        let mut canvas = RecordingCanvas::a4();
        let clip = rect_poly(0.0, 0.0, 14.0, 5.0);
        // bounds y in [-2.5, 2.5], expanded by 0.5 -> [-3, 3];
        // first y = floor(-3/2)*2 = -4, then every 2 until y >= 3
        draw_hatch(
            &mut canvas,
            &hatch(2.0, 0.0, 0.0, StrokeStyle::with_width(1.0)),
            &clip,
        )
        .unwrap();
        assert_eq!(line_ys(&canvas), vec![-4.0, -2.0, 0.0, 2.0]);
    }

    #[test]
    fn offset_shifts_the_line_grid() {
        let mut canvas = RecordingCanvas::a4();
        let clip = rect_poly(0.0, 0.0, 14.0, 5.0);
        draw_hatch(
            &mut canvas,
            &hatch(2.0, 0.0, 0.5, StrokeStyle::with_width(1.0)),
            &clip,
        )
        .unwrap();
        assert_eq!(line_ys(&canvas), vec![-4.5, -2.5, -0.5, 1.5]);
    }

    #[test]
    fn rotation_is_emitted_and_bounds_counter_rotated() {
        let mut canvas = RecordingCanvas::a4();
        let clip = rect_poly(0.0, 0.0, 10.0, 10.0);
        draw_hatch(
            &mut canvas,
            &hatch(4.0, 45.0, 0.0, StrokeStyle::with_width(0.0)),
            &clip,
        )
        .unwrap();
        assert!(
            canvas
                .ops
                .iter()
                .any(|op| matches!(op, CanvasOp::Rotate(deg) if *deg == 45.0))
        );
        // rotated bounds half-diagonal ~7.07: lines at -8, -4, 0, 4 (and nothing past 7.07)
        assert_eq!(line_ys(&canvas), vec![-8.0, -4.0, 0.0, 4.0]);
    }

    #[test]
    fn dash_snaps_line_start_to_cycle_multiple() {
        let mut canvas = RecordingCanvas::a4();
        let clip = rect_poly(10.0, 0.0, 14.0, 5.0);
        let style = StrokeStyle {
            width: Some(1.0),
            dash: Some(DashSpec::new(vec![3.0, 1.0], 0.0)),
            ..StrokeStyle::default()
        };
        draw_hatch(&mut canvas, &hatch(2.0, 0.0, 0.0, style), &clip).unwrap();
        // clip x in [3, 17]; cycle 4 -> snapped start floor(3/4)*4 = 0
        let starts: Vec<f64> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::MoveTo(x, _) => Some(*x),
                _ => None,
            })
            .collect();
        assert!(!starts.is_empty());
        assert!(starts.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn non_positive_spacing_is_an_error() {
        let mut canvas = RecordingCanvas::a4();
        let clip = rect_poly(0.0, 0.0, 14.0, 5.0);
        let err = draw_hatch(
            &mut canvas,
            &hatch(0.0, 0.0, 0.0, StrokeStyle::with_width(1.0)),
            &clip,
        )
        .unwrap_err();
        assert!(matches!(err, LegendError::MissingAttribute { .. }));
    }
}
