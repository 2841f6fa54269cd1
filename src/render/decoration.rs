//! Stroke decoration planner: ornament placement along the sample stroke.
//!
//! Placements translate the drawing origin along the stroke's local x-axis;
//! at each placement every nested ornament part bound to the active layer
//! is stamped. The sample stroke is horizontal and centered on `(xs, ys)`.

use crate::canvas::{Canvas, SavedState};
use crate::errors::LegendError;
use crate::spec::{PlacementMode, StrokeDecorationPart};

use super::shapes::draw_shape_for_layer;

/// Largest length `<= max_len` that fits a whole number of regular
/// decoration repeats plus the end offsets.
///
/// Rounded to 3 decimals so repeated layout passes agree bit-for-bit with
/// the dash-trimmed length when the specification is consistent.
pub fn max_length_for_regular(offset: f64, spacing: f64, max_len: f64) -> f64 {
    let count = ((max_len - 2.0 * offset) / spacing).floor();
    round3(spacing * count + 2.0 * offset)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Place a decoration's ornaments along a sample stroke of `line_len`
/// centered on `(xs, ys)`, for the pass on `layer_id`.
pub fn draw_stroke_decoration<C: Canvas + ?Sized>(
    canvas: &mut C,
    decoration: &StrokeDecorationPart,
    xs: f64,
    ys: f64,
    line_len: f64,
    layer_id: &str,
) -> Result<(), LegendError> {
    let half = line_len * 0.5;
    let mut scope = SavedState::new(canvas);

    match decoration.mode {
        PlacementMode::Regular => {
            if decoration.spacing <= 0.0 {
                return Err(LegendError::missing_attribute("decoration", "spacing"));
            }
            let mut pos = -half + decoration.offset;
            scope.translate(xs + pos, ys);
            while pos < half {
                stamp(&mut *scope, decoration, layer_id)?;
                pos += decoration.spacing;
                if pos < half {
                    scope.translate(decoration.spacing, 0.0);
                }
            }
        }
        PlacementMode::DashPoint => {
            // Exactly four evenly spaced placements, the last on the stroke end.
            let spacing = line_len / 4.0;
            scope.translate(xs - half + spacing, ys);
            for i in 0..4 {
                if i > 0 {
                    scope.translate(spacing, 0.0);
                }
                stamp(&mut *scope, decoration, layer_id)?;
            }
        }
        PlacementMode::StartPoint => {
            scope.translate(xs - half, ys);
            stamp(&mut *scope, decoration, layer_id)?;
        }
        PlacementMode::EndPoint => {
            scope.translate(xs + half, ys);
            stamp(&mut *scope, decoration, layer_id)?;
        }
    }

    Ok(())
}

fn stamp<C: Canvas + ?Sized>(
    canvas: &mut C,
    decoration: &StrokeDecorationPart,
    layer_id: &str,
) -> Result<(), LegendError> {
    for part in &decoration.parts {
        if part.references_layer(layer_id) {
            draw_shape_for_layer(canvas, part, layer_id)?;
        }
    }
    Ok(())
}
