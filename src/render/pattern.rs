//! Pattern tiler: a snapped grid of clipped symbol stamps inside a clip
//! region.

use glam::DVec2;

use crate::canvas::{Canvas, SavedState, clip_rect};
use crate::errors::LegendError;
use crate::spec::PatternPart;

use super::geometry::{poly_bounds, rotate_poly};
use super::shapes::draw_shape_for_layer;

/// Stamp the pattern's nested content once per grid cell covering `clip`.
///
/// The caller has already saved the canvas state and clipped to `clip`.
/// The grid is anchored at the pattern's origin and snapped down to tile
/// multiples, so the same pattern lines up across adjacent regions. Each
/// cell gets its own scoped translate and a cell-sized clip rectangle:
/// tiles abut with neither gap nor overlap, and every point inside the clip
/// polygon belongs to exactly one cell.
pub fn draw_pattern<C: Canvas + ?Sized>(
    canvas: &mut C,
    pattern: &PatternPart,
    clip: &[DVec2],
    layer_id: &str,
) -> Result<(), LegendError> {
    if pattern.width <= 0.0 {
        return Err(LegendError::missing_attribute("pattern", "width"));
    }
    if pattern.height <= 0.0 {
        return Err(LegendError::missing_attribute("pattern", "height"));
    }

    canvas.rotate(pattern.rotation);
    let bounds = poly_bounds(&rotate_poly(clip, -pattern.rotation));

    let (w, h) = (pattern.width, pattern.height);
    let x_start = pattern.origin.x + ((bounds.min.x - pattern.origin.x) / w).floor() * w;
    let y_start = pattern.origin.y + ((bounds.min.y - pattern.origin.y) / h).floor() * h;

    let mut y = y_start;
    while y < bounds.max.y {
        let mut x = x_start;
        while x < bounds.max.x {
            let mut tile = SavedState::new(&mut *canvas);
            tile.translate(x, y);
            clip_rect(&mut *tile, 0.0, 0.0, w, h);
            for part in &pattern.parts {
                if part.references_layer(layer_id) {
                    draw_shape_for_layer(&mut *tile, part, layer_id)?;
                }
            }
            drop(tile);
            x += w;
        }
        y += h;
    }

    Ok(())
}
