//! Color resolution: one ink pass composited from its base color.

use std::collections::HashMap;

use crate::canvas::Canvas;
use crate::errors::LegendError;
use crate::spec::{BaseColor, Cmyk, ColorLayer};

/// The composited ink state for one color layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInk {
    pub cmyk: Cmyk,
    pub opacity: f64,
    pub overprint: bool,
}

/// Resolve a layer's base-color reference into composited ink state.
///
/// The four channels are scaled by the layer's tint (default 1); opacity
/// and overprint pass through unmodified. The blend mode stays on the layer
/// and is never interpreted here. Pure; called once per layer per render
/// pass.
pub fn resolve(
    layer: &ColorLayer,
    base_colors: &HashMap<String, BaseColor>,
) -> Result<ResolvedInk, LegendError> {
    let base = base_colors
        .get(&layer.color)
        .ok_or_else(|| LegendError::UnresolvedColorId {
            layer: layer.id.clone(),
            color: layer.color.clone(),
        })?;

    Ok(ResolvedInk {
        cmyk: base.cmyk.tinted(layer.tint.unwrap_or(1.0)),
        opacity: layer.opacity.unwrap_or(1.0),
        overprint: layer.overprint,
    })
}

impl ResolvedInk {
    /// Apply this ink to both stroke and fill state of the canvas.
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let Cmyk { c, m, y, k } = self.cmyk;
        canvas.set_stroke_color_cmyk(c, m, y, k);
        canvas.set_fill_color_cmyk(c, m, y, k);
        canvas.set_stroke_overprint(self.overprint);
        canvas.set_fill_overprint(self.overprint);
        canvas.set_stroke_alpha(self.opacity);
        canvas.set_fill_alpha(self.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::LegendSpec;

    fn base_colors() -> HashMap<String, BaseColor> {
        let mut spec = LegendSpec::default();
        spec.add_base_color("brown", Cmyk::new(0.8, 0.4, 0.0, 0.2));
        spec.base_colors
    }

    #[test]
    fn tint_composes_channels() {
        let mut layer = ColorLayer::new("contours", "brown");
        layer.tint = Some(0.5);
        let ink = resolve(&layer, &base_colors()).unwrap();
        assert_eq!(ink.cmyk, Cmyk::new(0.4, 0.2, 0.0, 0.1));
        assert_eq!(ink.opacity, 1.0);
        assert!(!ink.overprint);
    }

    #[test]
    fn default_tint_is_identity() {
        let layer = ColorLayer::new("contours", "brown");
        let ink = resolve(&layer, &base_colors()).unwrap();
        assert_eq!(ink.cmyk, Cmyk::new(0.8, 0.4, 0.0, 0.2));
    }

    #[test]
    fn opacity_and_overprint_pass_through() {
        let mut layer = ColorLayer::new("contours", "brown");
        layer.opacity = Some(0.65);
        layer.overprint = true;
        let ink = resolve(&layer, &base_colors()).unwrap();
        assert_eq!(ink.opacity, 0.65);
        assert!(ink.overprint);
    }

    #[test]
    fn unknown_base_color_fails() {
        let layer = ColorLayer::new("contours", "mauve");
        let err = resolve(&layer, &base_colors()).unwrap_err();
        assert!(matches!(
            err,
            LegendError::UnresolvedColorId { layer, color }
                if layer == "contours" && color == "mauve"
        ));
    }
}
