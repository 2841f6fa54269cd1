//! In-memory model of a Map Symbol Specification (MSS) document.
//!
//! Loading and parsing the document itself is an external concern; the
//! renderer consumes these structures as-is. All sequences keep their
//! declaration order: color layers stack bottom-to-top in the order they
//! were declared, and symbols are listed in the order they appear.

use std::collections::HashMap;

use glam::DVec2;

use crate::canvas::{LineCap, LineJoin};

/// A CMYK ink definition, all channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    /// Scale every channel by a tint factor in `[0, 1]`.
    pub fn tinted(self, tint: f64) -> Self {
        Self {
            c: self.c * tint,
            m: self.m * tint,
            y: self.y * tint,
            k: self.k * tint,
        }
    }
}

/// A named base ink shared by one or more color layers. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct BaseColor {
    pub id: String,
    pub cmyk: Cmyk,
}

/// One named ink pass, composited from a base color.
///
/// `blend` is recorded but never interpreted by the renderer.
#[derive(Debug, Clone)]
pub struct ColorLayer {
    pub id: String,
    /// Reference to a [`BaseColor`] by id.
    pub color: String,
    /// Tint factor in `[0, 1]`; `None` means 1.
    pub tint: Option<f64>,
    /// Opacity in `[0, 1]`; `None` means 1.
    pub opacity: Option<f64>,
    /// Blend mode, passed through opaque.
    pub blend: Option<String>,
    pub overprint: bool,
}

impl ColorLayer {
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            tint: None,
            opacity: None,
            blend: None,
            overprint: false,
        }
    }
}

/// What kind of legend entry a symbol produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Point,
    Area,
    Line,
}

/// A named, typed graphical definition composed of parts.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: String,
    pub name: String,
    pub kind: SymbolKind,
    pub parts: Vec<SymbolPart>,
}

/// Dash/gap alternation lengths plus a phase offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashSpec {
    pub pattern: Vec<f64>,
    pub offset: f64,
}

impl DashSpec {
    pub fn new(pattern: Vec<f64>, offset: f64) -> Self {
        Self { pattern, offset }
    }

    /// Total length of one dash/gap cycle.
    pub fn cycle_length(&self) -> f64 {
        self.pattern.iter().sum()
    }
}

/// Stroke attributes carried by a stroked part.
///
/// `width` is the only attribute without a usable default: a part that
/// strokes a layer but has no width is a specification error.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: Option<f64>,
    pub dash: Option<DashSpec>,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: None,
            dash: None,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

impl StrokeStyle {
    pub fn with_width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }
}

/// Where a stroke decoration places its ornaments along the sample stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// First placement at `-len/2 + offset`, repeating every `spacing`.
    Regular,
    /// Exactly four evenly spaced placements.
    DashPoint,
    /// Single placement at the start of the stroke.
    StartPoint,
    /// Single placement at the end of the stroke.
    EndPoint,
}

/// A path described in the compact path mini-language.
#[derive(Debug, Clone)]
pub struct PathPart {
    /// Path data in the mini-language consumed by [`crate::path::compile`].
    pub d: String,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub style: StrokeStyle,
}

/// An axis-aligned rectangle, positioned relative to the symbol origin.
#[derive(Debug, Clone)]
pub struct RectPart {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub style: StrokeStyle,
}

/// A circle, positioned relative to the symbol origin.
#[derive(Debug, Clone)]
pub struct CirclePart {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub style: StrokeStyle,
}

/// Parallel straight fill lines at a given spacing and rotation.
#[derive(Debug, Clone)]
pub struct HatchPart {
    pub stroke: Option<String>,
    pub style: StrokeStyle,
    pub spacing: f64,
    /// Rotation of the hatch lines, in degrees.
    pub rotation: f64,
    /// Shift of the line grid perpendicular to the lines.
    pub offset: f64,
}

/// A repeating 2-D stamp of nested point-symbol content.
#[derive(Debug, Clone)]
pub struct PatternPart {
    /// Tile grid anchor.
    pub origin: DVec2,
    pub width: f64,
    pub height: f64,
    /// Rotation of the tile grid, in degrees.
    pub rotation: f64,
    /// Point-symbol content stamped once per tile.
    pub parts: Vec<SymbolPart>,
}

/// Repeating or positional ornaments placed along a sample stroke.
#[derive(Debug, Clone)]
pub struct StrokeDecorationPart {
    pub mode: PlacementMode,
    pub offset: f64,
    pub spacing: f64,
    /// Ornament content stamped at each placement.
    pub parts: Vec<SymbolPart>,
}

/// One drawable constituent of a symbol.
///
/// A part never owns a [`ColorLayer`]; it references one by id through its
/// `fill`/`stroke` fields and is drawn only on the render pass for that
/// layer. The enum is closed on purpose: adding a shape kind is a
/// compile-time-checked variant addition.
#[derive(Debug, Clone)]
pub enum SymbolPart {
    Path(PathPart),
    Rect(RectPart),
    Circle(CirclePart),
    Hatch(HatchPart),
    Pattern(PatternPart),
    Decoration(StrokeDecorationPart),
}

impl SymbolPart {
    /// Whether this part participates in the render pass for `layer_id`.
    ///
    /// Pattern and decoration parts carry no ink of their own; they answer
    /// through their nested content.
    pub fn references_layer(&self, layer_id: &str) -> bool {
        match self {
            SymbolPart::Path(p) => matches_either(&p.fill, &p.stroke, layer_id),
            SymbolPart::Rect(r) => matches_either(&r.fill, &r.stroke, layer_id),
            SymbolPart::Circle(c) => matches_either(&c.fill, &c.stroke, layer_id),
            SymbolPart::Hatch(h) => matches_one(&h.stroke, layer_id),
            SymbolPart::Pattern(p) => p.parts.iter().any(|part| part.references_layer(layer_id)),
            SymbolPart::Decoration(d) => {
                d.parts.iter().any(|part| part.references_layer(layer_id))
            }
        }
    }

    /// The layer id this part strokes with, if any.
    pub fn stroke_layer(&self) -> Option<&str> {
        match self {
            SymbolPart::Path(p) => p.stroke.as_deref(),
            SymbolPart::Rect(r) => r.stroke.as_deref(),
            SymbolPart::Circle(c) => c.stroke.as_deref(),
            SymbolPart::Hatch(h) => h.stroke.as_deref(),
            SymbolPart::Pattern(_) | SymbolPart::Decoration(_) => None,
        }
    }

    /// The stroke style of this part, for parts that can be stroked.
    pub fn stroke_style(&self) -> Option<&StrokeStyle> {
        match self {
            SymbolPart::Path(p) => Some(&p.style),
            SymbolPart::Rect(r) => Some(&r.style),
            SymbolPart::Circle(c) => Some(&c.style),
            SymbolPart::Hatch(h) => Some(&h.style),
            SymbolPart::Pattern(_) | SymbolPart::Decoration(_) => None,
        }
    }

    /// Element name for error reporting.
    pub fn element_name(&self) -> &'static str {
        match self {
            SymbolPart::Path(_) => "path",
            SymbolPart::Rect(_) => "rect",
            SymbolPart::Circle(_) => "circle",
            SymbolPart::Hatch(_) => "hatch",
            SymbolPart::Pattern(_) => "pattern",
            SymbolPart::Decoration(_) => "decoration",
        }
    }
}

fn matches_one(field: &Option<String>, layer_id: &str) -> bool {
    field.as_deref() == Some(layer_id)
}

fn matches_either(fill: &Option<String>, stroke: &Option<String>, layer_id: &str) -> bool {
    matches_one(fill, layer_id) || matches_one(stroke, layer_id)
}

/// The fully loaded specification document consumed by the renderer.
#[derive(Debug, Clone, Default)]
pub struct LegendSpec {
    /// Base inks, keyed by id.
    pub base_colors: HashMap<String, BaseColor>,
    /// Ink passes, bottom-to-top.
    pub layers: Vec<ColorLayer>,
    /// Legend entries, in listing order.
    pub symbols: Vec<Symbol>,
}

impl LegendSpec {
    pub fn add_base_color(&mut self, id: impl Into<String>, cmyk: Cmyk) {
        let id = id.into();
        self.base_colors.insert(id.clone(), BaseColor { id, cmyk });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_scales_every_channel() {
        let base = Cmyk::new(0.8, 0.4, 0.0, 0.2);
        let tinted = base.tinted(0.5);
        assert_eq!(tinted, Cmyk::new(0.4, 0.2, 0.0, 0.1));
    }

    #[test]
    fn dash_cycle_length_sums_pattern() {
        let dash = DashSpec::new(vec![3.0, 2.0], 0.0);
        assert_eq!(dash.cycle_length(), 5.0);
        assert_eq!(DashSpec::default().cycle_length(), 0.0);
    }

    #[test]
    fn pattern_part_matches_through_nested_content() {
        let pattern = SymbolPart::Pattern(PatternPart {
            origin: DVec2::ZERO,
            width: 5.0,
            height: 5.0,
            rotation: 0.0,
            parts: vec![SymbolPart::Circle(CirclePart {
                cx: 0.0,
                cy: 0.0,
                r: 1.0,
                fill: Some("green".into()),
                stroke: None,
                style: StrokeStyle::default(),
            })],
        });
        assert!(pattern.references_layer("green"));
        assert!(!pattern.references_layer("brown"));
    }
}
