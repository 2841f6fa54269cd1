//! Legend layout engine.
//!
//! Walks the color layers in reverse declaration order (layers declared
//! later sit visually on top, so they are painted first), resolves each
//! layer's ink, and draws every symbol's matching parts at the current
//! layout cursor. A second pass, independent of layering, draws one label
//! per symbol on the same row grid.

pub mod color;
pub mod dash;
pub mod decoration;
pub mod geometry;
pub mod hatch;
pub mod pattern;
pub mod shapes;

use glam::{DVec2, dvec2};

use crate::canvas::{Canvas, SavedState, clip_poly};
use crate::errors::{LegendError, SPACING_EPSILON};
use crate::log::debug;
use crate::spec::{LegendSpec, PlacementMode, Symbol, SymbolKind, SymbolPart};

use geometry::rect_poly;
use shapes::{apply_stroke_style, draw_shape_for_layer};

/// Metrics of the legend page grid, in page units.
///
/// The defaults reproduce the reference layout: 14×5 swatches on a 6.5-unit
/// row grid, 20-unit page margins, labels indented 10 units into the row.
#[derive(Debug, Clone)]
pub struct LegendLayout {
    /// Width of the graphical sample (swatch, sample stroke).
    pub swatch_width: f64,
    /// Height of the graphical sample.
    pub swatch_height: f64,
    /// Vertical distance between rows.
    pub row_spacing: f64,
    /// Horizontal distance between wrapped columns.
    pub column_spacing: f64,
    /// Page margin on all sides.
    pub margin: f64,
    /// Horizontal offset of the label from the column start.
    pub label_indent: f64,
    /// Vertical drop of the label baseline below the row center.
    pub label_drop: f64,
    pub label_font: String,
    pub label_size: f64,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            swatch_width: 14.0,
            swatch_height: 5.0,
            row_spacing: 6.5,
            column_spacing: 50.0,
            margin: 20.0,
            label_indent: 10.0,
            label_drop: 1.0,
            label_font: "Helvetica".to_string(),
            label_size: 3.0,
        }
    }
}

/// Row/column cursor with column-wrap pagination.
///
/// Entries per column come out to `floor((H - 2*margin) / row_spacing)`:
/// the cursor wraps as soon as the next row's advance would cross the
/// bottom margin.
#[derive(Debug, Clone)]
struct Cursor {
    x: f64,
    y: f64,
    top: f64,
    bottom: f64,
    row_spacing: f64,
    column_spacing: f64,
    wraps: u32,
}

impl Cursor {
    fn new(layout: &LegendLayout, page_height: f64) -> Self {
        let top = page_height - layout.margin;
        Self {
            x: layout.margin,
            y: top,
            top,
            bottom: layout.margin,
            row_spacing: layout.row_spacing,
            column_spacing: layout.column_spacing,
            wraps: 0,
        }
    }

    fn position(&self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    fn advance(&mut self) {
        self.y -= self.row_spacing;
        if self.y - self.row_spacing < self.bottom {
            self.y = self.top;
            self.x += self.column_spacing;
            self.wraps += 1;
        }
    }
}

/// Draws a whole legend onto a canvas.
pub struct LegendRenderer<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    spec: &'a LegendSpec,
    layout: LegendLayout,
}

impl<'a, C: Canvas + ?Sized> LegendRenderer<'a, C> {
    pub fn new(canvas: &'a mut C, spec: &'a LegendSpec) -> Self {
        Self {
            canvas,
            spec,
            layout: LegendLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: LegendLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Run the full render pass: all layers back-to-front, then labels.
    ///
    /// Fails on the first specification error; the canvas state stack is
    /// left balanced even then, so the caller may continue with other
    /// drawing if it chooses to tolerate the error.
    pub fn render(&mut self) -> Result<(), LegendError> {
        let spec = self.spec;
        let (_, page_height) = self.canvas.page_size();

        for layer in spec.layers.iter().rev() {
            debug!("layer {}", layer.id);
            let ink = color::resolve(layer, &spec.base_colors)?;
            ink.apply(self.canvas);

            let mut cursor = Cursor::new(&self.layout, page_height);
            for symbol in &spec.symbols {
                let pos = cursor.position();
                match symbol.kind {
                    SymbolKind::Point => self.draw_point_symbol(pos, &layer.id, symbol)?,
                    SymbolKind::Area => self.draw_area_symbol(pos, &layer.id, symbol)?,
                    SymbolKind::Line => self.draw_line_symbol(pos, &layer.id, symbol)?,
                }
                cursor.advance();
            }
        }

        self.draw_labels(page_height);
        Ok(())
    }

    /// Point symbols: every matching part drawn around the row cursor.
    fn draw_point_symbol(
        &mut self,
        pos: DVec2,
        layer_id: &str,
        symbol: &Symbol,
    ) -> Result<(), LegendError> {
        let swatch = rect_poly(0.0, 0.0, self.layout.swatch_width, self.layout.swatch_height);
        let mut scope = SavedState::new(&mut *self.canvas);
        scope.translate(pos.x, pos.y);

        for part in &symbol.parts {
            if !part.references_layer(layer_id) {
                continue;
            }
            match part {
                SymbolPart::Hatch(h) => {
                    let mut clip = SavedState::new(&mut *scope);
                    clip_poly(&mut *clip, &swatch);
                    hatch::draw_hatch(&mut *clip, h, &swatch)?;
                }
                SymbolPart::Pattern(p) => {
                    let mut clip = SavedState::new(&mut *scope);
                    clip_poly(&mut *clip, &swatch);
                    pattern::draw_pattern(&mut *clip, p, &swatch, layer_id)?;
                }
                SymbolPart::Decoration(_) => {
                    debug!("decoration on point symbol '{}' ignored", symbol.id);
                }
                _ => draw_shape_for_layer(&mut *scope, part, layer_id)?,
            }
        }
        Ok(())
    }

    /// Area symbols: a fixed-size swatch, filled/outlined/hatched/tiled.
    fn draw_area_symbol(
        &mut self,
        pos: DVec2,
        layer_id: &str,
        symbol: &Symbol,
    ) -> Result<(), LegendError> {
        let (w, h) = (self.layout.swatch_width, self.layout.swatch_height);
        let swatch = rect_poly(pos.x, pos.y, w, h);

        for part in &symbol.parts {
            if !part.references_layer(layer_id) {
                continue;
            }
            match part {
                SymbolPart::Path(p) => {
                    let fill = p.fill.as_deref() == Some(layer_id);
                    let stroke = p.stroke.as_deref() == Some(layer_id);
                    if stroke {
                        apply_stroke_style(self.canvas, &p.style, "path")?;
                    }
                    self.canvas
                        .rect(pos.x - w * 0.5, pos.y - h * 0.5, w, h, fill, stroke);
                }
                SymbolPart::Hatch(hatch_part) => {
                    let mut clip = SavedState::new(&mut *self.canvas);
                    clip_poly(&mut *clip, &swatch);
                    hatch::draw_hatch(&mut *clip, hatch_part, &swatch)?;
                }
                SymbolPart::Pattern(pattern_part) => {
                    let mut clip = SavedState::new(&mut *self.canvas);
                    clip_poly(&mut *clip, &swatch);
                    pattern::draw_pattern(&mut *clip, pattern_part, &swatch, layer_id)?;
                }
                _ => {
                    debug!(
                        "{} on area symbol '{}' ignored",
                        part.element_name(),
                        symbol.id
                    );
                }
            }
        }
        Ok(())
    }

    /// Line symbols: a centered sample stroke plus decorations.
    ///
    /// The sample length is trimmed so dash patterns end on a whole dash
    /// and regular decorations fit a whole number of repeats; when both
    /// constraints apply they must agree.
    fn draw_line_symbol(
        &mut self,
        pos: DVec2,
        layer_id: &str,
        symbol: &Symbol,
    ) -> Result<(), LegendError> {
        let nominal = self.layout.swatch_width;
        let sample_len = self.sample_stroke_length(layer_id, symbol, nominal)?;

        for part in &symbol.parts {
            match part {
                SymbolPart::Path(p) if p.stroke.as_deref() == Some(layer_id) => {
                    apply_stroke_style(self.canvas, &p.style, "path")?;
                    self.canvas.begin_path();
                    self.canvas.move_to(pos.x - sample_len * 0.5, pos.y);
                    self.canvas.line_to(pos.x + sample_len * 0.5, pos.y);
                    self.canvas.draw_path(false, true);
                }
                SymbolPart::Decoration(d) if part.references_layer(layer_id) => {
                    decoration::draw_stroke_decoration(
                        self.canvas,
                        d,
                        pos.x,
                        pos.y,
                        sample_len,
                        layer_id,
                    )?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn sample_stroke_length(
        &self,
        layer_id: &str,
        symbol: &Symbol,
        nominal: f64,
    ) -> Result<f64, LegendError> {
        let mut dash_len: Option<f64> = None;
        let mut decoration_len: Option<f64> = None;

        for part in &symbol.parts {
            match part {
                SymbolPart::Path(p) if p.stroke.as_deref() == Some(layer_id) => {
                    if let Some(dash) = &p.style.dash {
                        let len = dash::trim_to_whole_dashes(dash, nominal);
                        dash_len = Some(dash_len.map_or(len, |l: f64| l.min(len)));
                    }
                }
                SymbolPart::Decoration(d)
                    if d.mode == PlacementMode::Regular && part.references_layer(layer_id) =>
                {
                    if d.spacing <= 0.0 {
                        return Err(LegendError::missing_attribute("decoration", "spacing"));
                    }
                    let len = decoration::max_length_for_regular(d.offset, d.spacing, nominal);
                    decoration_len = Some(decoration_len.map_or(len, |l: f64| l.min(len)));
                }
                _ => {}
            }
        }

        if let (Some(dash), Some(dec)) = (dash_len, decoration_len) {
            if (dash - dec).abs() > SPACING_EPSILON {
                return Err(LegendError::InconsistentSpacing {
                    symbol: symbol.id.clone(),
                    dash_len: dash,
                    decoration_len: dec,
                });
            }
        }

        Ok(dash_len
            .unwrap_or(nominal)
            .min(decoration_len.unwrap_or(nominal)))
    }

    /// Label pass: one `"{id} {name}"` per symbol, independent of layering.
    fn draw_labels(&mut self, page_height: f64) {
        let mut scope = SavedState::new(&mut *self.canvas);
        scope.set_fill_color_cmyk(0.0, 0.0, 0.0, 1.0);
        scope.set_font(&self.layout.label_font, self.layout.label_size);

        let mut cursor = Cursor::new(&self.layout, page_height);
        for symbol in &self.spec.symbols {
            let pos = cursor.position();
            let text = format!("{} {}", symbol.id, symbol.name);
            scope.draw_string(
                pos.x + self.layout.label_indent,
                pos.y - self.layout.label_drop,
                &text,
            );
            cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{CanvasOp, RecordingCanvas};
    use crate::spec::{Cmyk, ColorLayer, DashSpec, PathPart, StrokeDecorationPart, StrokeStyle};

    #[test]
    fn column_wraps_after_thirty_two_rows() {
        // floor((297 - 40) / 8) = 32 entries per column
        let layout = LegendLayout {
            row_spacing: 8.0,
            ..LegendLayout::default()
        };
        let mut cursor = Cursor::new(&layout, 297.0);
        let mut positions = Vec::new();
        for _ in 0..34 {
            positions.push(cursor.position());
            cursor.advance();
        }
        assert_eq!(cursor.wraps, 1);
        assert_eq!(positions[31], dvec2(20.0, 277.0 - 31.0 * 8.0));
        // the 33rd entry starts the second column at the top
        assert_eq!(positions[32], dvec2(70.0, 277.0));
        assert_eq!(positions[33], dvec2(70.0, 269.0));
    }

    #[test]
    fn default_layout_fits_thirty_nine_rows() {
        let layout = LegendLayout::default();
        let mut cursor = Cursor::new(&layout, 297.0);
        for _ in 0..39 {
            assert_eq!(cursor.wraps, 0);
            cursor.advance();
        }
        assert_eq!(cursor.wraps, 1);
    }

    fn line_symbol(parts: Vec<SymbolPart>) -> LegendSpec {
        let mut spec = LegendSpec::default();
        spec.add_base_color("black", Cmyk::new(0.0, 0.0, 0.0, 1.0));
        spec.layers.push(ColorLayer::new("outline", "black"));
        spec.symbols.push(Symbol {
            id: "506".into(),
            name: "footpath".into(),
            kind: SymbolKind::Line,
            parts,
        });
        spec
    }

    fn dashed_path(dash: DashSpec) -> SymbolPart {
        SymbolPart::Path(PathPart {
            d: "M0,0L1,0".into(),
            fill: None,
            stroke: Some("outline".into()),
            style: StrokeStyle {
                width: Some(0.25),
                dash: Some(dash),
                ..StrokeStyle::default()
            },
        })
    }

    fn regular_decoration(offset: f64, spacing: f64) -> SymbolPart {
        SymbolPart::Decoration(StrokeDecorationPart {
            mode: PlacementMode::Regular,
            offset,
            spacing,
            parts: vec![SymbolPart::Path(PathPart {
                d: "M0,-1L0,1".into(),
                fill: None,
                stroke: Some("outline".into()),
                style: StrokeStyle::with_width(0.25),
            })],
        })
    }

    #[test]
    fn dash_trims_the_sample_stroke() {
        let spec = line_symbol(vec![dashed_path(DashSpec::new(vec![3.0, 2.0], 0.0))]);
        let mut canvas = RecordingCanvas::a4();
        LegendRenderer::new(&mut canvas, &spec).render().unwrap();
        // trimmed to 13, centered on x = 20
        assert!(canvas.ops.contains(&CanvasOp::MoveTo(20.0 - 6.5, 277.0)));
        assert!(canvas.ops.contains(&CanvasOp::LineTo(20.0 + 6.5, 277.0)));
    }

    #[test]
    fn agreeing_dash_and_decoration_render() {
        // dash trim: 13; decoration trim: floor((14-1)/3)*3 + 1 = 13
        let spec = line_symbol(vec![
            dashed_path(DashSpec::new(vec![3.0, 2.0], 0.0)),
            regular_decoration(0.5, 3.0),
        ]);
        let mut canvas = RecordingCanvas::a4();
        LegendRenderer::new(&mut canvas, &spec).render().unwrap();
        assert!(canvas.is_balanced());
    }

    #[test]
    fn disagreeing_dash_and_decoration_fail() {
        // dash trim: 13; decoration trim: floor((14-2)/5)*5 + 2 = 12
        let spec = line_symbol(vec![
            dashed_path(DashSpec::new(vec![3.0, 2.0], 0.0)),
            regular_decoration(1.0, 5.0),
        ]);
        let mut canvas = RecordingCanvas::a4();
        let err = LegendRenderer::new(&mut canvas, &spec).render().unwrap_err();
        assert!(matches!(
            err,
            LegendError::InconsistentSpacing { symbol, .. } if symbol == "506"
        ));
        assert!(canvas.is_balanced());
    }
}
