//! Renders a cartographic legend from a Map Symbol Specification (MSS)
//! document.
//!
//! The legend is laid out as rows of sample graphics (wrapped into columns
//! when a page fills up) plus one label per symbol. Drawing goes through
//! the abstract [`Canvas`] contract; producing an actual page description
//! (PDF, raster) is the backend's job, as is loading the specification
//! document into the [`spec`] structures.
//!
//! # Example
//!
//! ```
//! use mss_legend::recording::RecordingCanvas;
//! use mss_legend::spec::{Cmyk, ColorLayer, LegendSpec};
//!
//! let mut spec = LegendSpec::default();
//! spec.add_base_color("black", Cmyk::new(0.0, 0.0, 0.0, 1.0));
//! spec.layers.push(ColorLayer::new("outline", "black"));
//!
//! let mut canvas = RecordingCanvas::a4();
//! mss_legend::render_legend(&mut canvas, &spec)?;
//! # Ok::<(), mss_legend::LegendError>(())
//! ```

pub mod canvas;
pub mod errors;
pub mod log;
pub mod path;
pub mod recording;
pub mod render;
pub mod spec;

pub use canvas::{Canvas, LineCap, LineJoin, SavedState};
pub use errors::{LegendError, SPACING_EPSILON};
pub use path::{CompiledPath, PathInstruction};
pub use render::{LegendLayout, LegendRenderer};
pub use spec::LegendSpec;

/// Render the whole legend with the default layout metrics.
///
/// Convenience wrapper around [`LegendRenderer`]; use the renderer directly
/// to override the [`LegendLayout`].
pub fn render_legend<C: Canvas + ?Sized>(
    canvas: &mut C,
    spec: &LegendSpec,
) -> Result<(), LegendError> {
    LegendRenderer::new(canvas, spec).render()
}
