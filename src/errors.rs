//! Error types with rich diagnostics using miette
//!
//! Every error here is fatal for the current render pass: a malformed or
//! inconsistent legend entry means the specification itself is wrong, so
//! nothing is defaulted or skipped. The caller decides whether to abort the
//! whole run or drop the affected symbol.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Two computed sample lengths count as equal within this tolerance.
///
/// Matches the 3-decimal rounding applied to the regular decoration trim.
pub const SPACING_EPSILON: f64 = 1e-3;

/// Errors raised while composing a legend.
#[derive(Error, Diagnostic, Debug)]
pub enum LegendError {
    #[error("malformed path: {message}")]
    #[diagnostic(code(mss::path::malformed))]
    MalformedPath {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("layer '{layer}' references unknown base color '{color}'")]
    #[diagnostic(
        code(mss::color::unresolved),
        help("every color layer must name an id from the BaseColors table")
    )]
    UnresolvedColorId { layer: String, color: String },

    #[error(
        "symbol '{symbol}': dash pattern trims the sample stroke to {dash_len} \
         but the decoration spacing trims it to {decoration_len}"
    )]
    #[diagnostic(
        code(mss::line::inconsistent_spacing),
        help("adjust the dash pattern or the decoration offset/spacing so both agree")
    )]
    InconsistentSpacing {
        symbol: String,
        dash_len: f64,
        decoration_len: f64,
    },

    #[error("{element} is missing required attribute '{attribute}'")]
    #[diagnostic(code(mss::spec::missing_attribute))]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
}

impl LegendError {
    /// Build a [`LegendError::MalformedPath`] over a path data string.
    pub(crate) fn malformed_path(
        d: &str,
        span: impl Into<SourceSpan>,
        message: impl Into<String>,
    ) -> Self {
        LegendError::MalformedPath {
            message: message.into(),
            src: NamedSource::new("<path d>", d.to_string()),
            span: span.into(),
        }
    }

    pub(crate) fn missing_attribute(element: impl Into<String>, attribute: &'static str) -> Self {
        LegendError::MissingAttribute {
            element: element.into(),
            attribute,
        }
    }
}
