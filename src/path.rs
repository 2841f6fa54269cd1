//! Path Compiler: turns the compact path mini-language into an ordered
//! instruction list.
//!
//! The language is a small SVG-like dialect: `M`/`L` take coordinate pairs,
//! `C` takes six-number groups, `Z` closes the subpath. Lowercase letters
//! are relative to the current point, and extra coordinate groups after a
//! letter repeat the command. Compilation is a pure function: the input
//! string is never mutated and every call produces a fresh instruction list.

use glam::{DVec2, dvec2};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::LegendError;

#[derive(Parser)]
#[grammar = "path.pest"]
struct PathParser;

/// One drawing instruction, in the path's local frame.
///
/// All coordinates are absolute: relative input commands are resolved
/// against the current point during compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathInstruction {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo { c1: DVec2, c2: DVec2, to: DVec2 },
    ClosePath,
}

/// A compiled path plus the final current point.
///
/// Note: `ClosePath` does not move the current point back to the subpath
/// start; `end_point` after a trailing `Z` is the last explicit coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    pub instructions: Vec<PathInstruction>,
    pub end_point: DVec2,
}

/// Compile a path data string.
///
/// Fails with [`LegendError::MalformedPath`] when the string violates the
/// grammar or a numeric group is incomplete.
pub fn compile(d: &str) -> Result<CompiledPath, LegendError> {
    let mut pairs = PathParser::parse(Rule::path, d).map_err(|e| from_pest_error(d, e))?;
    let path = pairs
        .next()
        .ok_or_else(|| LegendError::malformed_path(d, (0usize, 0usize), "empty path"))?;

    let mut instructions = Vec::new();
    let mut cursor = DVec2::ZERO;
    for command in path.into_inner() {
        match command.as_rule() {
            Rule::command => compile_command(d, command, &mut instructions, &mut cursor)?,
            Rule::EOI => {}
            rule => {
                return Err(LegendError::malformed_path(
                    d,
                    (0usize, 0usize),
                    format!("unexpected rule {rule:?}"),
                ));
            }
        }
    }

    Ok(CompiledPath {
        instructions,
        end_point: cursor,
    })
}

fn compile_command(
    d: &str,
    command: Pair<'_, Rule>,
    out: &mut Vec<PathInstruction>,
    cursor: &mut DVec2,
) -> Result<(), LegendError> {
    let command_span = span_of(command.as_span());
    let mut inner = command.into_inner();
    let letter = match inner.next() {
        Some(pair) => pair,
        None => {
            return Err(LegendError::malformed_path(d, command_span, "missing command letter"));
        }
    };
    let letter_str = letter.as_str();
    let relative = letter_str.chars().all(|c| c.is_ascii_lowercase());

    let mut numbers = Vec::new();
    for pair in inner {
        let value: f64 = pair.as_str().parse().map_err(|_| {
            LegendError::malformed_path(d, span_of(pair.as_span()), "invalid number")
        })?;
        numbers.push(value);
    }

    match letter_str.to_ascii_uppercase().as_str() {
        "M" => {
            check_group(d, command_span, letter_str, &numbers, 2)?;
            // Standard rule: the first pair of an M token moves, every
            // further pair under the same token draws.
            for (i, pair) in numbers.chunks_exact(2).enumerate() {
                let mut p = dvec2(pair[0], pair[1]);
                if relative {
                    p += *cursor;
                }
                out.push(if i == 0 {
                    PathInstruction::MoveTo(p)
                } else {
                    PathInstruction::LineTo(p)
                });
                *cursor = p;
            }
        }
        "L" => {
            check_group(d, command_span, letter_str, &numbers, 2)?;
            for pair in numbers.chunks_exact(2) {
                let mut p = dvec2(pair[0], pair[1]);
                if relative {
                    p += *cursor;
                }
                out.push(PathInstruction::LineTo(p));
                *cursor = p;
            }
        }
        "C" => {
            check_group(d, command_span, letter_str, &numbers, 6)?;
            for group in numbers.chunks_exact(6) {
                let mut c1 = dvec2(group[0], group[1]);
                let mut c2 = dvec2(group[2], group[3]);
                let mut to = dvec2(group[4], group[5]);
                if relative {
                    c1 += *cursor;
                    c2 += *cursor;
                    to += *cursor;
                }
                out.push(PathInstruction::CubicTo { c1, c2, to });
                *cursor = to;
            }
        }
        "Z" => {
            if !numbers.is_empty() {
                return Err(LegendError::malformed_path(
                    d,
                    command_span,
                    "closepath takes no coordinates",
                ));
            }
            out.push(PathInstruction::ClosePath);
            // The current point is deliberately left where it was; see
            // the CompiledPath docs.
        }
        other => {
            return Err(LegendError::malformed_path(
                d,
                command_span,
                format!("unknown command '{other}'"),
            ));
        }
    }

    Ok(())
}

fn check_group(
    d: &str,
    span: (usize, usize),
    letter: &str,
    numbers: &[f64],
    group: usize,
) -> Result<(), LegendError> {
    if numbers.is_empty() || numbers.len() % group != 0 {
        return Err(LegendError::malformed_path(
            d,
            span,
            format!(
                "'{letter}' expects groups of {group} coordinates, got {}",
                numbers.len()
            ),
        ));
    }
    Ok(())
}

fn span_of(span: pest::Span<'_>) -> (usize, usize) {
    (span.start(), span.end() - span.start())
}

fn from_pest_error(d: &str, e: pest::error::Error<Rule>) -> LegendError {
    use pest::error::InputLocation;

    let (start, len) = match e.location {
        InputLocation::Pos(p) => (p, usize::from(p < d.len())),
        InputLocation::Span((start, end)) => (start, end - start),
    };
    let message = if start == 0 {
        "path must begin with a command letter"
    } else {
        "expected a command letter or number"
    };
    LegendError::malformed_path(d, (start, len), message)
}
