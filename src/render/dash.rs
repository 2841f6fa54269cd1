//! Dash geometry: whole-dash trimming of the sample stroke.

use crate::spec::DashSpec;

/// Shrink `max_len` so the dash pattern ends on a whole dash.
///
/// A legend's sample stroke looks wrong when it stops mid-gap, so the
/// stroke is trimmed to the largest length not exceeding `max_len` that
/// holds a whole number of dash cycles (accounting for the trailing gap and
/// the phase offset on both ends). A pattern summing to zero means no
/// dashing; the length passes through unchanged.
///
/// The result is always in `[0, max_len]`.
pub fn trim_to_whole_dashes(dash: &DashSpec, max_len: f64) -> f64 {
    let total = dash.cycle_length();
    if total <= 0.0 {
        return max_len;
    }
    let trailing = dash.pattern.last().copied().unwrap_or(0.0);
    let cycles = ((max_len + trailing + 2.0 * dash.offset) / total).floor();
    let length = total * cycles - trailing - 2.0 * dash.offset;
    length.clamp(0.0, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_three_two_pattern() {
        // cycles = floor((14 + 2 + 0) / 5) = 3, length = 15 - 2 - 0 = 13
        let dash = DashSpec::new(vec![3.0, 2.0], 0.0);
        assert_eq!(trim_to_whole_dashes(&dash, 14.0), 13.0);
    }

    #[test]
    fn empty_pattern_is_identity() {
        assert_eq!(trim_to_whole_dashes(&DashSpec::default(), 14.0), 14.0);
    }

    #[test]
    fn zero_sum_pattern_is_identity() {
        let dash = DashSpec::new(vec![0.0, 0.0], 1.0);
        assert_eq!(trim_to_whole_dashes(&dash, 14.0), 14.0);
    }

    #[test]
    fn offset_shifts_both_ends() {
        // cycles = floor((14 + 2 + 2) / 5) = 3, length = 15 - 2 - 2 = 11
        let dash = DashSpec::new(vec![3.0, 2.0], 1.0);
        assert_eq!(trim_to_whole_dashes(&dash, 14.0), 11.0);
    }

    #[test]
    fn never_exceeds_max_len_and_never_negative() {
        let patterns = [
            vec![3.0, 2.0],
            vec![1.0],
            vec![0.5, 0.25, 0.5, 0.25],
            vec![10.0, 8.0],
            vec![40.0, 2.0],
        ];
        for pattern in patterns {
            for offset in [0.0, 0.5, 1.0, 3.0] {
                for max_len in [0.0, 1.0, 5.0, 14.0, 100.0] {
                    let dash = DashSpec::new(pattern.clone(), offset);
                    let len = trim_to_whole_dashes(&dash, max_len);
                    assert!(
                        (0.0..=max_len).contains(&len),
                        "pattern {pattern:?} offset {offset} max {max_len} gave {len}"
                    );
                }
            }
        }
    }
}
