//! Chip Overflow Fitting
//!
//! How many selection chips fit in the field before collapsing the rest
//! into a "+N more" indicator. gpui lays text out during paint, so widths
//! are estimated up front from label lengths with the same char-width
//! approximation the theme's typography uses; the fit itself is a plain
//! greedy accumulation, recomputed on resize and on selection change.

use crate::theme::typography::Typography;

/// Horizontal padding inside a chip (both sides plus the remove glyph)
const CHIP_PADDING: f32 = 34.0;
/// Gap between adjacent chips
pub const CHIP_GAP: f32 = 4.0;

/// Estimated rendered width of one chip in pixels
pub fn estimate_chip_width(label: &str) -> f32 {
    CHIP_PADDING + Typography::estimate_width(label, Typography::TEXT_XS)
}

/// Greedy left-to-right fit of chip widths into `available` pixels.
///
/// Stops before the first chip that would overflow; the result is capped
/// below at 1 so at least one chip always renders, and returns the full
/// count when everything fits.
pub fn max_chips_that_fit(widths: &[f32], available: f32, gap: f32) -> usize {
    if widths.is_empty() {
        return 0;
    }
    let mut used = 0.0;
    let mut fit = 0;
    for (i, width) in widths.iter().enumerate() {
        let total = width + if i > 0 { gap } else { 0.0 };
        if used + total > available {
            break;
        }
        used += total;
        fit += 1;
    }
    fit.max(1)
}

/// Convenience wrapper over labels
pub fn fit_labels(labels: &[&str], available: f32) -> usize {
    let widths: Vec<f32> = labels.iter().map(|l| estimate_chip_width(l)).collect();
    max_chips_that_fit(&widths, available, CHIP_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fit_when_space_is_ample() {
        let widths = [50.0, 50.0, 50.0];
        assert_eq!(max_chips_that_fit(&widths, 1000.0, CHIP_GAP), 3);
    }

    #[test]
    fn test_stops_before_overflow() {
        let widths = [60.0, 60.0, 60.0];
        // 60 + (4+60) = 124 fits in 130; the third (4+60) would overflow.
        assert_eq!(max_chips_that_fit(&widths, 130.0, CHIP_GAP), 2);
    }

    #[test]
    fn test_at_least_one_chip_always_renders() {
        let widths = [300.0, 40.0];
        assert_eq!(max_chips_that_fit(&widths, 100.0, CHIP_GAP), 1);
    }

    #[test]
    fn test_empty_selection_fits_zero() {
        assert_eq!(max_chips_that_fit(&[], 100.0, CHIP_GAP), 0);
    }

    #[test]
    fn test_longer_labels_estimate_wider() {
        assert!(estimate_chip_width("Cohort A Extended") > estimate_chip_width("C1"));
    }
}
