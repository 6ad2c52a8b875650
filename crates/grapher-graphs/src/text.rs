//! Label text and fonts.

use plotters::style::{FontDesc, IntoFont};

/// Font family for every label.
pub const FONT_FAMILY: &str = "sans-serif";
/// Tick label size in points.
pub const TICK_POINTS: f64 = 10.0;

/// Strips TeX markup from a label.
///
/// `$` delimiters, backslashes and grouping braces are removed, so `"$k_x$"`
/// displays as `k_x` and `"$\alpha$"` as `alpha`.
#[must_use]
pub fn display_text(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '$' | '\\' | '{' | '}'))
        .collect()
}

/// A sans-serif font `px` pixels high.
#[must_use]
pub fn font(px: f64) -> FontDesc<'static> {
    (FONT_FAMILY, px.max(1.0)).into_font()
}

/// Rough rendered width of `text` in pixels at `px`, for layout decisions
/// that must not depend on an installed font.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn approx_width(text: &str, px: f64) -> f64 {
    text.chars().count() as f64 * px * 0.55
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_strips_tex() {
        assert_eq!(display_text("$k_x$"), "k_x");
        assert_eq!(display_text("$T_p$ (K)"), "T_p (K)");
        assert_eq!(display_text(r"$\alpha_{1}$"), "alpha_1");
        assert_eq!(display_text("plain"), "plain");
    }

    #[test]
    fn test_approx_width_scales_with_length() {
        assert!(approx_width("abcd", 10.0) > approx_width("ab", 10.0));
        assert_eq!(approx_width("", 10.0), 0.0);
    }
}
