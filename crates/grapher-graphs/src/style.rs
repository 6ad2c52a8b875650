//! matplotlib format tokens: colour, marker and line style.
//!
//! A token such as `"ro--"` combines at most one colour, one marker and one
//! line style in any order. A marker without a line draws markers only; a
//! token with neither draws a solid line. `"None"` draws nothing.

use grapher_common::{GrapherError, Result};
use plotters::style::RGBColor;

/// The tab10 colour cycle used for tokens without a colour.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Line width in points.
pub const LINE_WIDTH_POINTS: f64 = 1.5;
/// Marker size in points.
pub const MARKER_POINTS: f64 = 6.0;

fn letter_color(c: char) -> Option<RGBColor> {
    Some(match c {
        'b' => RGBColor(0, 0, 255),
        'g' => RGBColor(0, 128, 0),
        'r' => RGBColor(255, 0, 0),
        'c' => RGBColor(0, 191, 191),
        'm' => RGBColor(191, 0, 191),
        'y' => RGBColor(191, 191, 0),
        'k' => RGBColor(0, 0, 0),
        'w' => RGBColor(255, 255, 255),
        _ => return None,
    })
}

/// Marker glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `.`
    Point,
    /// `,`
    Pixel,
    /// `o`
    Circle,
    /// `v`
    TriangleDown,
    /// `^`
    TriangleUp,
    /// `<`
    TriangleLeft,
    /// `>`
    TriangleRight,
    /// `1`
    TriDown,
    /// `2`
    TriUp,
    /// `3`
    TriLeft,
    /// `4`
    TriRight,
    /// `8`
    Octagon,
    /// `s`
    Square,
    /// `p`
    Pentagon,
    /// `*`
    Star,
    /// `h`
    Hexagon1,
    /// `H`
    Hexagon2,
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// `D`
    Diamond,
    /// `d`
    ThinDiamond,
    /// `|`
    VLine,
    /// `_`
    HLine,
}

impl Marker {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '.' => Self::Point,
            ',' => Self::Pixel,
            'o' => Self::Circle,
            'v' => Self::TriangleDown,
            '^' => Self::TriangleUp,
            '<' => Self::TriangleLeft,
            '>' => Self::TriangleRight,
            '1' => Self::TriDown,
            '2' => Self::TriUp,
            '3' => Self::TriLeft,
            '4' => Self::TriRight,
            '8' => Self::Octagon,
            's' => Self::Square,
            'p' => Self::Pentagon,
            '*' => Self::Star,
            'h' => Self::Hexagon1,
            'H' => Self::Hexagon2,
            '+' => Self::Plus,
            'x' => Self::Cross,
            'D' => Self::Diamond,
            'd' => Self::ThinDiamond,
            '|' => Self::VLine,
            '_' => Self::HLine,
            _ => return None,
        })
    }

    /// Whether the glyph is drawn as strokes rather than a filled shape.
    #[must_use]
    pub const fn is_stroked(self) -> bool {
        matches!(
            self,
            Self::TriDown
                | Self::TriUp
                | Self::TriLeft
                | Self::TriRight
                | Self::Plus
                | Self::Cross
                | Self::VLine
                | Self::HLine
        )
    }
}

/// Line dash styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// `-`
    Solid,
    /// `--`
    Dashed,
    /// `-.`
    DashDot,
    /// `:`
    Dotted,
}

impl LineStyle {
    /// On/off lengths in units of the line width; empty for solid lines.
    #[must_use]
    pub const fn pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[3.7, 1.6],
            Self::DashDot => &[6.4, 1.6, 1.0, 1.6],
            Self::Dotted => &[1.0, 1.65],
        }
    }
}

/// A parsed format token before a colour has been assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatToken {
    /// Explicit colour, if the token names one.
    pub color: Option<RGBColor>,
    /// Marker glyph.
    pub marker: Option<Marker>,
    /// Connecting line.
    pub line: Option<LineStyle>,
}

impl FormatToken {
    /// The token that draws nothing.
    pub const INVISIBLE: Self = Self {
        color: None,
        marker: None,
        line: None,
    };

    /// Parses a matplotlib format token.
    pub fn parse(token: &str) -> Result<Self> {
        if (token.trim().is_empty() && !token.is_empty()) || token.eq_ignore_ascii_case("none") {
            return Ok(Self::INVISIBLE);
        }

        let mut parsed = Self::INVISIBLE;
        let chars: Vec<char> = token.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            let taken = if c == '-' && next == Some('-') {
                set(&mut parsed.line, LineStyle::Dashed, token, "line style")?;
                2
            } else if c == '-' && next == Some('.') {
                set(&mut parsed.line, LineStyle::DashDot, token, "line style")?;
                2
            } else if c == '-' {
                set(&mut parsed.line, LineStyle::Solid, token, "line style")?;
                1
            } else if c == ':' {
                set(&mut parsed.line, LineStyle::Dotted, token, "line style")?;
                1
            } else if c == 'C' && next.is_some_and(|d| d.is_ascii_digit()) {
                let index = next.and_then(|d| d.to_digit(10)).unwrap_or(0) as usize;
                set(&mut parsed.color, TAB10[index], token, "colour")?;
                2
            } else if let Some(color) = letter_color(c) {
                set(&mut parsed.color, color, token, "colour")?;
                1
            } else if let Some(marker) = Marker::from_char(c) {
                set(&mut parsed.marker, marker, token, "marker")?;
                1
            } else {
                return Err(GrapherError::style(
                    format!("unrecognized character {c:?}"),
                    token,
                ));
            };
            i += taken;
        }

        if parsed.marker.is_none() && parsed.line.is_none() {
            parsed.line = Some(LineStyle::Solid);
        }
        Ok(parsed)
    }

    /// Whether anything would be drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.marker.is_some() || self.line.is_some()
    }

    /// Fixes the colour, taking `fallback` when the token has none.
    #[must_use]
    pub fn resolve(self, fallback: RGBColor) -> SeriesStyle {
        SeriesStyle {
            color: self.color.unwrap_or(fallback),
            marker: self.marker,
            line: self.line,
        }
    }
}

fn set<T>(slot: &mut Option<T>, value: T, token: &str, what: &str) -> Result<()> {
    if slot.is_some() {
        return Err(GrapherError::style(format!("more than one {what}"), token));
    }
    *slot = Some(value);
    Ok(())
}

/// A fully resolved series style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Colour of the marker and line.
    pub color: RGBColor,
    /// Marker glyph.
    pub marker: Option<Marker>,
    /// Connecting line.
    pub line: Option<LineStyle>,
}

/// Hands out tab10 colours to tokens without one, in series order.
#[derive(Debug, Default)]
pub struct ColorCycle {
    next: usize,
}

impl ColorCycle {
    /// Resolves `token`, advancing the cycle whenever the token has no colour
    /// of its own. Invisible series take a colour too.
    pub fn resolve(&mut self, token: FormatToken) -> SeriesStyle {
        match token.color {
            Some(color) => token.resolve(color),
            None => {
                let color = TAB10[self.next % TAB10.len()];
                self.next += 1;
                token.resolve(color)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_black_points() {
        let token = FormatToken::parse("k.").unwrap();
        assert_eq!(token.color, Some(RGBColor(0, 0, 0)));
        assert_eq!(token.marker, Some(Marker::Point));
        assert_eq!(token.line, None);
    }

    #[test]
    fn test_combined_tokens_in_any_order() {
        let token = FormatToken::parse("bo--").unwrap();
        assert_eq!(token.marker, Some(Marker::Circle));
        assert_eq!(token.line, Some(LineStyle::Dashed));
        assert_eq!(FormatToken::parse("--ob").unwrap(), token);
        assert_eq!(FormatToken::parse("C3-.").unwrap().color, Some(TAB10[3]));
        assert_eq!(FormatToken::parse("k:").unwrap().line, Some(LineStyle::Dotted));
    }

    #[test]
    fn test_colour_only_and_empty_draw_solid_lines() {
        assert_eq!(FormatToken::parse("r").unwrap().line, Some(LineStyle::Solid));
        assert_eq!(FormatToken::parse("").unwrap().line, Some(LineStyle::Solid));
    }

    #[test]
    fn test_invisible_tokens() {
        assert!(!FormatToken::parse("None").unwrap().is_visible());
        assert!(!FormatToken::parse(" ").unwrap().is_visible());
    }

    #[test]
    fn test_rejects_unknown_characters() {
        let err = FormatToken::parse("kq").unwrap_err();
        assert!(matches!(err, GrapherError::Style { .. }));
        assert!(FormatToken::parse("rk").is_err());
        assert!(FormatToken::parse("o^").is_err());
    }

    #[test]
    fn test_color_cycle_skips_explicit_colours() {
        let mut cycle = ColorCycle::default();
        let first = cycle.resolve(FormatToken::parse("o").unwrap());
        let explicit = cycle.resolve(FormatToken::parse("r-").unwrap());
        let second = cycle.resolve(FormatToken::parse("--").unwrap());
        assert_eq!(first.color, TAB10[0]);
        assert_eq!(explicit.color, RGBColor(255, 0, 0));
        assert_eq!(second.color, TAB10[1]);
    }

    #[test]
    fn test_invisible_series_consume_a_colour() {
        let mut cycle = ColorCycle::default();
        let hidden = cycle.resolve(FormatToken::parse("None").unwrap());
        let next = cycle.resolve(FormatToken::parse("-").unwrap());
        assert_eq!(hidden.color, TAB10[0]);
        assert_eq!(next.color, TAB10[1]);
    }

    #[test]
    fn test_stroked_markers() {
        assert!(Marker::Plus.is_stroked());
        assert!(!Marker::Square.is_stroked());
        assert!(LineStyle::Solid.pattern().is_empty());
    }
}
