//! Tick label formatting from printf-style format strings.
//!
//! Supports one conversion per format: `%f`, `%e`, `%g` and `%d`, with an
//! optional precision, plus literal text around it and `%%`.

use grapher_common::{GrapherError, Result};
use grapher_config::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Exponent,
    General,
    Integer,
}

/// A parsed tick label format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFormat {
    prefix: String,
    suffix: String,
    conversion: Conversion,
    precision: Option<usize>,
}

impl Default for TickFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            conversion: Conversion::Fixed,
            precision: Some(2),
        }
    }
}

fn unescape(text: &str) -> String {
    text.replace("%%", "%")
}

impl TickFormat {
    /// Parses a format such as `"%.2f"` or `"%d K"`.
    pub fn parse(format: &str) -> Result<Self> {
        let invalid = |why: &str| {
            GrapherError::validation_field(
                format!("tick format {format:?}: {why}"),
                keys::TICK_FORMATSTR,
            )
        };

        let mut start = None;
        let mut i = 0;
        let bytes = format.as_bytes();
        while i < bytes.len() {
            if bytes[i] == b'%' {
                if bytes.get(i + 1) == Some(&b'%') {
                    i += 2;
                    continue;
                }
                if start.is_some() {
                    return Err(invalid("more than one conversion"));
                }
                start = Some(i);
            }
            i += 1;
        }
        let start = start.ok_or_else(|| invalid("no conversion"))?;

        let spec = &format[start + 1..];
        let end = spec
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| invalid("unterminated conversion"))?;
        let conversion = match &spec[end..=end] {
            "f" | "F" => Conversion::Fixed,
            "e" | "E" => Conversion::Exponent,
            "g" | "G" => Conversion::General,
            "d" | "i" => Conversion::Integer,
            other => return Err(invalid(&format!("unsupported conversion %{other}"))),
        };
        let flags = &spec[..end];
        let precision = match flags.split_once('.') {
            Some((_, digits)) if digits.is_empty() => Some(0),
            Some((_, digits)) => Some(
                digits
                    .parse::<usize>()
                    .map_err(|_| invalid("bad precision"))?,
            ),
            None => None,
        };

        Ok(Self {
            prefix: unescape(&format[..start]),
            suffix: unescape(&spec[end + 1..]),
            conversion,
            precision,
        })
    }

    /// Formats one tick value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let body = match self.conversion {
            Conversion::Fixed => format!("{value:.*}", self.precision.unwrap_or(6)),
            Conversion::Exponent => format_exponent(value, self.precision.unwrap_or(6)),
            Conversion::General => format_general(value, self.precision.unwrap_or(6)),
            Conversion::Integer => format!("{}", value.trunc()),
        };
        format!("{}{body}{}", self.prefix, self.suffix)
    }
}

/// `%e` style: mantissa, `e`, sign and at least two exponent digits.
fn format_exponent(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// `%g` style: the shorter of fixed and exponent notation, trailing zeros
/// removed.
#[allow(clippy::cast_possible_truncation)]
fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let exponent = value.abs().log10().floor() as i64;
    let significant = i64::try_from(precision).unwrap_or(i64::MAX);
    let text = if exponent < -4 || exponent >= significant {
        format_exponent(value, precision - 1)
    } else {
        let decimals = usize::try_from(significant - 1 - exponent).unwrap_or(0);
        format!("{value:.decimals$}")
    };
    trim_zeros(&text)
}

fn trim_zeros(text: &str) -> String {
    let (mantissa, exponent) = text
        .split_once('e')
        .map_or((text, None), |(m, e)| (m, Some(e)));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    exponent.map_or_else(|| mantissa.to_string(), |e| format!("{mantissa}e{e}"))
}
