//! Hex color helpers used to keep text readable on the risk palette

use crate::{PawcastError, Result};

/// Luminance below which a background counts as dark (0-255 scale)
const DARK_LUMINANCE_THRESHOLD: f64 = 186.0;

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rgb`, `#rrggbb` or the same without `#`. Alpha is not accepted.
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PawcastError::invalid_color(hex));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(PawcastError::invalid_color(hex)),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| PawcastError::invalid_color(hex))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Perceived brightness, 0-255
    #[must_use]
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub fn is_perceptually_dark(hex: &str) -> Result<bool> {
    Ok(Rgb::parse(hex)?.luminance() < DARK_LUMINANCE_THRESHOLD)
}

/// Move every channel `fraction` of the way towards white
pub fn lighten(hex: &str, fraction: f64) -> Result<String> {
    let rgb = Rgb::parse(hex)?;
    let lift = |c: u8| {
        let c = f64::from(c);
        (c + (255.0 - c) * fraction).floor().clamp(0.0, 255.0) as u8
    };
    Ok(Rgb {
        r: lift(rgb.r),
        g: lift(rgb.g),
        b: lift(rgb.b),
    }
    .to_hex())
}

/// Muted accent derived from a card color
pub fn pastelize(hex: &str) -> Result<String> {
    lighten(hex, 0.5)
}

/// Foreground that stays readable on `background`
pub fn text_color_on(background: &str) -> Result<&'static str> {
    Ok(if is_perceptually_dark(background)? {
        "#fff"
    } else {
        "#222"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FFFFFF", false)]
    #[case("#000000", true)]
    #[case("#fff", false)]
    #[case("000", true)]
    #[case("#A1CEDC", false)]
    #[case("#88211b", true)]
    #[case("#F4B400", true)]
    fn test_is_perceptually_dark(#[case] hex: &str, #[case] dark: bool) {
        assert_eq!(is_perceptually_dark(hex).unwrap(), dark);
    }

    #[rstest]
    #[case("#000000", 0.5, "#7f7f7f")]
    #[case("#000", 0.25, "#3f3f3f")]
    #[case("#FFFFFF", 0.5, "#ffffff")]
    #[case("#0c880b", 0.0, "#0c880b")]
    #[case("#0c880b", 1.0, "#ffffff")]
    #[case("#000000", 2.0, "#ffffff")]
    fn test_lighten(#[case] hex: &str, #[case] fraction: f64, #[case] expected: &str) {
        assert_eq!(lighten(hex, fraction).unwrap(), expected);
    }

    #[test]
    fn test_pastelize() {
        assert_eq!(pastelize("#88211b").unwrap(), "#c3908d");
    }

    #[rstest]
    #[case("")]
    #[case("#12")]
    #[case("#1234")]
    #[case("#12345678")]
    #[case("#gggggg")]
    #[case("#ff00é")]
    fn test_malformed_colors_are_rejected(#[case] hex: &str) {
        assert!(matches!(
            is_perceptually_dark(hex),
            Err(PawcastError::InvalidColorFormat { .. })
        ));
        assert!(lighten(hex, 0.5).is_err());
    }

    #[test]
    fn test_text_color_on() {
        assert_eq!(text_color_on("#88211b").unwrap(), "#fff");
        assert_eq!(text_color_on("#A1CEDC").unwrap(), "#222");
    }
}
