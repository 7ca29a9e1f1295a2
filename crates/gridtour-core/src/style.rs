//! Display colours carried by targets and used by presentation layers.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const GRAY: Self = Self::from_rgb(112, 128, 144);
    pub const GREEN: Self = Self::from_rgb(34, 139, 34);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const BLUE: Self = Self::from_rgb(28, 82, 152);
    pub const BROWN: Self = Self::from_rgb(144, 95, 53);
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);

    const NAMED: [(&'static str, Color); 8] = [
        ("black", Self::BLACK),
        ("white", Self::WHITE),
        ("gray", Self::GRAY),
        ("green", Self::GREEN),
        ("red", Self::RED),
        ("blue", Self::BLUE),
        ("brown", Self::BROWN),
        ("yellow", Self::YELLOW),
    ];

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

/// Accepts `#rrggbb` or one of the palette names (case-insensitive).
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseColorError(s.to_string()));
            }
            return u32::from_str_radix(hex, 16)
                .map(Color)
                .map_err(|_| ParseColorError(s.to_string()));
        }
        Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, c)| c)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Error returned when a colour string is neither `#rrggbb` nor a known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_hex_rejected() {
        assert!("#+fffff".parse::<Color>().is_err());
        assert!("#-00000".parse::<Color>().is_err());
        assert!("# fffff".parse::<Color>().is_err());
        assert_eq!("#0FFFFF".parse::<Color>(), Ok(Color::from_rgb(0x0f, 0xff, 0xff)));
    }

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
        assert_eq!(c.to_string(), "#abcdef");
    }

    #[test]
    fn parse_hex_and_names() {
        assert_eq!("#228b22".parse::<Color>(), Ok(Color::GREEN));
        assert_eq!("GREEN".parse::<Color>(), Ok(Color::GREEN));
        assert_eq!(" yellow ".parse::<Color>(), Ok(Color::YELLOW));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("mauve".parse::<Color>().is_err());
    }
}
