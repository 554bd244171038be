//! 8-bit RGB colors and per-channel random color ranges.

use crate::error::ReefError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit sRGB color.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Light blue open water, the default scene background.
    pub const WATER: Rgb = Rgb::new(173, 216, 230);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `ReefError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb, ReefError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ReefError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| ReefError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an `image` pixel.
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb::new(p.0[0], p.0[1], p.0[2])
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Inclusive per-channel bounds for sampling random colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub r: (u8, u8),
    pub g: (u8, u8),
    pub b: (u8, u8),
}

impl ColorRange {
    /// Any 8-bit color.
    pub const FULL: ColorRange = ColorRange {
        r: (0, 255),
        g: (0, 255),
        b: (0, 255),
    };

    /// Warm pinks and oranges used for coral.
    pub const CORAL: ColorRange = ColorRange {
        r: (150, 255),
        g: (50, 150),
        b: (50, 100),
    };

    /// Draws one color, each channel uniform over its inclusive bounds.
    pub fn sample(&self, rng: &mut Xorshift64) -> Rgb {
        let mut channel = |(lo, hi): (u8, u8)| rng.next_int(i32::from(lo), i32::from(hi)) as u8;
        Rgb {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }

    /// Rejects ranges whose lower bound exceeds the upper bound.
    pub fn validate(&self, name: &str) -> Result<(), ReefError> {
        for (channel, (lo, hi)) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if lo > hi {
                return Err(ReefError::invalid_param(
                    name,
                    format!("channel {channel}: min {lo} > max {hi}"),
                ));
            }
        }
        Ok(())
    }
}
