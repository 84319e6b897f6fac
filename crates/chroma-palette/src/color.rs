//! RGB values and identifier rules.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern is valid"));

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Whether `s` is usable as a color or category name.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb(u32);

impl Rgb {
    /// Largest representable value.
    pub const MAX: u32 = 0xFF_FFFF;

    /// Wrap a raw value, rejecting anything wider than 24 bits.
    pub fn new(value: u32) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Parse exactly six hex digits, without a `#` prefix.
    pub fn from_hex(s: &str) -> Option<Self> {
        if !HEX_COLOR.is_match(s) {
            return None;
        }
        u32::from_str_radix(s, 16).ok().map(Self)
    }

    /// The packed `0xRRGGBB` value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl fmt::LowerHex for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
