use crate::ir::OBJECTIVE_TYPE;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const TYPE_COLORS: [(&str, &str); 3] = [
    ("konu", "#5c6bc0"),
    ("grup", "#8e24aa"),
    ("alt_grup", "#26a69a"),
];

const TYPE_BASE_RADIUS: [(&str, u32); 4] = [
    ("konu", 22),
    ("grup", 18),
    ("alt_grup", 14),
    (OBJECTIVE_TYPE, 10),
];

const SCORE_STOPS: [Rgb; 3] = [
    Rgb::new(0xe5, 0x39, 0x35),
    Rgb::new(0xfb, 0xc0, 0x2d),
    Rgb::new(0x43, 0xa0, 0x47),
];

pub const FALLBACK_COLOR: Rgb = Rgb::new(0x90, 0xa4, 0xae);
pub const DEFAULT_RADIUS: u32 = 10;

static CURRICULUM: Lazy<Palette> = Lazy::new(|| Palette {
    colors: TYPE_COLORS
        .iter()
        .map(|(tag, hex)| (tag.to_string(), hex.parse().unwrap_or(FALLBACK_COLOR)))
        .collect(),
    radii: TYPE_BASE_RADIUS
        .iter()
        .map(|(tag, radius)| (tag.to_string(), *radius))
        .collect(),
    fallback_color: FALLBACK_COLOR,
    default_radius: DEFAULT_RADIUS,
    score_stops: SCORE_STOPS.to_vec(),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear blend; `t` is expected in [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color '{}', expected #rgb or #rrggbb", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                let short = |idx: usize| channel(idx..idx + 1).map(|v| v * 17);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Per-type color and base-radius tables with their fallbacks, plus the
/// gradient stops used for objective scores. Read-only while a graph is
/// being built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub colors: BTreeMap<String, Rgb>,
    pub radii: BTreeMap<String, u32>,
    pub fallback_color: Rgb,
    pub default_radius: u32,
    pub score_stops: Vec<Rgb>,
}

impl Palette {
    pub fn curriculum() -> Self {
        CURRICULUM.clone()
    }

    pub fn color_for(&self, tag: &str) -> Rgb {
        self.colors.get(tag).copied().unwrap_or(self.fallback_color)
    }

    pub fn base_radius(&self, tag: &str) -> u32 {
        self.radii.get(tag).copied().unwrap_or(self.default_radius)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::curriculum()
    }
}
