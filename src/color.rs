// SPDX-License-Identifier: PMPL-1.0-or-later
//! sRGB colors, WCAG contrast ratios and contrast remediation.
//!
//! - Relative luminance and contrast ratio per WCAG 2.x
//!   (<https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>)
//! - HSL lightness shifting for candidate colors
//! - [`adjust_for_contrast`]: walks a foreground color toward black or white
//!   until it meets a required ratio against a fixed background

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Minimum ratio for normal text at level AA
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for large text at level AA
pub const AA_LARGE: f64 = 3.0;
/// Minimum ratio for normal text at level AAA
pub const AAA_NORMAL: f64 = 7.0;
/// Minimum ratio for large text at level AAA
pub const AAA_LARGE: f64 = 4.5;

/// Lightness moved on the first adjustment iteration (fraction of 0..=1)
pub const INITIAL_STEP: f64 = 0.05;
/// Hard cap on adjustment iterations
pub const MAX_ITERATIONS: u32 = 20;
/// Iteration count after which the step starts growing
pub const ACCELERATE_AFTER: u32 = 10;
/// Per-iteration step multiplier once accelerating
pub const STEP_GROWTH: f64 = 1.5;

/// Background luminance above which foregrounds are darkened
const LIGHT_BACKGROUND: f64 = 0.5;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+%?\s*)?\)$")
        .expect("valid regex")
});

/// Errors produced while parsing a color string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("rgb channel out of range in {0}")]
    ChannelOutOfRange(String),

    #[error("unrecognised color: {0}")]
    Unrecognised(String),
}

/// An opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`; the leading `#` is optional
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(value.to_string()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(value.to_string()))
        };
        match hex.len() {
            3 => Ok(Self::new(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(ColorError::InvalidHex(value.to_string())),
        }
    }

    /// Parse an `rgb()` / `rgba()` functional notation; alpha is ignored
    pub fn from_rgb_function(value: &str) -> Result<Self, ColorError> {
        let caps = RGB_FUNCTION
            .captures(value.trim())
            .ok_or_else(|| ColorError::Unrecognised(value.to_string()))?;
        let channel = |i: usize| {
            caps[i]
                .parse::<u8>()
                .map_err(|_| ColorError::ChannelOutOfRange(value.to_string()))
        };
        Ok(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Look up a CSS named color
    pub fn from_name(name: &str) -> Option<Self> {
        let rgb = match name {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "gray" | "grey" => (128, 128, 128),
            "darkgray" | "darkgrey" => (169, 169, 169),
            "lightgray" | "lightgrey" => (211, 211, 211),
            "dimgray" | "dimgrey" => (105, 105, 105),
            "silver" => (192, 192, 192),
            "maroon" => (128, 0, 0),
            "olive" => (128, 128, 0),
            "lime" => (0, 255, 0),
            "aqua" | "cyan" => (0, 255, 255),
            "teal" => (0, 128, 128),
            "navy" => (0, 0, 128),
            "fuchsia" | "magenta" => (255, 0, 255),
            "purple" => (128, 0, 128),
            "orange" => (255, 165, 0),
            "pink" => (255, 192, 203),
            "brown" => (165, 42, 42),
            "gold" => (255, 215, 0),
            "whitesmoke" => (245, 245, 245),
            "gainsboro" => (220, 220, 220),
            _ => return None,
        };
        Some(Self::new(rgb.0, rgb.1, rgb.2))
    }

    /// Relative luminance in 0.0..=1.0
    pub fn relative_luminance(&self) -> f64 {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| {
            let v = c as f64 / 255.0;
            if v <= 0.04045 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        });
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn to_hsl(&self) -> Hsl {
        Hsl::from(*self)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(ColorError::Empty);
        }
        if value.starts_with("rgb") {
            return Self::from_rgb_function(&value);
        }
        if let Some(named) = Self::from_name(&value) {
            return Ok(named);
        }
        Self::from_hex(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Hue (degrees), saturation and lightness (0.0..=1.0)
///
/// Candidates stay in HSL between adjustment steps so repeated shifts do
/// not accumulate 8-bit rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Lower lightness by `amount`, clamped at 0
    pub fn darken(self, amount: f64) -> Self {
        Self { l: (self.l - amount).clamp(0.0, 1.0), ..self }
    }

    /// Raise lightness by `amount`, clamped at 1
    pub fn lighten(self, amount: f64) -> Self {
        Self { l: (self.l + amount).clamp(0.0, 1.0), ..self }
    }

    pub fn to_color(self) -> Color {
        let (r, g, b) = if self.s == 0.0 {
            (self.l, self.l, self.l)
        } else {
            let h = self.h / 360.0;
            let q = if self.l < 0.5 {
                self.l * (1.0 + self.s)
            } else {
                self.l + self.s - self.l * self.s
            };
            let p = 2.0 * self.l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };
        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl From<Color> for Hsl {
    fn from(color: Color) -> Self {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self { h: h * 60.0, s, l }
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Contrast ratio between two colors, in 1.0..=21.0 and symmetric
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let l1 = a.relative_luminance();
    let l2 = b.relative_luminance();
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Minimum ratio for a conformance target and text size.
/// Level A has no contrast criterion, so it maps to the AA minimum.
pub fn required_ratio(level: crate::findings::WcagLevel, large_text: bool) -> f64 {
    use crate::findings::WcagLevel;
    match (level, large_text) {
        (WcagLevel::AAA, false) => AAA_NORMAL,
        (WcagLevel::AAA, true) => AAA_LARGE,
        (_, false) => AA_NORMAL,
        (_, true) => AA_LARGE,
    }
}

/// Round a ratio to two decimals for display
pub fn display_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}

/// Which way the foreground is pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Darken,
    Lighten,
}

impl Direction {
    /// Darken against light backgrounds, lighten otherwise
    pub fn for_background(background: Color) -> Self {
        if background.relative_luminance() > LIGHT_BACKGROUND {
            Direction::Darken
        } else {
            Direction::Lighten
        }
    }

    fn apply(self, hsl: Hsl, amount: f64) -> Hsl {
        match self {
            Direction::Darken => hsl.darken(amount),
            Direction::Lighten => hsl.lighten(amount),
        }
    }

    /// The end of the lightness axis in this direction
    pub fn extreme(self) -> Color {
        match self {
            Direction::Darken => Color::BLACK,
            Direction::Lighten => Color::WHITE,
        }
    }
}

/// How an adjustment run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The original foreground already met the requirement
    AlreadyCompliant,
    /// A shifted candidate met the requirement
    Converged,
    /// The iteration cap was hit; the result is pure black or white
    Exhausted,
}

/// Full record of one [`adjust_for_contrast_detailed`] run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub color: Color,
    pub ratio: f64,
    pub iterations: u32,
    pub direction: Option<Direction>,
    pub outcome: Outcome,
}

/// Return a foreground that meets `required` against `background`.
///
/// The foreground is returned untouched when it already passes. Never fails;
/// callers validate color input before getting here.
pub fn adjust_for_contrast(foreground: Color, background: Color, required: f64) -> Color {
    adjust_for_contrast_detailed(foreground, background, required).color
}

pub fn adjust_for_contrast_detailed(
    foreground: Color,
    background: Color,
    required: f64,
) -> Adjustment {
    let mut ratio = contrast_ratio(foreground, background);
    if ratio >= required {
        return Adjustment {
            color: foreground,
            ratio,
            iterations: 0,
            direction: None,
            outcome: Outcome::AlreadyCompliant,
        };
    }

    let direction = Direction::for_background(background);
    let mut candidate = foreground.to_hsl();
    let mut color = foreground;
    let mut step = INITIAL_STEP;
    let mut iterations = 0;

    while ratio < required && iterations < MAX_ITERATIONS {
        candidate = direction.apply(candidate, step);
        color = candidate.to_color();
        ratio = contrast_ratio(color, background);
        iterations += 1;

        if iterations > ACCELERATE_AFTER {
            step *= STEP_GROWTH;
        }
    }

    if ratio < required {
        let fallback = direction.extreme();
        tracing::debug!(
            %foreground, %background, required, %fallback,
            "contrast adjustment exhausted"
        );
        return Adjustment {
            color: fallback,
            ratio: contrast_ratio(fallback, background),
            iterations,
            direction: Some(direction),
            outcome: Outcome::Exhausted,
        };
    }

    Adjustment {
        color,
        ratio,
        iterations,
        direction: Some(direction),
        outcome: Outcome::Converged,
    }
}
