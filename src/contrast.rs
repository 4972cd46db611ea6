// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast math - WCAG relative luminance and contrast ratio
//!
//! Works on resolved colors, never rendered pixels. Translucent colors are
//! composited with source-over blending before luminance is taken:
//! - the background is blended over a backdrop (white unless configured)
//! - the foreground is blended over the resolved background
//!
//! The white backdrop is a heuristic. Over dark surfaces it overstates the
//! contrast of light translucent backgrounds, so callers that know the real
//! surface should pass it to [`contrast_ratio_over`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Lowest possible contrast ratio (identical colors)
pub const MIN_RATIO: f64 = 1.0;
/// Highest possible contrast ratio (black on white)
pub const MAX_RATIO: f64 = 21.0;

/// An sRGB color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 255 is fully opaque
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xAARRGGBB` integer, the layout used by Android color ints
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Same channels with alpha forced to 255
    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    fn alpha_f64(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#aarrggbb` (alpha first, as Android writes it)
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        8 => u32::from_str_radix(hex, 16).ok().map(Color::from_argb),
        _ => None,
    }
}

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$")
            .expect("valid regex")
    })
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, alpha)` with alpha in [0, 1]
pub fn parse_rgb_color(value: &str) -> Option<Color> {
    let caps = rgb_regex().captures(value.trim())?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    let a = match caps.get(4) {
        Some(m) => {
            let alpha: f64 = m.as_str().parse().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            (alpha * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Color::rgba(r, g, b, a))
}

/// Parse a named color
pub fn parse_named_color(name: &str) -> Option<Color> {
    let rgb = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (68, 68, 68),
        "lightgray" | "lightgrey" => (204, 204, 204),
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
        "transparent" => return Some(Color::TRANSPARENT),
        _ => return None,
    };
    Some(Color::rgb(rgb.0, rgb.1, rgb.2))
}

/// Parse any supported color syntax
pub fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed)
    }
}

fn linearize(component: f64) -> f64 {
    if component <= 0.03928 {
        component / 12.92
    } else {
        ((component + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of sRGB components already normalized to [0, 1]
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Relative luminance of a color, ignoring its alpha
pub fn relative_luminance(color: Color) -> f64 {
    luminance(
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
    )
}

/// Composite `fg` over `bg` (source-over, straight alpha).
///
/// Fully transparent inputs on both sides yield `bg` unchanged.
pub fn blend(fg: Color, bg: Color) -> Color {
    let a_fg = fg.alpha_f64();
    let a_bg = bg.alpha_f64();
    let a_out = a_fg + a_bg * (1.0 - a_fg);
    if a_out <= 0.0 {
        return bg;
    }

    let channel = |c_fg: u8, c_bg: u8| -> u8 {
        let v = (c_fg as f64 * a_fg + c_bg as f64 * a_bg * (1.0 - a_fg)) / a_out;
        v.round().clamp(0.0, 255.0) as u8
    };

    Color::rgba(
        channel(fg.r, bg.r),
        channel(fg.g, bg.g),
        channel(fg.b, bg.b),
        (a_out * 255.0).round() as u8,
    )
}

/// Ratio between two luminance values, clamped to [1, 21]
pub fn luminance_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    ((lighter + 0.05) / (darker + 0.05)).clamp(MIN_RATIO, MAX_RATIO)
}

/// Contrast ratio of `fg` on `bg`, resolving a translucent background
/// against white
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    contrast_ratio_over(fg, bg, Color::WHITE)
}

/// Contrast ratio of `fg` on `bg`, resolving a translucent background
/// against `backdrop` (treated as opaque)
pub fn contrast_ratio_over(fg: Color, bg: Color, backdrop: Color) -> f64 {
    let effective_bg = if bg.is_opaque() {
        bg
    } else {
        blend(bg, backdrop.opaque())
    };
    let effective_fg = if fg.is_opaque() {
        fg
    } else {
        blend(fg, effective_bg)
    };
    luminance_ratio(
        relative_luminance(effective_fg),
        relative_luminance(effective_bg),
    )
}
