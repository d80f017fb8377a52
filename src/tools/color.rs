//! Color conversion and CSS gradients

use crate::core::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Accepts `#rgb`, `#rrggbb`, with or without the leading `#`
pub fn parse_hex(raw: &str) -> Option<Rgb> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// One color in every notation the converter shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorInfo {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    /// `rgb(r, g, b)`
    pub css_rgb: String,
    /// `hsl(h, s%, l%)`
    pub css_hsl: String,
}

impl From<Rgb> for ColorInfo {
    fn from(rgb: Rgb) -> Self {
        let hsl = rgb_to_hsl(rgb);
        Self {
            hex: to_hex(rgb),
            rgb,
            hsl,
            css_rgb: format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
            css_hsl: format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l),
        }
    }
}

pub fn inspect(raw_hex: &str) -> Option<ColorInfo> {
    parse_hex(raw_hex).map(ColorInfo::from)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l: round1(l * 100.0) };
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        h: round1(h * 60.0),
        s: round1(s * 100.0),
        l: round1(l * 100.0),
    }
}

/// Out-of-range components give `None`
pub fn hsl_to_rgb(hsl: Hsl) -> Option<Rgb> {
    let Hsl { h, s, l } = hsl;
    if !(0.0..=360.0).contains(&h) || !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
        return None;
    }
    let h = (h % 360.0) / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    if s == 0.0 {
        let v = channel(l);
        return Some(Rgb { r: v, g: v, b: v });
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Some(Rgb {
        r: channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        g: channel(hue_to_rgb(p, q, h)),
        b: channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    })
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
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

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Rgb,
    /// Position in percent
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub angle: u16,
    pub stops: Vec<ColorStop>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            angle: 90,
            stops: vec![
                ColorStop { color: Rgb { r: 0x3b, g: 0x82, b: 0xf6 }, position: 0.0 },
                ColorStop { color: Rgb { r: 0x8b, g: 0x5c, b: 0xf6 }, position: 100.0 },
            ],
        }
    }
}

impl Gradient {
    pub fn new(angle: u16) -> Self {
        Self {
            angle: angle % 360,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, color: Rgb, position: f64) -> Self {
        self.stops.push(ColorStop {
            color,
            position: position.clamp(0.0, 100.0),
        });
        self
    }

    /// CSS value, or `None` with fewer than two stops
    pub fn css(&self) -> Option<String> {
        if self.stops.len() < 2 {
            return None;
        }
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        let stops: Vec<String> = stops
            .iter()
            .map(|s| format!("{} {}%", to_hex(s.color), s.position))
            .collect();
        Some(format!("linear-gradient({}deg, {})", self.angle, stops.join(", ")))
    }

    /// Full stylesheet with a fallback background color
    pub fn stylesheet(&self) -> Option<String> {
        let css = self.css()?;
        let fallback = to_hex(self.stops[0].color);
        Some(format!(
            ".gradient {{\n  background: {fallback};\n  background: {css};\n}}\n"
        ))
    }

    /// Write `gradient.css` to the download directory
    pub fn export_css(&self) -> Result<PathBuf> {
        let dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::Config("No download directory".to_string()))?;
        self.export_css_to(&dir)
    }

    pub fn export_css_to(&self, dir: &Path) -> Result<PathBuf> {
        let sheet = self
            .stylesheet()
            .ok_or_else(|| Error::InvalidInput("A gradient needs at least two colors".to_string()))?;
        fs::create_dir_all(dir)?;
        let path = dir.join("gradient.css");
        fs::write(&path, sheet)?;
        info!("Gradient exported to {:?}", path);
        Ok(path)
    }
}
