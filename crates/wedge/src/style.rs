use crate::error::MenuError;
use derive_more::{Deref, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

/// An sRGB color written as `#rrggbb` or `#rrggbbaa` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgba::<u8>::new(red, green, blue, alpha).into_format())
    }

    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba8(red, green, blue, u8::MAX)
    }

    pub fn components(&self) -> (f64, f64, f64, f64) {
        self.0.into_components()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        // from_str_radix would also take a sign
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let (rgb, alpha) = match hex.len() {
            6 => (hex, u8::MAX),
            8 => (
                &hex[..6],
                u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?,
            ),
            _ => return Err(err()),
        };
        let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;

        Ok(Self::from_rgba8(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Srgba<u8> = self.0.into_format();
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)?;
        if c.alpha != u8::MAX {
            write!(f, "{:02x}", c.alpha)?;
        }
        Ok(())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    StrumDisplay,
    DeserializeFromStr,
    SerializeDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub family: String,
    /// Size in points.
    pub size: f64,
    pub weight: FontWeight,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 10.0,
            weight: FontWeight::Bold,
        }
    }
}

/// Two-stop linear fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub from: Color,
    pub to: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    pub outer_radius: f64,
    /// Only used to place labels, hit-testing covers the whole slice.
    pub inner_radius: f64,
    pub label_width: f64,
    pub label_height: f64,
    pub font: FontStyle,
    pub idle_fill: Fill,
    pub hover_fill: Fill,
    pub outline: Outline,
    pub label_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            outer_radius: 100.0,
            inner_radius: 30.0,
            label_width: 80.0,
            label_height: 40.0,
            font: FontStyle::default(),
            idle_fill: Fill {
                from: Color::from_rgb8(255, 255, 255),
                to: Color::from_rgb8(200, 200, 200),
            },
            hover_fill: Fill {
                from: Color::from_rgba8(255, 255, 255, 150),
                to: Color::from_rgba8(150, 150, 150, 150),
            },
            outline: Outline {
                color: Color::from_rgb8(150, 150, 150),
                width: 0.5,
            },
            label_color: Color::from_rgb8(0, 0, 0),
        }
    }
}

impl MenuStyle {
    /// Side length of the square the menu occupies.
    pub fn side(&self) -> f64 {
        self.outer_radius * 2.0
    }

    /// Distance from the center at which labels are centered.
    pub fn label_distance(&self) -> f64 {
        (self.outer_radius + self.inner_radius) / 2.0
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        let invalid = |msg: String| Err(MenuError::InvalidStyle(msg));

        if !self.outer_radius.is_finite() || self.outer_radius <= 0.0 {
            return invalid(format!("outer radius {} must be positive", self.outer_radius));
        }
        if !self.inner_radius.is_finite() || self.inner_radius < 0.0 {
            return invalid(format!("inner radius {} must not be negative", self.inner_radius));
        }
        if self.inner_radius >= self.outer_radius {
            return invalid(format!(
                "inner radius {} must be smaller than outer radius {}",
                self.inner_radius, self.outer_radius
            ));
        }
        if !(self.label_width > 0.0 && self.label_height > 0.0) {
            return invalid(format!(
                "label box {}x{} must have a positive size",
                self.label_width, self.label_height
            ));
        }
        if !(self.font.size > 0.0) || !self.outline.width.is_finite() || self.outline.width < 0.0 {
            return invalid("font size and outline width must be positive".to_string());
        }
        Ok(())
    }
}
