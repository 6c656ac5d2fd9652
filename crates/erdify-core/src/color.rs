//! Color handling for erdify diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are accepted as CSS color strings and written
//! out in the `#rrggbb` form Graphviz understands.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

use crate::error::ValidationError;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"white"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdify_core::color::Color;
    ///
    /// let slate = Color::new("#64748b").unwrap();
    /// assert_eq!(slate.to_dot_string(), "#64748b");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ValidationError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ValidationError::InvalidColor {
                value: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the color as `#rrggbb`, or `#rrggbbaa` when it is translucent.
    pub fn to_dot_string(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("white").expect("'white' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}
