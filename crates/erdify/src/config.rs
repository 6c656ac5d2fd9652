//! Configuration types for erdify diagram layout and export.
//!
//! This module provides configuration structures that control how diagrams
//! are exported, styled and previewed. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Controls the placement walk and position pinning.
//! - [`StyleConfig`] - Controls colors and fonts.
//! - [`PreviewConfig`] - Controls the preview debounce delay.
//!
//! # Example
//!
//! ```
//! # use erdify::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.layout().pin_positions());
//! assert!(config.style().dot_style().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use erdify_core::{ValidationError, color::Color};

use crate::export::DotStyle;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Preview configuration section.
    #[serde(default)]
    preview: PreviewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, preview: PreviewConfig) -> Self {
        Self {
            layout,
            style,
            preview,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the preview configuration.
    pub fn preview(&self) -> &PreviewConfig {
        &self.preview
    }
}

/// Layout configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Whether exported positions carry the `!` pin suffix.
    #[serde(default = "default_pin_positions")]
    pin_positions: bool,

    /// Placement walk budget, in queue visits per entity.
    #[serde(default = "default_max_visits_per_entity")]
    max_visits_per_entity: usize,

    /// Gap, in vertical steps, above the row of entities the walk missed.
    #[serde(default = "default_disconnected_row_gap")]
    disconnected_row_gap: f64,
}

fn default_pin_positions() -> bool {
    true
}

fn default_max_visits_per_entity() -> usize {
    10
}

fn default_disconnected_row_gap() -> f64 {
    1.5
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pin_positions: default_pin_positions(),
            max_visits_per_entity: default_max_visits_per_entity(),
            disconnected_row_gap: default_disconnected_row_gap(),
        }
    }
}

impl LayoutConfig {
    pub fn new(pin_positions: bool, max_visits_per_entity: usize, disconnected_row_gap: f64) -> Self {
        Self {
            pin_positions,
            max_visits_per_entity,
            disconnected_row_gap,
        }
    }

    /// Returns true when node positions are pinned.
    pub fn pin_positions(&self) -> bool {
        self.pin_positions
    }

    pub fn max_visits_per_entity(&self) -> usize {
        self.max_visits_per_entity
    }

    pub fn disconnected_row_gap(&self) -> f64 {
        self.disconnected_row_gap
    }
}

/// Visual styling configuration.
///
/// Colors are CSS color strings. Fields that are not set keep the defaults of
/// [`DotStyle`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    fill_color: Option<String>,
    #[serde(default)]
    font_color: Option<String>,
    #[serde(default)]
    cardinality_color: Option<String>,
    #[serde(default)]
    relationship_attribute_edge_color: Option<String>,
    #[serde(default)]
    font_name: Option<String>,
    #[serde(default)]
    bold_font_name: Option<String>,
}

impl StyleConfig {
    /// Builds the [`DotStyle`] described by this section.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidColor`] if a configured color cannot
    /// be parsed.
    pub fn dot_style(&self) -> Result<DotStyle, ValidationError> {
        let mut style = DotStyle::default();
        if let Some(color) = parse_color(&self.background_color)? {
            style = style.with_background(color);
        }
        if let Some(color) = parse_color(&self.fill_color)? {
            style = style.with_fill(color);
        }
        if let Some(color) = parse_color(&self.font_color)? {
            style = style.with_font_color(color);
        }
        if let Some(color) = parse_color(&self.cardinality_color)? {
            style = style.with_cardinality_label(color);
        }
        if let Some(color) = parse_color(&self.relationship_attribute_edge_color)? {
            style = style.with_relationship_attribute_edge(color);
        }
        if self.font_name.is_some() || self.bold_font_name.is_some() {
            let regular = self.font_name.as_deref().unwrap_or("Arial");
            let bold = self
                .bold_font_name
                .clone()
                .unwrap_or_else(|| format!("{regular} Bold"));
            style = style.with_fonts(regular, bold);
        }
        Ok(style)
    }
}

fn parse_color(value: &Option<String>) -> Result<Option<Color>, ValidationError> {
    value.as_deref().map(Color::new).transpose()
}

/// Preview configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Quiet period after a field edit before the preview is recomputed.
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl PreviewConfig {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce_ms: debounce.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }

    /// Returns the debounce delay.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
