//! Configuration schema types for `mapbot.toml`
//!
//! ```toml
//! font_path = "assets/fonts/DejaVuSans.ttf"
//! image_dir = "maps"
//!
//! [render]
//! cell_width = 32
//! cell_height = 32
//! background = "white"
//! grid_color = "dimgray"
//! text_color = "black"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::color::parse_color;
use crate::font::MAP_FONT_NAME;
use crate::renderer::RenderOptions;

/// Smallest allowed cell side, in pixels
pub const MIN_CELL_SIZE: u32 = 4;

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapbotConfig {
    /// TrueType font used for legend labels (required)
    #[serde(default)]
    pub font_path: PathBuf,
    /// Directory where rendered map images are written
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// Rendering layout
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from(".")
}

/// `[render]` section
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Width of one grid cell in pixels
    #[serde(default = "default_cell_size")]
    pub cell_width: u32,
    /// Height of one grid cell in pixels
    #[serde(default = "default_cell_size")]
    pub cell_height: u32,
    /// Background color of the map and legend
    #[serde(default = "default_background")]
    pub background: String,
    /// Grid line color
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    /// Legend label color
    #[serde(default = "default_text_color")]
    pub text_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_width: default_cell_size(),
            cell_height: default_cell_size(),
            background: default_background(),
            grid_color: default_grid_color(),
            text_color: default_text_color(),
        }
    }
}

fn default_cell_size() -> u32 {
    32
}

fn default_background() -> String {
    "white".to_string()
}

fn default_grid_color() -> String {
    "dimgray".to_string()
}

fn default_text_color() -> String {
    "black".to_string()
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.cell_width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mapbot.toml: '{}' {}", self.field, self.message)
    }
}

impl MapbotConfig {
    /// Configuration with every default and the given font.
    pub fn with_font(font_path: impl Into<PathBuf>) -> Self {
        Self { font_path: font_path.into(), image_dir: default_image_dir(), render: RenderConfig::default() }
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.font_path.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "font_path".to_string(),
                message: "is not set".to_string(),
            });
        }

        for (field, value) in [
            ("render.cell_width", self.render.cell_width),
            ("render.cell_height", self.render.cell_height),
        ] {
            if value < MIN_CELL_SIZE {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("must be at least {}", MIN_CELL_SIZE),
                });
            }
        }

        for (field, value) in [
            ("render.background", &self.render.background),
            ("render.grid_color", &self.render.grid_color),
            ("render.text_color", &self.render.text_color),
        ] {
            if let Err(e) = parse_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("is not a valid color: {}", e),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Render options described by the `[render]` section.
    ///
    /// Colors that fail to parse fall back to the defaults; call
    /// [`validate`](Self::validate) first to reject them instead.
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            cell_width: self.render.cell_width,
            cell_height: self.render.cell_height,
            background: parse_color(&self.render.background).unwrap_or(defaults.background),
            grid_color: parse_color(&self.render.grid_color).unwrap_or(defaults.grid_color),
            text_color: parse_color(&self.render.text_color).unwrap_or(defaults.text_color),
            font_name: MAP_FONT_NAME.to_string(),
        }
    }
}
