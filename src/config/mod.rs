//! Configuration file support for inkveil.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkveil/config.toml`. Settings include drawing defaults,
//! per-tool widths, arrow appearance, history depth, page behavior, the screen curtain,
//! and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    ArrowConfig, CurtainConfig, DrawingConfig, HistoryConfig, PagesConfig, ToolsConfig,
};

use crate::input::curtain::{SPOTLIGHT_RADIUS_MAX, SPOTLIGHT_RADIUS_MIN};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound for any configured thickness.
const THICKNESS_CEILING: f64 = 200.0;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#e94560"
/// default_thickness = 3.0
///
/// [tools]
/// highlighter_width = 24.0
///
/// [arrow]
/// length = 20.0
/// angle_degrees = 30.0
///
/// [history]
/// capacity = 200
///
/// [pages]
/// default_background = "grid"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing defaults (color, thickness, sampling, palette)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Per-tool widths and opacities
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Undo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Page backgrounds and limits
    #[serde(default)]
    pub pages: PagesConfig,

    /// Screen curtain opacity and spotlight size
    #[serde(default)]
    pub curtain: CurtainConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `min_thickness`: 0.5 - 200.0, `max_thickness`: `min_thickness` - 200.0
    /// - `default_thickness` and every tool width: `min_thickness` - `max_thickness`
    /// - `thickness_step`: 0.5 - 20.0
    /// - `min_point_distance`: 0.0 - 50.0
    /// - `smoothing`: 0.0 - 0.95
    /// - tool opacities: 0.05 - 1.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `curtain.opacity`: 0.1 - 1.0, `curtain.spotlight_radius`: 50.0 - 500.0
    pub fn validate_and_clamp(&mut self) {
        let drawing = &mut self.drawing;

        if !drawing.min_thickness.is_finite()
            || !(0.5..=THICKNESS_CEILING).contains(&drawing.min_thickness)
        {
            warn!(
                "Invalid min_thickness {:.1}, clamping to 0.5-{:.1} range",
                drawing.min_thickness, THICKNESS_CEILING
            );
            drawing.min_thickness = finite_or(drawing.min_thickness, 1.0).clamp(0.5, THICKNESS_CEILING);
        }

        if !drawing.max_thickness.is_finite()
            || !(drawing.min_thickness..=THICKNESS_CEILING).contains(&drawing.max_thickness)
        {
            warn!(
                "Invalid max_thickness {:.1}, clamping to {:.1}-{:.1} range",
                drawing.max_thickness, drawing.min_thickness, THICKNESS_CEILING
            );
            drawing.max_thickness = finite_or(drawing.max_thickness, 80.0)
                .clamp(drawing.min_thickness, THICKNESS_CEILING);
        }

        let (min, max) = (drawing.min_thickness, drawing.max_thickness);
        clamp_width("default_thickness", &mut drawing.default_thickness, min, max);

        if !(0.5..=20.0).contains(&drawing.thickness_step) {
            warn!(
                "Invalid thickness_step {:.1}, clamping to 0.5-20.0 range",
                drawing.thickness_step
            );
            drawing.thickness_step = finite_or(drawing.thickness_step, 2.0).clamp(0.5, 20.0);
        }

        if !(0.0..=50.0).contains(&drawing.min_point_distance) {
            warn!(
                "Invalid min_point_distance {:.1}, clamping to 0.0-50.0 range",
                drawing.min_point_distance
            );
            drawing.min_point_distance = finite_or(drawing.min_point_distance, 1.0).clamp(0.0, 50.0);
        }

        if !(0.0..=0.95).contains(&drawing.smoothing) {
            warn!(
                "Invalid smoothing {:.2}, clamping to 0.0-0.95 range",
                drawing.smoothing
            );
            drawing.smoothing = finite_or(drawing.smoothing, 0.0).clamp(0.0, 0.95);
        }

        if drawing.default_color.try_to_color().is_none() {
            warn!(
                "Invalid default_color {:?}, falling back to the first palette entry",
                drawing.default_color
            );
            drawing.default_color = DrawingConfig::default().default_color;
        }

        let before = drawing.palette.len();
        drawing.palette.retain(|spec| spec.try_to_color().is_some());
        if drawing.palette.len() != before {
            warn!(
                "Dropped {} unrecognised palette entries",
                before - drawing.palette.len()
            );
        }

        let tools = &mut self.tools;
        clamp_width("tools.pen_width", &mut tools.pen_width, min, max);
        clamp_width("tools.highlighter_width", &mut tools.highlighter_width, min, max);
        clamp_width("tools.dashed_width", &mut tools.dashed_width, min, max);
        clamp_width("tools.eraser_width", &mut tools.eraser_width, min, max);
        clamp_width("tools.shape_width", &mut tools.shape_width, min, max);

        for (name, opacity) in [
            ("highlighter_opacity", &mut tools.highlighter_opacity),
            ("dashed_opacity", &mut tools.dashed_opacity),
        ] {
            if !(0.05..=1.0).contains(&*opacity) {
                warn!("Invalid {} {:.2}, clamping to 0.05-1.0 range", name, opacity);
                *opacity = finite_or(*opacity, 1.0).clamp(0.05, 1.0);
            }
        }

        // Arrow length: 5.0 - 50.0
        if !(5.0..=50.0).contains(&self.arrow.length) {
            warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-50.0 range",
                self.arrow.length
            );
            self.arrow.length = finite_or(self.arrow.length, 15.0).clamp(5.0, 50.0);
        }

        // Arrow angle: 15.0 - 60.0 degrees
        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            warn!(
                "Invalid arrow angle {:.1}°, clamping to 15.0-60.0° range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees = finite_or(self.arrow.angle_degrees, 30.0).clamp(15.0, 60.0);
        }

        let curtain = &mut self.curtain;
        if !(0.1..=1.0).contains(&curtain.opacity) {
            warn!(
                "Invalid curtain opacity {:.2}, clamping to 0.1-1.0 range",
                curtain.opacity
            );
            curtain.opacity = finite_or(curtain.opacity, 0.85).clamp(0.1, 1.0);
        }

        if !(SPOTLIGHT_RADIUS_MIN..=SPOTLIGHT_RADIUS_MAX).contains(&curtain.spotlight_radius) {
            warn!(
                "Invalid spotlight_radius {:.1}, clamping to {:.1}-{:.1} range",
                curtain.spotlight_radius, SPOTLIGHT_RADIUS_MIN, SPOTLIGHT_RADIUS_MAX
            );
            curtain.spotlight_radius = finite_or(curtain.spotlight_radius, 120.0)
                .clamp(SPOTLIGHT_RADIUS_MIN, SPOTLIGHT_RADIUS_MAX);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkveil/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkveil");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document without validation.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Saves the current configuration to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, EXAMPLE_CONFIG)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Writes the documented example config to the default location.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        Self::create_default_file_at(&config_path)?;
        Ok(config_path)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Documented example configuration shipped with the crate.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn clamp_width(name: &str, value: &mut f64, min: f64, max: f64) {
    if !value.is_finite() || !(min..=max).contains(&*value) {
        warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name, value, min, max
        );
        *value = finite_or(*value, min).clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BackgroundPattern;
    use crate::input::Tool;

    #[test]
    fn example_config_parses_to_defaults() {
        let mut config = Config::from_toml(EXAMPLE_CONFIG).unwrap();
        config.validate_and_clamp();
        let defaults = Config::default();

        assert_eq!(config.drawing.default_thickness, defaults.drawing.default_thickness);
        assert_eq!(config.drawing.palette, defaults.drawing.palette);
        assert_eq!(config.tools.default_tool, Tool::Pen);
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.pages.default_background, BackgroundPattern::Transparent);
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.arrow.length, 15.0);
        assert_eq!(config.tools.highlighter_width, 20.0);
        assert_eq!(config.tools.highlighter_opacity, 0.35);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            default_thickness = 500.0
            smoothing = 2.0
            min_point_distance = -3.0

            [tools]
            eraser_width = 0.1
            highlighter_opacity = 0.0

            [arrow]
            length = 100.0
            angle_degrees = 5.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_thickness, 80.0);
        assert_eq!(config.drawing.smoothing, 0.95);
        assert_eq!(config.drawing.min_point_distance, 0.0);
        assert_eq!(config.tools.eraser_width, 1.0);
        assert_eq!(config.tools.highlighter_opacity, 0.05);
        assert_eq!(config.arrow.length, 50.0);
        assert_eq!(config.arrow.angle_degrees, 15.0);
    }

    #[test]
    fn curtain_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [curtain]
            opacity = 0.0
            spotlight_radius = 900.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.curtain.opacity, 0.1);
        assert_eq!(config.curtain.spotlight_radius, 500.0);
        assert_eq!(Config::default().curtain.spotlight_radius, 120.0);
    }

    #[test]
    fn inverted_thickness_range_is_repaired() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            min_thickness = 10.0
            max_thickness = 4.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.max_thickness, 10.0);
        assert_eq!(config.drawing.default_thickness, 10.0);
    }

    #[test]
    fn bad_colors_fall_back() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            default_color = "not-a-color"
            palette = ["red", "nope", [0, 255, 0]]
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_color, DrawingConfig::default().default_color);
        assert_eq!(config.drawing.palette.len(), 2);
    }

    #[test]
    fn unknown_background_is_a_parse_error() {
        let result = Config::from_toml(
            r#"
            [pages]
            default_background = "plaid"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_from_and_create_default_file_at_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_file_at(&path).unwrap();
        assert!(Config::create_default_file_at(&path).is_err());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.history.capacity, 100);
    }

    #[test]
    fn save_to_writes_loadable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.history.capacity = 7;
        config.pages.default_background = BackgroundPattern::Grid;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.history.capacity, 7);
        assert_eq!(loaded.pages.default_background, BackgroundPattern::Grid);
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in [
            "drawing",
            "tools",
            "arrow",
            "history",
            "pages",
            "curtain",
            "keybindings",
        ] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
