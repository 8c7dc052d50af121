//! # Scene Configuration
//!
//! Settings for the engine shell, the transform hierarchy, and the default
//! parameters of registry-created primitives. Every section has sensible
//! defaults, `with_*` builders, and a `validate` check, and the whole tree
//! loads from TOML or RON through [`Config`].
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//! debug_mode = true
//!
//! [hierarchy]
//! max_depth = 64
//! warn_on_degenerate_scale = true
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::Color;

/// # Engine Configuration
///
/// Core behavior that affects the whole process: logging and debug features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Hierarchy Configuration
///
/// Limits and diagnostics for the frame hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Longest ancestor chain walked when checking a new parent for cycles.
    /// Parenting under a deeper chain is rejected.
    pub max_depth: usize,
    /// Log a warning when a scale with a zero or non-finite component is applied
    pub warn_on_degenerate_scale: bool,
}

impl HierarchyConfig {
    /// Create a new hierarchy configuration
    pub const fn new() -> Self {
        Self {
            max_depth: 1024,
            warn_on_degenerate_scale: true,
        }
    }

    /// Set maximum hierarchy depth
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable degenerate scale warnings
    pub const fn with_degenerate_scale_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_degenerate_scale = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("Max hierarchy depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Primitive Defaults
///
/// Parameters used by the registry's creation descriptors when the caller
/// does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveDefaults {
    /// Sphere radius
    pub sphere_radius: f32,
    /// Cylinder height
    pub cylinder_height: f32,
    /// Cylinder radius
    pub cylinder_radius: f32,
    /// Letter width
    pub letter_width: f32,
    /// Letter height
    pub letter_height: f32,
    /// Letter depth
    pub letter_depth: f32,
    /// Cube color
    pub cube_color: Color,
    /// Sphere color
    pub sphere_color: Color,
    /// Cylinder color
    pub cylinder_color: Color,
    /// Letter color
    pub letter_color: Color,
}

impl PrimitiveDefaults {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let dimensions = [
            ("sphere_radius", self.sphere_radius),
            ("cylinder_height", self.cylinder_height),
            ("cylinder_radius", self.cylinder_radius),
            ("letter_width", self.letter_width),
            ("letter_height", self.letter_height),
            ("letter_depth", self.letter_depth),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }

        let colors = [
            ("cube_color", self.cube_color),
            ("sphere_color", self.sphere_color),
            ("cylinder_color", self.cylinder_color),
            ("letter_color", self.letter_color),
        ];
        for (name, color) in colors {
            if !color.is_normalized() {
                return Err(format!("{name} channels must be within [0, 1], got {color:?}"));
            }
        }
        Ok(())
    }
}

impl Default for PrimitiveDefaults {
    fn default() -> Self {
        Self {
            sphere_radius: 1.0,
            cylinder_height: 2.0,
            cylinder_radius: 0.5,
            letter_width: 2.0,
            letter_height: 3.0,
            letter_depth: 0.5,
            cube_color: Color::ORANGE,
            sphere_color: Color::GREEN,
            cylinder_color: Color::BLUE,
            letter_color: Color::RED,
        }
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration that applications load at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Frame hierarchy configuration
    pub hierarchy: HierarchyConfig,
    /// Defaults for registry-created primitives
    pub primitives: PrimitiveDefaults,
}

impl SceneConfig {
    /// Create a new scene configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set engine configuration
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set hierarchy configuration
    pub fn with_hierarchy(mut self, hierarchy: HierarchyConfig) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Set primitive defaults
    pub fn with_primitives(mut self, primitives: PrimitiveDefaults) -> Self {
        self.primitives = primitives;
        self
    }
}

impl Config for SceneConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .and_then(|()| self.hierarchy.validate())
            .and_then(|()| self.primitives.validate())
            .map_err(ConfigError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let contents = r#"
            [engine]
            log_level = "debug"

            [hierarchy]
            max_depth = 8
        "#;
        let config = SceneConfig::from_str_with_format(contents, ConfigFormat::Toml).unwrap();

        assert_eq!(config.engine.log_level, "debug");
        assert_eq!(config.hierarchy.max_depth, 8);
        assert!(config.hierarchy.warn_on_degenerate_scale);
        assert_eq!(config.primitives, PrimitiveDefaults::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_depth = SceneConfig::new().with_hierarchy(HierarchyConfig::new().with_max_depth(0));
        assert!(matches!(zero_depth.validate(), Err(ConfigError::Invalid(_))));

        let negative_radius = SceneConfig::new().with_primitives(PrimitiveDefaults {
            sphere_radius: -1.0,
            ..PrimitiveDefaults::default()
        });
        assert!(matches!(negative_radius.validate(), Err(ConfigError::Invalid(_))));

        let bright = SceneConfig::new().with_primitives(PrimitiveDefaults {
            cube_color: Color::new(2.0, 0.0, 0.0),
            ..PrimitiveDefaults::default()
        });
        assert!(matches!(bright.validate(), Err(ConfigError::Invalid(_))));

        let silent = SceneConfig::new().with_engine(EngineConfig::new().with_log_level(" "));
        assert!(matches!(silent.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_ron_round_trip_in_memory() {
        let config = SceneConfig::new()
            .with_engine(EngineConfig::new().with_log_level("trace").with_debug(true))
            .with_hierarchy(HierarchyConfig::new().with_degenerate_scale_warnings(false));

        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = SceneConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_file_round_trip_and_format_detection() {
        let path = std::env::temp_dir().join(format!("scene_config_{}.toml", std::process::id()));
        let config = SceneConfig::new().with_hierarchy(HierarchyConfig::new().with_max_depth(32));

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);

        assert!(matches!(
            SceneConfig::load_from_file("scene.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SceneConfig::load_from_file(std::env::temp_dir().join("missing_scene_config.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
