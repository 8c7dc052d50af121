//! # Core Module
//!
//! Shared configuration for the scene engine. The configuration types live
//! here so the scene, logging, and application layers read from one place.

pub mod config;

pub use config::{
    Config, ConfigError, EngineConfig, HierarchyConfig, PrimitiveDefaults, SceneConfig,
};
