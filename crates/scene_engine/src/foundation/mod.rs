//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Handle types for the frame and node arenas
//! - Logging bootstrap

pub mod collections;
pub mod logging;
pub mod math;
