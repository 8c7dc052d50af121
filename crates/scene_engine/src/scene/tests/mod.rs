//! Scenario tests across the registry and the frame hierarchy
