//! Core module - Run model and shared utilities
//!
//! This module provides:
//! - Error taxonomy
//! - Rename job and change log model
//! - Rendering of the change log
//! - Path normalization utilities

pub mod error;
pub mod model;
pub mod paths;
pub mod render;
