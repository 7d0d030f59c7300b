//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified finding model (Finding, Report)
//! - Rendering functions for different output formats
//! - Linter configuration
//! - Fatal error type
//! - Path utilities

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
