//! Utility modules.

pub mod log;
pub mod minify;
pub mod xml;
