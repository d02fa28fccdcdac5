//! The resolution engine: ordered source composition, configuration,
//! and the source registry seam.

pub mod config;
pub mod engine;
pub mod registry;
