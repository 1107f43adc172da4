//! CLI library components for the Valeo extractor.

pub mod cli;
pub mod commands;
pub mod golden;
pub mod logging;
pub mod summary;
