//! CLI library components for the prescription form checker.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
