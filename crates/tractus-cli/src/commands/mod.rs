//! CLI command implementations.

pub mod align;
pub mod common;
pub mod generate;
pub mod process;
