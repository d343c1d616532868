//! GCode Minifier
//!
//! Shrinks 3D-printer G-code by tracking machine state line by line and
//! dropping words that would not change it.
//!
//! This library provides:
//! - A line parser for the positioning/extrusion subset of G-code
//! - Shortest-form numeric formatting
//! - The minification engine and its machine state
//! - A builder that synthesizes travel and print moves
//! - Configuration for the `gcode-minify` command

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod machine;
pub mod minifier;
pub mod parser;

// Re-exports for clean public API
pub use builder::{BuilderSettings, GcodeBuilder};
pub use config::Config;
pub use error::{MinifyError, ParseError, PassError, UnsupportedMode};
pub use format::{format_decimal, format_line, Precision};
pub use machine::MachineState;
pub use minifier::{Minified, Minifier, MinifierConfig, MinifierSettings};
pub use parser::{parse_line, Command, GcodeLine};
