//! Configuration for the `gcode-minify` command.
//!
//! Handles:
//! - Command-line argument parsing
//! - Settings file discovery (project file, then user config directory)
//! - Merging flags over file settings

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::minifier::{MinifierConfig, MinifierSettings};

/// Settings file looked up in the working directory
pub const PROJECT_SETTINGS_FILE: &str = ".gcode-minify.toml";

/// Command-line arguments for the minifier
#[derive(Debug, Parser)]
#[command(name = "gcode-minify")]
#[command(about = "Shrink G-code by dropping redundant words and lines")]
#[command(version)]
pub struct Args {
    #[arg(short, long, default_value = "-", help = "Input file to minify (- for stdin)")]
    pub input: String,

    #[arg(short, long, default_value = "-", help = "Output file (- for stdout)")]
    pub output: String,

    #[arg(long, help = "Remove comments from the output")]
    pub remove_comments: bool,

    #[arg(long, help = "Pass through commands the minifier does not understand")]
    pub allow_unknown_gcode: bool,

    #[arg(long, help = "Largest difference still considered unchanged")]
    pub threshold: Option<f64>,

    #[arg(long, help = "Decimal places for X, Y and generic parameters")]
    pub xy_decimals: Option<usize>,

    #[arg(long, help = "Decimal places for Z")]
    pub z_decimals: Option<usize>,

    #[arg(long, help = "Decimal places for E")]
    pub e_decimals: Option<usize>,

    /// Settings file; when absent, the project and user config files are tried
    #[arg(long, help = "TOML file with minifier settings")]
    pub config: Option<PathBuf>,

    #[arg(long, conflicts_with = "config", help = "Ignore project and user settings files")]
    pub no_config: bool,

    #[arg(long, help = "JSON file holding the machine state to start from")]
    pub state_in: Option<PathBuf>,

    #[arg(long, help = "Write the final machine state as JSON to this file")]
    pub state_out: Option<PathBuf>,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Input path, `None` for stdin
    pub input: Option<PathBuf>,
    /// Output path, `None` for stdout
    pub output: Option<PathBuf>,
    pub settings: MinifierSettings,
    /// Settings file that was loaded, if any
    pub settings_file: Option<PathBuf>,
    pub state_in: Option<PathBuf>,
    pub state_out: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let settings_file = match args.config {
            Some(path) => Some(path),
            None if args.no_config => None,
            None => discover_settings_file(Path::new(".")),
        };

        let mut settings = match &settings_file {
            Some(path) => MinifierSettings::load(path)?,
            None => MinifierSettings::default(),
        };

        // Flags override the file.
        settings.remove_comments |= args.remove_comments;
        settings.allow_unknown_gcode |= args.allow_unknown_gcode;
        if let Some(threshold) = args.threshold {
            settings.threshold = threshold;
        }
        if let Some(decimals) = args.xy_decimals {
            settings.xy_decimals = decimals;
        }
        if let Some(decimals) = args.z_decimals {
            settings.z_decimals = decimals;
        }
        if let Some(decimals) = args.e_decimals {
            settings.e_decimals = decimals;
        }

        Ok(Config {
            input: stdio_or_path(args.input),
            output: stdio_or_path(args.output),
            settings,
            settings_file,
            state_in: args.state_in,
            state_out: args.state_out,
            log_level: args.log_level,
        })
    }

    /// Resolved minifier configuration
    pub fn minifier_config(&self) -> MinifierConfig {
        self.settings.resolve()
    }
}

fn stdio_or_path(arg: String) -> Option<PathBuf> {
    if arg == "-" { None } else { Some(PathBuf::from(arg)) }
}

/// Find a settings file: `<dir>/.gcode-minify.toml`, then the user config dir
pub fn discover_settings_file(dir: &Path) -> Option<PathBuf> {
    let project = dir.join(PROJECT_SETTINGS_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|config_dir| config_dir.join("gcode-minify").join("config.toml"))
        .filter(|path| path.is_file())
}
