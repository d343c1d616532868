//! Minifier settings and their resolved form.
//!
//! `MinifierSettings` is what users write (TOML file or CLI flags); zero means
//! "use the default". `resolve` turns it into an immutable `MinifierConfig`
//! before any pass starts, so nothing is filled in lazily during processing.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::Precision;

/// Default equality tolerance
pub const DEFAULT_THRESHOLD: f64 = 0.001;

/// User-facing minifier settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifierSettings {
    pub threshold: f64,
    pub xy_decimals: usize,
    pub z_decimals: usize,
    pub e_decimals: usize,
    pub remove_comments: bool,
    pub allow_unknown_gcode: bool,
}

impl MinifierSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse minifier settings")
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Fill defaults and freeze
    pub fn resolve(&self) -> MinifierConfig {
        let threshold = if self.threshold > 0.0 && self.threshold.is_finite() {
            self.threshold
        } else {
            if self.threshold != 0.0 {
                log::warn!(
                    "Ignoring invalid threshold {}, using {}",
                    self.threshold,
                    DEFAULT_THRESHOLD
                );
            }
            DEFAULT_THRESHOLD
        };

        let or_default = |value: usize, default: usize| if value == 0 { default } else { value };

        MinifierConfig {
            threshold,
            precision: Precision {
                xy: or_default(self.xy_decimals, Precision::DEFAULT_XY),
                z: or_default(self.z_decimals, Precision::DEFAULT_Z),
                e: or_default(self.e_decimals, Precision::DEFAULT_E),
            },
            remove_comments: self.remove_comments,
            allow_unknown_gcode: self.allow_unknown_gcode,
        }
    }
}

/// Resolved, immutable minifier configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MinifierConfig {
    threshold: f64,
    precision: Precision,
    remove_comments: bool,
    allow_unknown_gcode: bool,
}

impl Default for MinifierConfig {
    fn default() -> Self {
        MinifierSettings::default().resolve()
    }
}

impl MinifierConfig {
    /// Defaults, but unknown commands pass through instead of failing
    pub fn permissive() -> Self {
        MinifierSettings {
            allow_unknown_gcode: true,
            ..MinifierSettings::default()
        }
        .resolve()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    pub fn remove_comments(&self) -> bool {
        self.remove_comments
    }

    pub fn allow_unknown_gcode(&self) -> bool {
        self.allow_unknown_gcode
    }

    /// `a` and `b` are within tolerance of each other
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.threshold
    }
}
