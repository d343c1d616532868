//! GCode builder
//!
//! Produces travel and print moves from coordinates. Every appended line goes
//! through `Minifier::minify_line` right away, so the buffer only ever holds
//! minified, non-empty lines.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MinifyError, UnsupportedMode};
use crate::machine::MachineState;
use crate::minifier::{
    Minifier, MinifierConfig, HOME, LINEAR_MOVE, RAPID_MOVE, RELATIVE_EXTRUSION,
};
use crate::parser::{GcodeLine, COMMENT_MARKER};

/// Printer geometry and speeds used to synthesize moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderSettings {
    pub nozzle_size: f64,
    pub layer_height: f64,
    /// Width of an extruded line; `0` means "same as the nozzle"
    pub extrusion_width: f64,
    /// `0` means 1
    pub extrusion_multiplier: f64,
    pub filament_diameter: f64,
    pub print_feedrate: f64,
    pub travel_feedrate: f64,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            nozzle_size: 0.4,
            layer_height: 0.2,
            extrusion_width: 0.0,
            extrusion_multiplier: 1.0,
            filament_diameter: 1.75,
            print_feedrate: 2400.0,
            travel_feedrate: 6000.0,
        }
    }
}

impl BuilderSettings {
    /// Filament length to feed per millimetre of printed line
    pub fn extrusion_per_linear_mm(&self) -> f64 {
        let width = if self.extrusion_width > 0.0 {
            self.extrusion_width
        } else {
            self.nozzle_size
        };
        let multiplier = if self.extrusion_multiplier > 0.0 {
            self.extrusion_multiplier
        } else {
            1.0
        };
        let filament_radius = self.filament_diameter / 2.0;

        self.layer_height * width * multiplier / (PI * filament_radius * filament_radius)
    }
}

/// Incremental GCode generator
#[derive(Debug, Clone)]
pub struct GcodeBuilder {
    settings: BuilderSettings,
    minifier: Minifier,
    state: MachineState,
    lines: Vec<GcodeLine>,
}

impl GcodeBuilder {
    /// Builder that keeps comments and lets unknown commands through
    pub fn new(settings: BuilderSettings) -> Self {
        Self::with_config(settings, MinifierConfig::permissive())
    }

    pub fn with_config(settings: BuilderSettings, config: MinifierConfig) -> Self {
        Self {
            settings,
            minifier: Minifier::new(config),
            state: MachineState::default(),
            lines: Vec::new(),
        }
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Machine state after everything appended so far
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Minified lines buffered so far
    pub fn lines(&self) -> &[GcodeLine] {
        &self.lines
    }

    /// Minify and buffer an arbitrary line
    pub fn add_line(&mut self, mut line: GcodeLine) -> Result<(), MinifyError> {
        self.minifier.minify_line(&mut self.state, &mut line)?;
        if !line.is_empty() {
            self.lines.push(line);
        }
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), MinifyError> {
        self.add_line(GcodeLine::with_command(HOME))
    }

    pub fn relative_extrusion(&mut self) -> Result<(), MinifyError> {
        self.add_line(GcodeLine::with_command(RELATIVE_EXTRUSION))
    }

    /// Add a comment line; the comment marker is added if missing
    pub fn comment(&mut self, text: &str) -> Result<(), MinifyError> {
        let text = if text.starts_with(COMMENT_MARKER) {
            text.to_string()
        } else {
            format!("{COMMENT_MARKER} {text}")
        };
        self.add_line(GcodeLine::comment_only(text))
    }

    pub fn travel_to(&mut self, x: f64, y: f64, z: f64) -> Result<(), MinifyError> {
        self.travel_to_f(x, y, z, self.settings.travel_feedrate)
    }

    pub fn travel_to_xy(&mut self, x: f64, y: f64) -> Result<(), MinifyError> {
        self.travel_to(x, y, self.state.z)
    }

    pub fn travel_to_f(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        feedrate: f64,
    ) -> Result<(), MinifyError> {
        self.add_line(GcodeLine {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            feedrate,
            ..GcodeLine::with_command(RAPID_MOVE)
        })
    }

    pub fn travel_to_xy_f(&mut self, x: f64, y: f64, feedrate: f64) -> Result<(), MinifyError> {
        self.travel_to_f(x, y, self.state.z, feedrate)
    }

    pub fn print_to(&mut self, x: f64, y: f64, z: f64) -> Result<(), MinifyError> {
        self.print_to_f(x, y, z, self.settings.print_feedrate)
    }

    pub fn print_to_xy(&mut self, x: f64, y: f64) -> Result<(), MinifyError> {
        self.print_to(x, y, self.state.z)
    }

    /// Extruding move; requires relative extrusion mode
    pub fn print_to_f(&mut self, x: f64, y: f64, z: f64, feedrate: f64) -> Result<(), MinifyError> {
        let e = self.extrusion_for_move_to(x, y, z)?;
        self.add_line(GcodeLine {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            e: Some(e),
            feedrate,
            ..GcodeLine::with_command(LINEAR_MOVE)
        })
    }

    pub fn print_to_xy_f(&mut self, x: f64, y: f64, feedrate: f64) -> Result<(), MinifyError> {
        self.print_to_f(x, y, self.state.z, feedrate)
    }

    fn extrusion_for_move_to(&self, x: f64, y: f64, z: f64) -> Result<f64, MinifyError> {
        if !self.state.relative_extrusion {
            return Err(UnsupportedMode::AbsoluteExtrusionPrintMove.into());
        }
        Ok(self.state.distance_to(x, y, z) * self.settings.extrusion_per_linear_mm())
    }

    /// Write every buffered line, each terminated by `\n`
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", self.minifier.format(line))?;
        }
        writer.flush()
    }

    pub fn to_gcode_string(&self) -> String {
        self.lines
            .iter()
            .map(|line| self.minifier.format(line) + "\n")
            .collect()
    }

    /// Create (or truncate) `path` and write the buffered GCode to it
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extrusion_per_linear_mm() {
        let settings = BuilderSettings {
            extrusion_width: 0.4,
            ..BuilderSettings::default()
        };
        let expected = 0.2 * 0.4 / (PI * 0.875 * 0.875);
        assert!((settings.extrusion_per_linear_mm() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_width_falls_back_to_nozzle() {
        let explicit = BuilderSettings {
            extrusion_width: 0.4,
            ..BuilderSettings::default()
        };
        let implicit = BuilderSettings {
            extrusion_width: 0.0,
            ..explicit
        };
        assert_eq!(
            explicit.extrusion_per_linear_mm(),
            implicit.extrusion_per_linear_mm()
        );
    }

    #[test]
    fn test_print_requires_relative_extrusion() {
        let mut builder = GcodeBuilder::new(BuilderSettings::default());
        builder.home().unwrap();

        let err = builder.print_to_xy(10.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            MinifyError::UnsupportedMode(UnsupportedMode::AbsoluteExtrusionPrintMove)
        );
    }

    #[test]
    fn test_redundant_travel_is_not_buffered() {
        let mut builder = GcodeBuilder::new(BuilderSettings::default());
        builder.home().unwrap();
        builder.travel_to_xy(10.0, 10.0).unwrap();
        builder.travel_to_xy_f(10.0, 10.0, 6000.0).unwrap();

        assert_eq!(builder.lines().len(), 2);
        assert_eq!(builder.state().x, 10.0);
    }

    #[test]
    fn test_comment_marker_added() {
        let mut builder = GcodeBuilder::new(BuilderSettings::default());
        builder.comment("start").unwrap();
        builder.comment("; already marked").unwrap();

        assert_eq!(builder.to_gcode_string(), "; start\n; already marked\n");
    }

    #[test]
    fn test_travel_before_home_fails() {
        let mut builder = GcodeBuilder::new(BuilderSettings::default());
        assert_eq!(
            builder.travel_to(1.0, 1.0, 1.0).unwrap_err(),
            MinifyError::UnsupportedMode(UnsupportedMode::NotHomed)
        );
    }
}
