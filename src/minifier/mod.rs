//! Minifier Engine
//!
//! A left-to-right fold over lines with one `MachineState` accumulator.
//! Each line is parsed, stripped of words that would not change what the
//! machine does, and serialized in canonical form. Lines that end up empty
//! are dropped.

pub mod config;

pub use config::{MinifierConfig, MinifierSettings, DEFAULT_THRESHOLD};

use std::io::{BufRead, Write};

use crate::error::{MinifyError, PassError, UnsupportedMode};
use crate::format::format_line;
use crate::machine::MachineState;
use crate::parser::{parse_line, Command, GcodeLine};

/// G28: home all axes
pub const HOME: Command = Command::g(28);
/// G0: rapid linear move
pub const RAPID_MOVE: Command = Command::g(0);
/// G1: linear move
pub const LINEAR_MOVE: Command = Command::g(1);
/// G90: absolute positioning
pub const ABSOLUTE_POSITIONING: Command = Command::g(90);
/// G91: relative positioning
pub const RELATIVE_POSITIONING: Command = Command::g(91);
/// M82: absolute extrusion
pub const ABSOLUTE_EXTRUSION: Command = Command::m(82);
/// M83: relative extrusion
pub const RELATIVE_EXTRUSION: Command = Command::m(83);

/// Output of a whole-text pass
#[derive(Debug, Clone, PartialEq)]
pub struct Minified {
    /// Surviving lines joined by `\n`, always with a trailing newline
    pub output: String,
    pub state: MachineState,
}

/// Redundancy-eliminating minifier
#[derive(Debug, Clone, Default)]
pub struct Minifier {
    config: MinifierConfig,
}

impl Minifier {
    pub fn new(config: MinifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinifierConfig {
        &self.config
    }

    /// Minify a whole text starting from `initial`
    ///
    /// Aborts at the first failing line; the error carries its 1-based number.
    pub fn minify(&self, initial: MachineState, text: &str) -> Result<Minified, PassError> {
        let mut state = initial;
        let mut output = String::with_capacity(text.len());

        for (index, raw) in text.lines().enumerate() {
            if let Some(canonical) = self.process(&mut state, raw, index + 1)? {
                output.push_str(&canonical);
                output.push('\n');
            }
        }

        if output.is_empty() {
            output.push('\n');
        }

        Ok(Minified { output, state })
    }

    /// Minify from a reader into a writer without holding the whole input
    ///
    /// Writes one `\n`-terminated line per surviving input line and returns
    /// the final state. Input that is not valid UTF-8 fails with
    /// `PassError::Read` naming the offending line.
    pub fn minify_stream<R: BufRead, W: Write>(
        &self,
        initial: MachineState,
        reader: R,
        mut writer: W,
    ) -> Result<MachineState, PassError> {
        let mut state = initial;
        let mut wrote_any = false;

        for (index, raw) in reader.lines().enumerate() {
            let raw = raw.map_err(|source| PassError::Read {
                line: index + 1,
                source,
            })?;
            if let Some(canonical) = self.process(&mut state, &raw, index + 1)? {
                writeln!(writer, "{canonical}")?;
                wrote_any = true;
            }
        }

        if !wrote_any {
            writeln!(writer)?;
        }
        writer.flush()?;

        Ok(state)
    }

    fn process(
        &self,
        state: &mut MachineState,
        raw: &str,
        line_number: usize,
    ) -> Result<Option<String>, PassError> {
        let with_line = |source: MinifyError| PassError::Line {
            line: line_number,
            source,
        };

        let mut line = parse_line(raw).map_err(|e| with_line(e.into()))?;
        self.minify_line(state, &mut line).map_err(with_line)?;

        if line.is_empty() {
            log::trace!("line {line_number}: dropped");
            return Ok(None);
        }
        Ok(Some(format_line(&line, self.config.precision())))
    }

    /// Canonical text for one line using this minifier's precision
    pub fn format(&self, line: &GcodeLine) -> String {
        format_line(line, self.config.precision())
    }

    /// Minify a single line in place, updating `state`
    ///
    /// On return the line may be empty, in which case it should be dropped.
    pub fn minify_line(
        &self,
        state: &mut MachineState,
        line: &mut GcodeLine,
    ) -> Result<(), MinifyError> {
        if self.config.remove_comments() {
            line.comment = None;
        }

        if line.is_comment_only() || line.is_empty() {
            return Ok(());
        }

        match line.command {
            Some(HOME) => {
                state.home();
                log::debug!("homed");
            }
            Some(RAPID_MOVE | LINEAR_MOVE) => self.minify_move(state, line)?,
            Some(RELATIVE_EXTRUSION) => {
                state.set_relative_extrusion(true);
                log::debug!("relative extrusion on");
            }
            Some(ABSOLUTE_EXTRUSION) => {
                state.set_relative_extrusion(false);
                log::debug!("relative extrusion off, E = {}", state.e);
            }
            Some(ABSOLUTE_POSITIONING) => state.relative_coordinates = false,
            Some(RELATIVE_POSITIONING) => {
                state.relative_coordinates = true;
                log::debug!("relative positioning on, further moves are unsupported");
            }
            _ if self.config.allow_unknown_gcode() => {
                log::debug!("passing through unknown command: {line}");
            }
            _ => {
                return Err(MinifyError::UnknownCommand {
                    line: self.format(line),
                });
            }
        }

        Ok(())
    }

    /// Drop every word of a G0/G1 that would not change the machine state
    fn minify_move(
        &self,
        state: &mut MachineState,
        line: &mut GcodeLine,
    ) -> Result<(), MinifyError> {
        if !state.is_homed {
            return Err(UnsupportedMode::NotHomed.into());
        }
        if state.relative_coordinates {
            return Err(UnsupportedMode::RelativeCoordinates.into());
        }
        if line.has_generic_params() {
            return Err(UnsupportedMode::ExtendedMoveParameters.into());
        }

        let config = &self.config;
        let keep_if_changed = |word: &mut Option<f64>, tracked: &mut f64| match *word {
            Some(value) if !config.approx_eq(value, *tracked) => *tracked = value,
            _ => *word = None,
        };

        keep_if_changed(&mut line.x, &mut state.x);
        keep_if_changed(&mut line.y, &mut state.y);
        keep_if_changed(&mut line.z, &mut state.z);

        if state.relative_extrusion {
            if let Some(delta) = line.e {
                // Every increment counts, even the ones too small to emit.
                state.e_absolute += delta;
                if config.approx_eq(delta, 0.0) {
                    line.e = None;
                }
            }
        } else {
            match line.e {
                Some(e) if !config.approx_eq(e, state.e) => {
                    state.e = e;
                    state.e_absolute = e;
                }
                _ => line.e = None,
            }
        }

        if line.has_feedrate() && !config.approx_eq(line.feedrate, state.feedrate) {
            state.feedrate = line.feedrate;
        } else {
            line.feedrate = 0.0;
        }

        if !line.has_words() {
            line.clear();
        }

        Ok(())
    }
}
