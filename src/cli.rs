use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::machine::MachineState;
use crate::minifier::Minifier;
use crate::Config;

/// Run the `gcode-minify` command
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.settings_file {
        log::info!("Using settings from {}", path.display());
    }

    minify_with_config(&config)
}

/// Minify according to an already-built configuration
pub fn minify_with_config(config: &Config) -> Result<()> {
    let minifier = Minifier::new(config.minifier_config());

    let initial = match &config.state_in {
        Some(path) => read_state(path)?,
        None => MachineState::default(),
    };

    // Open the input before touching the output.
    let input: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let state = match &config.output {
        Some(path) => minify_into_file(&minifier, initial, input, path)?,
        None => minifier
            .minify_stream(initial, input, BufWriter::new(io::stdout().lock()))
            .context("Minification failed")?,
    };

    log::debug!("Final state: {state:?}");

    if let Some(path) = &config.state_out {
        write_state(path, &state)?;
    }

    Ok(())
}

/// Stage the output next to `path` and move it into place only on success
///
/// The input may be the same file as the output; it is fully consumed before
/// the rename.
fn minify_into_file(
    minifier: &Minifier,
    initial: MachineState,
    input: Box<dyn BufRead>,
    path: &Path,
) -> Result<MachineState> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;

    let state = minifier
        .minify_stream(initial, input, BufWriter::new(staged.as_file_mut()))
        .context("Minification failed")?;

    staged
        .persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(state)
}

fn read_state(path: &Path) -> Result<MachineState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file {}", path.display()))
}

fn write_state(path: &Path, state: &MachineState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write state file {}", path.display()))
}
