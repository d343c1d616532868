use anyhow::Result;
use gcode_minifier::cli::run;

fn main() -> Result<()> {
    run()
}
