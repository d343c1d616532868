//! Tests for settings files and flag merging
use clap::Parser;
use gcode_minifier::config::{Args, Config};
use gcode_minifier::{MinifierSettings, Precision};

#[test]
fn test_settings_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("minify.toml");
    std::fs::write(
        &path,
        "threshold = 0.005\nz_decimals = 3\nremove_comments = true\n",
    )
    .expect("write settings");

    let args = Args::try_parse_from(["gcode-minify", "--config", path.to_str().unwrap()])
        .expect("parse args");
    let config = Config::from_args(args).expect("create config");

    assert_eq!(config.settings_file.as_deref(), Some(path.as_path()));
    assert!(config.settings.remove_comments);

    let resolved = config.minifier_config();
    assert_eq!(resolved.threshold(), 0.005);
    assert_eq!(resolved.precision(), &Precision { xy: 4, z: 3, e: 8 });
    assert!(!resolved.allow_unknown_gcode());
}

#[test]
fn test_flags_override_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("minify.toml");
    std::fs::write(&path, "threshold = 0.005\nxy_decimals = 2\n").expect("write settings");

    let args = Args::try_parse_from([
        "gcode-minify",
        "--config",
        path.to_str().unwrap(),
        "--threshold",
        "0.01",
        "--allow-unknown-gcode",
        "-i",
        "part.gcode",
    ])
    .expect("parse args");
    let config = Config::from_args(args).expect("create config");

    assert_eq!(
        config.settings,
        MinifierSettings {
            threshold: 0.01,
            xy_decimals: 2,
            allow_unknown_gcode: true,
            ..MinifierSettings::default()
        }
    );
    assert_eq!(config.input.as_deref(), Some(std::path::Path::new("part.gcode")));
    assert_eq!(config.output, None);
}

#[test]
fn test_bad_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("minify.toml");
    std::fs::write(&path, "threshold = \"small\"\n").expect("write settings");

    let args = Args::try_parse_from(["gcode-minify", "--config", path.to_str().unwrap()])
        .expect("parse args");
    let err = Config::from_args(args).unwrap_err();

    assert!(format!("{err:#}").contains("minify.toml"));
}

#[test]
fn test_missing_settings_file_is_an_error() {
    let args = Args::try_parse_from(["gcode-minify", "--config", "/nonexistent/minify.toml"])
        .expect("parse args");
    assert!(Config::from_args(args).is_err());
}
