use fslwrap::core::ConfigLoader;
use fslwrap::logging::ConsoleOutput;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;

const OVERRIDES: &[&str] = &[
    "FSLWRAP_CONFIG",
    "FSLWRAP_FSLCONFIG",
    "FSLWRAP_SHELL",
    "FSLWRAP_FSL_RELEASE",
    "FSLWRAP_VERIFY_OUTPUTS",
    "FSLWRAP_LOG_LEVEL",
];

fn clear_overrides() {
    for key in OVERRIDES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_missing_default_file_yields_defaults() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("FSLWRAP_CONFIG", dir.path().join("absent.toml"));

    let config = ConfigLoader::load(None).unwrap();

    assert_eq!(config.fsl.fslconfig, PathBuf::from("/etc/fsl/5.0/fsl.sh"));
    assert_eq!(config.fsl.shell, "bash");
    assert_eq!(config.logging.default_level, "info");
    clear_overrides();
}

#[test]
#[serial]
fn test_explicit_file_must_exist() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();

    let err = ConfigLoader::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();

    assert!(err.to_string().contains("does not exist"));
}

#[test]
#[serial]
fn test_file_values_are_applied() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fslwrap.toml");
    fs::write(
        &path,
        r#"
[fsl]
fslconfig = "/opt/fsl/etc/fslconf/fsl.sh"
shell = "sh"
release = "6.0"
verify_outputs = true

[logging]
default_level = "debug"
console_output = "stdout"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(Some(path.as_path())).unwrap();

    assert_eq!(config.fsl.fslconfig, PathBuf::from("/opt/fsl/etc/fslconf/fsl.sh"));
    assert_eq!(config.fsl.shell, "sh");
    assert_eq!(config.fsl.release.as_deref(), Some("6.0"));
    assert!(config.fsl.verify_outputs);
    assert_eq!(config.logging.default_level, "debug");
    assert_eq!(config.logging.console_output, ConsoleOutput::Stdout);
}

#[test]
#[serial]
fn test_env_overrides_win_over_file() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fslwrap.toml");
    fs::write(&path, "[fsl]\nshell = \"sh\"\nrelease = \"6.0\"\n").unwrap();
    env::set_var("FSLWRAP_CONFIG", &path);
    env::set_var("FSLWRAP_SHELL", "dash");
    env::set_var("FSLWRAP_FSLCONFIG", "/usr/local/fsl/etc/fslconf/fsl.sh");
    env::set_var("FSLWRAP_VERIFY_OUTPUTS", "true");
    env::set_var("FSLWRAP_LOG_LEVEL", "warn");

    let config = ConfigLoader::load(None).unwrap();

    assert_eq!(config.fsl.shell, "dash");
    assert_eq!(
        config.fsl.fslconfig,
        PathBuf::from("/usr/local/fsl/etc/fslconf/fsl.sh")
    );
    assert_eq!(config.fsl.release.as_deref(), Some("6.0"));
    assert!(config.fsl.verify_outputs);
    assert_eq!(config.logging.default_level, "warn");
    clear_overrides();
}

#[test]
#[serial]
fn test_invalid_bool_override_is_rejected() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("FSLWRAP_CONFIG", dir.path().join("absent.toml"));
    env::set_var("FSLWRAP_VERIFY_OUTPUTS", "sometimes");

    let err = ConfigLoader::load(None).unwrap_err();

    assert!(err.to_string().contains("FSLWRAP_VERIFY_OUTPUTS"));
    clear_overrides();
}

#[test]
#[serial]
fn test_malformed_file_reports_path() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fslwrap.toml");
    fs::write(&path, "[fsl\nshell = ").unwrap();

    let err = ConfigLoader::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("failed to parse config file"));
}

#[test]
#[serial]
fn test_empty_shell_fails_validation() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("FSLWRAP_CONFIG", dir.path().join("absent.toml"));
    env::set_var("FSLWRAP_SHELL", "");

    let err = ConfigLoader::load(None).unwrap_err();

    assert!(err.to_string().contains("fsl.shell"));
    clear_overrides();
}
