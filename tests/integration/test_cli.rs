use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Command isolated from any user configuration file.
fn fslwrap(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fslwrap"));
    cmd.env("FSLWRAP_CONFIG", config_dir.join("absent.toml"))
        .env_remove("FSLWRAP_FSLCONFIG")
        .env_remove("FSLWRAP_SHELL")
        .env_remove("FSLWRAP_FSL_RELEASE")
        .env_remove("FSLWRAP_VERIFY_OUTPUTS")
        .env_remove("FSLWRAP_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_help_lists_tool_commands() {
    let dir = workspace();
    fslwrap(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TOOL COMMANDS"))
        .stdout(predicate::str::contains("apply-mask"))
        .stdout(predicate::str::contains("reorient2std"))
        .stdout(predicate::str::contains("--fslconfig"));
}

#[test]
fn test_long_help_documents_environment_overrides() {
    let dir = workspace();
    fslwrap(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENVIRONMENT"))
        .stdout(predicate::str::contains("FSLWRAP_FSLCONFIG"))
        .stdout(predicate::str::contains("FSLWRAP_VERIFY_OUTPUTS"))
        .stdout(predicate::str::contains(format!(
            "Written against FSL {}",
            fslwrap::FSL_RELEASE
        )));
}

#[test]
fn test_version_flag() {
    let dir = workspace();
    fslwrap(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(fslwrap::VERSION));
}

#[test]
fn test_apply_mask_missing_input_fails_before_sourcing() {
    let dir = workspace();
    let input = dir.path().join("in.nii");
    fs::write(&input, "image").unwrap();

    fslwrap(dir.path())
        .args(["apply-mask"])
        .arg(&input)
        .arg(dir.path().join("mask.nii"))
        .arg(dir.path().join("out.nii"))
        .args(["--fslconfig", "/nonexistent/fsl.sh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FSL-INPUT-001"))
        .stderr(predicate::str::contains("mask.nii' does not exist"));
}

#[test]
fn test_unreadable_fslconfig_is_configuration_failure() {
    let dir = workspace();

    fslwrap(dir.path())
        .args(["check", "fslmaths", "--fslconfig"])
        .arg(dir.path().join("missing.sh"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("FSL-CONF-001"));
}

#[test]
fn test_explicit_missing_config_file_fails() {
    let dir = workspace();

    fslwrap(dir.path())
        .args(["env", "--config"])
        .arg(dir.path().join("nope.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn test_env_prints_sourced_variables() {
    let dir = workspace();
    let script = dir.path().join("fsl.sh");
    fs::write(&script, "FSLOUTPUTTYPE=NIFTI_PAIR\nexport FSLOUTPUTTYPE\n").unwrap();

    fslwrap(dir.path())
        .env("FSLWRAP_SHELL", "sh")
        .args(["env", "--fslconfig"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("FSLOUTPUTTYPE=NIFTI_PAIR"));
}

#[cfg(unix)]
#[test]
fn test_env_json_output() {
    let dir = workspace();
    let script = dir.path().join("fsl.sh");
    fs::write(&script, "FSLDIR=/opt/fsl\nexport FSLDIR\n").unwrap();

    let output = fslwrap(dir.path())
        .env("FSLWRAP_SHELL", "sh")
        .args(["env", "--json", "--fslconfig"])
        .arg(&script)
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["FSLDIR"], "/opt/fsl");
}

#[cfg(unix)]
#[test]
fn test_verbose_run_reports_log_file() {
    let dir = workspace();
    let script = dir.path().join("fsl.sh");
    fs::write(&script, "FSLDIR=/opt/fsl\nexport FSLDIR\n").unwrap();
    let log_dir = dir.path().join("logs");
    let config = dir.path().join("fslwrap.toml");
    fs::write(
        &config,
        format!(
            "[logging]\nenable_file = true\nlog_dir = \"{}\"\n",
            log_dir.display()
        ),
    )
    .unwrap();

    fslwrap(dir.path())
        .env("FSLWRAP_SHELL", "sh")
        .args(["-v", "env", "--config"])
        .arg(&config)
        .arg("--fslconfig")
        .arg(&script)
        .assert()
        .success()
        .stderr(predicate::str::contains("logging initialized"))
        .stderr(predicate::str::contains("console=stderr"))
        .stderr(predicate::str::contains("fslwrap.log"));

    let logged = fs::read_to_string(log_dir.join("fslwrap.log")).unwrap();
    assert!(logged.contains("configuration loaded"));
}
