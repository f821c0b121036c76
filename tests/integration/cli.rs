use std::fs;
use std::process::{Command, Output};

use super::IntegrationHarness;
use resumegen::config::{self, LOCAL_CONFIG_FILE_NAME};
use resumegen::RenderVariant;

fn run_cli(harness: &IntegrationHarness, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate-resume"))
        .arg("--root")
        .arg(harness.root())
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch generate-resume")
}

#[test]
fn write_config_persists_resolved_settings_and_skips_generation() {
    let harness = IntegrationHarness::with_sample_records();
    let output = run_cli(&harness, &["--variant", "banner", "--write-config"]);
    assert!(output.status.success(), "{output:?}");

    let path = harness.root().join(LOCAL_CONFIG_FILE_NAME);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Config written to"), "{stdout}");

    let saved = config::load(&path).expect("saved config should load");
    assert_eq!(saved.variant, RenderVariant::Banner);
    assert_eq!(saved.extension, "docx");
    assert!(harness.generated_files().is_empty());

    let picked_up = config::load_or_default(None, harness.root()).unwrap();
    assert_eq!(picked_up, saved);
}

#[test]
fn run_prints_the_generated_path() {
    let harness = IntegrationHarness::with_sample_records();
    let output = run_cli(&harness, &[]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Resume generated successfully: "), "{stdout}");
    assert!(stdout.trim_end().ends_with("Grace_Hopper_Resume_1.docx"), "{stdout}");
    assert_eq!(harness.generated_files().len(), 1);
}

#[test]
fn unsupported_extension_fails_before_output() {
    let harness = IntegrationHarness::with_sample_records();
    fs::write(
        harness.root().join(LOCAL_CONFIG_FILE_NAME),
        "extension = \"pdf\"\n",
    )
    .unwrap();

    let output = run_cli(&harness, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported output extension 'pdf'"), "{stderr}");
    assert!(!harness.output_dir().exists());
}
