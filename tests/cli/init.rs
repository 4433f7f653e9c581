use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, record};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["projectMarker"], "UnleashedPrototype");
    assert_eq!(parsed["contentMarker"], "Content");
    assert_eq!(parsed["extension"], "json");
    assert_eq!(parsed["output"], "parsed.csv");
    assert!(parsed["ignores"].is_array(), "Config should have 'ignores' list");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote default config to .assetlocrc.json"), "{}", stdout);
    assert!(
        stdout.contains("extract writes parsed.csv and shortens paths below UnleashedPrototype/ or Content/"),
        "{}",
        stdout
    );

    assert!(test.root().join(".assetlocrc.json").exists());
    let content = test.read_file(".assetlocrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".assetlocrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .assetlocrc.json already exists, edit it instead of re-initializing
    ");

    assert_eq!(test.read_file(".assetlocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "Content/UI/W_Pause.json",
        r#"{"Name": "W_Pause", "Resume": {"SourceString": "Resume", "Key": "RESUME"}}"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_csv("parsed.csv")?,
        vec![
            record(&["key", "source", "Translation", "context"]),
            record(&["RESUME", "Resume", "", "UI/W_Pause.json\nName: W_Pause\nResume"]),
        ]
    );

    Ok(())
}
