use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["project"], "./src/**/*.{html,ts,tsx,js,jsx,resx}");
    assert_eq!(parsed["languages"], "./src/assets/i18n/*.json");
    assert_eq!(parsed["rules"]["zombieKeys"], "warning");
    assert_eq!(parsed["rules"]["keysOnViews"], "error");
    assert_eq!(parsed["rules"]["emptyKeys"], "warning");
    assert_eq!(parsed["rules"]["deepSearch"], "disable");
    assert_eq!(parsed["rules"]["maxWarning"], 0);

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .keylintrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".keylintrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keylintrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .keylintrc.json already exists
    ");
    assert_eq!(test.read_file(".keylintrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    test.write_language("en.json", r#"{"app": {"title": "Test"}}"#)?;
    test.write_file(
        "src/app/app.tsx",
        r#"export function App() { return <h1>{t('app.title')}</h1>; }"#,
    )?;

    let output = test.run(test.check_command())?;
    assert_eq!(
        output.code, 0,
        "Check command should work with initialized config. stderr: {}",
        output.stderr
    );

    Ok(())
}
