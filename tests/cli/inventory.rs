use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": "Hi", "body": ""}}"#)?;
    test.write_language("de.json", r#"{"home": {"title": "Hallo"}}"#)?;
    test.write_file("src/app/home.ts", "t('home.title');")?;
    Ok(test)
}

#[test]
fn test_keys_text() -> Result<()> {
    let test = project()?;

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("keys"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        home.title
          languages: [ROOT]/src/assets/i18n/de.json, [ROOT]/src/assets/i18n/en.json
          views: [ROOT]/src/app/home.ts
        home.body
          languages: [ROOT]/src/assets/i18n/en.json
          views: (unused)

        ✓ 2 keys

        ----- stderr -----
        ");
    });

    Ok(())
}

#[test]
fn test_keys_json() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["keys", "--format", "json"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    let keys: Value = serde_json::from_str(&output.stdout)?;
    let keys = keys.as_array().unwrap();
    assert_eq!(keys.len(), 2);

    let title = keys.iter().find(|k| k["name"] == "home.title").unwrap();
    assert_eq!(title["languages"].as_array().unwrap().len(), 2);
    assert_eq!(title["views"].as_array().unwrap().len(), 1);
    assert_eq!(title["value"], "Hallo");

    Ok(())
}

#[test]
fn test_languages() -> Result<()> {
    let test = project()?;

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("languages"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        [ROOT]/src/assets/i18n/de.json  1 keys, 1 used, 0 empty
        [ROOT]/src/assets/i18n/en.json  2 keys, 1 used, 1 empty

        ----- stderr -----
        ");
    });

    Ok(())
}

#[test]
fn test_inventory_reports_config_errors() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("languages"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No language files found matching ./src/assets/i18n/*.json
    ");

    Ok(())
}
