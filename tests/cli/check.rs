use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

const ALL_ERRORS: [&str; 6] = [
    "--zombie-keys",
    "error",
    "--keys-on-views",
    "error",
    "--empty-keys",
    "error",
];

#[test]
fn test_consistent_project_passes() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": "Hi"}}"#)?;
    test.write_file("src/app/home.ts", "const title = t('home.title');")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unused_empty_key_fails() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": ""}}"#)?;
    test.write_file("src/app/home.ts", "export const x = 1;")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS);

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        error: "home.title"  zombieKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"home": {"title": ""}}
          | ^
          = note: Key: 'home.title' doesn't exist in project

        error: "home.title"  emptyKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"home": {"title": ""}}
          | ^
          = note: Key: 'home.title' is empty in [ROOT]/src/assets/i18n/en.json

        ✘ 2 errors, 0 warnings (1 views, 1 language files)
          zombieKeys: 1 error, 0 warnings
          emptyKeys: 1 error, 0 warnings

        ----- stderr -----
        "#);
    });

    Ok(())
}

#[test]
fn test_absent_key_lists_language_file() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": "Hi"}}"#)?;
    test.write_file(
        "src/app/home.ts",
        "const a = t('home.title');\nconst b = t('home.subtitle');\n",
    )?;

    let mut cmd = test.check_command();

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        error: "home.subtitle"  keysOnViews
          --> [ROOT]/src/app/home.ts:2:14
          |
        2 | const b = t('home.subtitle');
          |              ^
          = note: Key: 'home.subtitle' doesn't exist in '[ROOT]/src/assets/i18n/en.json'
          = help: did you mean 'home.title'?

        ✘ 1 error, 0 warnings (1 views, 1 language files)
          keysOnViews: 1 error, 0 warnings

        ----- stderr -----
        "#);
    });

    Ok(())
}

#[test]
fn test_default_severities_with_max_warning() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"a": "A", "b": "B", "c": "C"}"#)?;
    test.write_file("src/app/page.html", "<p>{{ 'a' | translate }}</p>")?;

    let mut cmd = test.check_command();
    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        warning: "b"  zombieKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"a": "A", "b": "B", "c": "C"}
          | ^
          = note: Key: 'b' doesn't exist in project

        warning: "c"  zombieKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"a": "A", "b": "B", "c": "C"}
          | ^
          = note: Key: 'c' doesn't exist in project

        ✘ 0 errors, 2 warnings (1 views, 1 language files)
          zombieKeys: 0 errors, 2 warnings
        Warnings exceed maxWarning (2 > 0)

        ----- stderr -----
        "#);
    });

    let mut cmd = test.check_command();
    cmd.args(["--max-warning", "2"]);
    let passing = test.run(cmd)?;
    assert_eq!(passing.code, 0);
    assert!(passing.stdout.ends_with(
        "✓ 0 errors, 2 warnings (1 views, 1 language files)\n  zombieKeys: 0 errors, 2 warnings\n"
    ));

    let mut cmd = test.check_command();
    cmd.args(["--max-warning", "1"]);
    assert_eq!(test.run(cmd)?.code, 1);

    Ok(())
}

#[test]
fn test_missing_in_one_of_two_languages() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"a": "A", "b": "B"}"#)?;
    test.write_language("de.json", r#"{"a": "A"}"#)?;
    test.write_file("src/app/page.tsx", "t('a'); t('b');")?;

    let mut cmd = test.check_command();

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        error: "b"  keysOnViews
          --> [ROOT]/src/app/page.tsx:1:12
          |
        1 | t('a'); t('b');
          |            ^
          = note: Key: 'b' doesn't exist in '[ROOT]/src/assets/i18n/de.json'

        ✘ 1 error, 0 warnings (1 views, 2 language files)
          keysOnViews: 1 error, 0 warnings

        ----- stderr -----
        "#);
    });

    Ok(())
}

#[test]
fn test_disabled_rules_pass() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"unused": ""}"#)?;
    test.write_file("src/app/page.ts", "t('missing');")?;

    let mut cmd = test.check_command();
    cmd.args([
        "--zombie-keys",
        "disable",
        "--keys-on-views",
        "disable",
        "--empty-keys",
        "disable",
    ]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (0 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_deep_search_covers_dynamic_keys() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"status": {"open": "O", "closed": "C"}}"#)?;
    test.write_file("src/app/status.ts", "label = t(`status.${state}`);")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS);
    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        error: "status.open"  zombieKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"status": {"open": "O", "closed": "C"}}
          | ^
          = note: Key: 'status.open' doesn't exist in project

        error: "status.closed"  zombieKeys
          --> [ROOT]/src/assets/i18n/en.json:1:1
          |
        1 | {"status": {"open": "O", "closed": "C"}}
          | ^
          = note: Key: 'status.closed' doesn't exist in project

        ✘ 2 errors, 0 warnings (1 views, 1 language files)
          zombieKeys: 2 errors, 0 warnings

        ----- stderr -----
        "#);
    });

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS).args(["--deep-search", "enable"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_custom_regexp_with_deep_search() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": "H"}}"#)?;
    test.write_file("src/app/page.ts", r#"tr("home")"#)?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS).args([
        "--custom-regexp",
        r#"tr\("([\w.]+)"\)"#,
        "--deep-search",
        "enable",
    ]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_ignored_keys() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"legacy": {"a": "A"}, "home": "H"}"#)?;
    test.write_file("src/app/page.ts", "t('home');")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS).args(["--ignored-keys", "^LEGACY\\."]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_ignore_paths() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": "H"}"#)?;
    test.write_file("src/app/page.ts", "t('home');")?;
    test.write_file("src/generated/bad.ts", "t('nope');")?;

    let mut cmd = test.check_command();
    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        error: "nope"  keysOnViews
          --> [ROOT]/src/generated/bad.ts:1:4
          |
        1 | t('nope');
          |    ^
          = note: Key: 'nope' doesn't exist in '[ROOT]/src/assets/i18n/en.json'

        ✘ 1 error, 0 warnings (2 views, 1 language files)
          keysOnViews: 1 error, 0 warnings

        ----- stderr -----
        "#);
    });

    let mut cmd = test.check_command();
    cmd.args(["-i", "./src/generated"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_custom_regexp() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": "H"}"#)?;
    test.write_file("src/app/page.ts", "translateKey[home]")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS)
        .args(["--custom-regexp", r"translateKey\[(?P<key>\w+)\]"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_explicit_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", r#"{"menu": {"open": "Open"}}"#)?;
    test.write_file("web/menu.vue", "<button>{{ $t('menu.open') }}</button>")?;

    let mut cmd = test.check_command();
    cmd.args(ALL_ERRORS)
        .args(["-p", "./web", "-l", "./locales/*.json"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": {"title": "Hi"}}"#)?;
    test.write_file("src/app/home.ts", "t('home.subtitle');")?;

    let mut cmd = test.check_command();
    cmd.args(["--format", "json"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 1);
    let json: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(json["passed"], false);
    assert_eq!(json["errorCount"], 1);

    let violations = json["violations"].as_array().unwrap();
    let absent = violations
        .iter()
        .find(|v| v["errorFlow"] == "keysOnViews")
        .unwrap();
    assert_eq!(absent["value"], "home.subtitle");
    assert_eq!(absent["absentedPath"].as_array().unwrap().len(), 1);
    assert_eq!(absent["suggestions"][0], "home.title");
    assert_eq!(absent["location"]["line"], 1);
    assert_eq!(absent["location"]["col"], 4);

    Ok(())
}

#[test]
fn test_malformed_language_file_is_an_error() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": "#)?;
    test.write_file("src/app/home.ts", "t('home');")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, 2);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.starts_with(&format!(
        "Error: Failed to parse language file: \"{}/src/assets/i18n/en.json\"",
        test.root().display()
    )));

    Ok(())
}

#[test]
fn test_no_language_files_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app/home.ts", "t('home');")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No language files found matching ./src/assets/i18n/*.json
    ");

    Ok(())
}

#[test]
fn test_invalid_ignored_key_pattern_is_an_error() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": "H"}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--ignored-keys", "(unclosed"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 2);
    assert!(output
        .stderr
        .starts_with("Error: Invalid regular expression in 'ignoredKeys': \"(unclosed\""));

    Ok(())
}

#[test]
fn test_unreadable_view_is_skipped() -> Result<()> {
    let test = CliTest::with_language("en.json", r#"{"home": "H"}"#)?;
    test.write_file("src/app/home.ts", "t('home');")?;
    std::fs::write(test.root().join("src/app/blob.js"), [0xff, 0xfe, 0x00])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No issues found (1 views, 1 language files)

    ----- stderr -----
    warning: 1 file(s) could not be read (use -v for details)
    ");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(test.command())?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("Usage:"));

    Ok(())
}
