use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, record};

const HEADER: [&str; 4] = ["key", "source", "Translation", "context"];

const INTRO_DIALOG: &str = r#"{
  "Type": "DialogAsset",
  "Name": "Intro",
  "Lines": [
    {
      "SourceString": "Hi",
      "LocalizedString": "",
      "Speaker": "/Game/NPC.Bob",
      "KeyString": "greet"
    }
  ]
}"#;

const LOOT_TABLE: &str = r#"{
  "Type": "DataTable",
  "Name": "Loot",
  "TableId": "/Game/DT.Loot_C",
  "Rows": {
    "Row0": {
      "DisplayName": {"Key": "LOOT_1", "SourceString": "Sword"}
    }
  }
}"#;

#[test]
fn test_extract_dialogue_and_data_table() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Content/Dialogs/Intro.json", INTRO_DIALOG)?;
    test.write_file("Content/Data/DT_Loot.json", LOOT_TABLE)?;

    let output = test
        .extract_command()
        .args(["Content", "-o", "out.csv"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        test.read_csv("out.csv")?,
        vec![
            record(&HEADER),
            record(&[
                "Loot::LOOT_1",
                "Sword",
                "",
                "Data/DT_Loot.json\nLoot, Row0, DisplayName"
            ]),
            record(&[
                "greet",
                "Hi",
                "",
                "Dialogs/Intro.json\nName: Intro\nSpeaker: Bob\nDialogueText"
            ]),
        ]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Extracted 2 rows from 2 documents to out.csv"));

    Ok(())
}

#[test]
fn test_extract_missing_table_key_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "Content/DT_Bad.json",
        r#"{
  "Type": "DataTable",
  "Rows": {
    "Row0": {
      "Name": {"SourceString": "No key here"}
    }
  }
}"#,
    )?;

    let output = test.extract_command().arg("Content").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: DataTable entry without key or text in"),
        "stderr: {}",
        stderr
    );
    assert!(stderr.contains("DT_Bad.json (line 5)"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_extract_malformed_document_is_fatal() -> Result<()> {
    let test = CliTest::with_file("Content/Broken.json", "{\"Type\": ")?;

    let output = test.extract_command().arg("Content").output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse JSON in"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_extract_first_string_table_namespace_wins() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Content/A_Strings.json",
        r#"{"StringTable": {"TableNamespace": "NS1", "KeysToEntries": {"K": "one"}}}"#,
    )?;
    test.write_file(
        "Content/B_Strings.json",
        r#"{"StringTable": {"TableNamespace": "NS2", "KeysToEntries": {"K": "two"}}}"#,
    )?;
    test.write_file(
        "Content/W_Hud.json",
        r#"[{"Inst": "EX_TextConst", "Value": {"SourceString": "one", "KeyString": "K", "Namespace": ""}}]"#,
    )?;

    let output = test.extract_command().arg("Content").output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_csv("parsed.csv")?,
        vec![
            record(&HEADER),
            record(&["NS1::K", "one", "", "W_Hud.json\nName: null"]),
            record(&["NS2::K", "two", "", "B_Strings.json"]),
        ]
    );

    Ok(())
}

#[test]
fn test_extract_deduplicates_keys_across_documents() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Content/UI/W_A.json",
        r#"{"Name": "W_A", "Title": {"SourceString": "Play", "Key": "PLAY"}}"#,
    )?;
    test.write_file(
        "Content/UI/W_B.json",
        r#"{"Name": "W_B", "Title": {"SourceString": "Play again", "Key": "PLAY"}}"#,
    )?;

    // A document path stands for its directory.
    let output = test
        .extract_command()
        .args(["Content/UI/W_B.json", "--out", "ui.csv"])
        .output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_csv("ui.csv")?,
        vec![
            record(&HEADER),
            record(&["PLAY", "Play", "", "UI/W_A.json\nName: W_A\nTitle"]),
        ]
    );

    Ok(())
}

#[test]
fn test_extract_uses_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".assetlocrc.json",
        r#"{
            "projectMarker": "MyGame",
            "output": "strings.csv",
            "ignores": ["**/Dev/**"]
        }"#,
    )?;
    test.write_file(
        "MyGame/Maps/Hub.json",
        r#"{"Outer": {"ObjectPath": "/Game/MyGame/Maps/Hub.7"}, "Sign": {"SourceString": "Welcome", "Key": "WELCOME"}}"#,
    )?;
    test.write_file(
        "MyGame/Dev/Test.json",
        r#"{"Sign": {"SourceString": "Debug", "Key": "DEBUG"}}"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        test.read_csv("strings.csv")?,
        vec![
            record(&HEADER),
            record(&["WELCOME", "Welcome", "", "Maps/Hub.json\nName: null\nSign"]),
        ]
    );

    Ok(())
}

#[test]
fn test_extract_empty_directory_writes_header_only() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir_all(test.root().join("Content"))?;

    let output = test.extract_command().arg("Content").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning: no .json documents found"));
    assert_eq!(test.read_csv("parsed.csv")?, vec![record(&HEADER)]);

    Ok(())
}
