use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, record};

const OLD_BUILD: &str = "key,source,Translation,context
Menu::PLAY,Play,Jouer,W_Main.json
QUIT,Quit,Quitter,W_Main.json
Dlg::BYE,Bye,Salut,Intro.json
";

const NEW_BUILD: &str = "key,source,Translation,context
UI::PLAY,Play,,W_Main.json
UI::QUIT,Quit,,W_Main.json
Hud::AMMO,Ammo,,W_Hud.json
";

#[test]
fn test_compare_writes_three_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("old.csv", OLD_BUILD)?;
    test.write_file("new.csv", NEW_BUILD)?;

    let output = test.compare_command().args(["old.csv", "new.csv"]).output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let header = record(&["key", "source", "Translation", "context"]);
    assert_eq!(
        test.read_csv("Common old new.csv")?,
        vec![
            header.clone(),
            record(&["UI::PLAY", "Play", "Jouer", "W_Main.json"]),
            record(&["UI::QUIT", "Quit", "Quitter", "W_Main.json"]),
        ]
    );
    assert_eq!(
        test.read_csv("Only old.csv")?,
        vec![
            header.clone(),
            record(&["Dlg::BYE", "Bye", "Salut", "Intro.json"])
        ]
    );
    assert_eq!(
        test.read_csv("Only new.csv")?,
        vec![header, record(&["Hud::AMMO", "Ammo", "", "W_Hud.json"])]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rows (A): 3, unique keys (A): 3"), "{}", stdout);
    assert!(stdout.contains("Keys only in A (1):\nDlg::BYE\n"), "{}", stdout);
    assert!(stdout.contains("Keys only in B (1):\nHud::AMMO\n"), "{}", stdout);
    assert!(stdout.contains("Common keys: 2"), "{}", stdout);

    Ok(())
}

#[test]
fn test_compare_into_output_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.csv", "key\nX\n")?;
    test.write_file("b.csv", "key\nX\n")?;

    let output = test
        .compare_command()
        .args(["a.csv", "b.csv", "--out-dir", "reports/diff"])
        .output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_csv("reports/diff/Common a b.csv")?,
        vec![record(&["key"]), record(&["X"])]
    );
    assert_eq!(test.read_csv("reports/diff/Only a.csv")?, vec![record(&["key"])]);
    assert_eq!(test.read_csv("reports/diff/Only b.csv")?, vec![record(&["key"])]);

    Ok(())
}

#[test]
fn test_compare_missing_file() -> Result<()> {
    let test = CliTest::with_file("a.csv", "key\nX\n")?;

    let output = test.compare_command().args(["a.csv", "missing.csv"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found: missing.csv"));
    assert!(!test.root().join("Only a.csv").exists());

    Ok(())
}
