use assert_cmd::Command;

#[test]
fn modules_subcommand_lists_registry() {
    let assert = Command::cargo_bin("vitrin")
        .unwrap()
        .arg("modules")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for name in ["categories", "products", "videos", "company-settings", "storefront"] {
        assert!(stdout.contains(name), "missing module '{name}' in:\n{stdout}");
    }
}

#[test]
fn migrate_subcommand_applies_schema() {
    let assert = Command::cargo_bin("vitrin")
        .unwrap()
        .env("VITRIN_DATABASE_PATH", ":memory:")
        .arg("migrate")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.starts_with("applied "), "unexpected output:\n{stdout}");
    assert!(!stdout.starts_with("applied 0 "));
}

#[test]
fn help_names_all_subcommands() {
    let assert = Command::cargo_bin("vitrin")
        .unwrap()
        .arg("--help")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("migrate"));
    assert!(stdout.contains("modules"));
}
