use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCRIPT: &str = r#"
# client
set client-name "Venad Finances"
set quote-ref VENADFIN_QUOTE_26
set project-type erp

# scope
nav set 1 Home
page set 1 name Home Page
feature set 1 1 Hero banner
page add
page set 2 name About Us

# pricing
price set 1 name UI/UX Design
price set 1 price 15000
price add
price set 2 name Hosting
price set 2 price abc
"#;

fn quotegen(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quotegen").unwrap();
    cmd.env("QUOTEGEN_HOME", home)
        .env_remove("QUOTEGEN_USERNAME")
        .env_remove("QUOTEGEN_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// A config home whose quote needs no sign-in.
fn open_home() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("config.json"), r#"{ "gate-open": true }"#).unwrap();
    home
}

fn write_script(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("quote.txt");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_render_editor_defaults_to_client_info() {
    let home = open_home();
    let script = write_script(&home, "");

    quotegen(home.path())
        .arg("render")
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("▸ Client Info"))
        .stdout(predicate::str::contains("Website Development"));
}

#[test]
fn test_render_editor_section() {
    let home = open_home();
    let script = write_script(&home, SCRIPT);

    quotegen(home.path())
        .args(["render", "--view", "editor", "--section", "pricing", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("▸ Pricing"))
        .stdout(predicate::str::contains("01"))
        .stdout(predicate::str::contains("15,000"))
        .stdout(predicate::str::contains("Fifteen Thousand"));
}

#[test]
fn test_render_preview_outline() {
    let home = open_home();
    let script = write_script(&home, SCRIPT);

    quotegen(home.path())
        .args(["render", "--view", "preview", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("ERP SOFTWARE"))
        .stdout(predicate::str::contains("Venad Finances"))
        .stdout(predicate::str::contains("2.2 Home Page"))
        .stdout(predicate::str::contains("2.3 About Us"))
        .stdout(predicate::str::contains("• Hero banner"))
        .stdout(predicate::str::contains(
            "Total Amount: ₹ 15,000 (Fifteen Thousand Rupees Only)",
        ))
        .stdout(predicate::str::contains("AMC CHARGE"));
}

#[test]
fn test_render_html_writes_print_document() {
    let home = open_home();
    let script = write_script(&home, SCRIPT);
    let out = home.path().join("quote.html");

    quotegen(home.path())
        .args(["render", "--view", "html", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Quote</title>"));
    assert!(html.contains("id=\"print-root\""));
    assert!(html.contains("Venad Finances"));
    assert!(!html.contains("window.print()"));
}

#[test]
fn test_render_reads_script_from_stdin() {
    let home = open_home();

    quotegen(home.path())
        .args(["render", "--view", "preview", "--script", "-"])
        .write_stdin("set client-name Stdin Client\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stdin Client"));
}

#[test]
fn test_render_reports_bad_line() {
    let home = open_home();
    let script = write_script(&home, "set client-name Acme\nprice remove 4\n");

    quotegen(home.path())
        .args(["render", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("No price module at position 4"));
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();

    quotegen(home.path())
        .args(["config", "company-name", "Acme Labs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("company-name set to Acme Labs"));

    quotegen(home.path())
        .args(["config", "company-name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Labs"));

    quotegen(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("company-name = Acme Labs"))
        .stdout(predicate::str::contains("payment-ifsc = FDRL0002281"));

    assert!(home.path().join("config.json").exists());
}

#[test]
fn test_config_branding_reaches_preview() {
    let home = open_home();
    let script = write_script(&home, "");

    quotegen(home.path())
        .args(["config", "company-name", "Acme Labs"])
        .assert()
        .success();

    quotegen(home.path())
        .args(["render", "--view", "preview", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("6. WHY ACME LABS?"));
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();

    quotegen(home.path())
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown field: colour"));
}

#[test]
fn test_render_respects_gate() {
    let home = tempfile::tempdir().unwrap();
    let script = write_script(&home, "");

    quotegen(home.path())
        .args(["config", "gate-username", "admin"])
        .assert()
        .success();
    quotegen(home.path())
        .args(["config", "gate-password", "s3cret"])
        .assert()
        .success();

    quotegen(home.path())
        .args(["render", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));

    quotegen(home.path())
        .args(["render", "--username", "admin", "--password", "wrong", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));

    quotegen(home.path())
        .args(["render", "--username", "admin", "--password", "s3cret", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Client Info"));
}

#[test]
fn test_environment_credentials_lock_the_session() {
    let home = tempfile::tempdir().unwrap();

    quotegen(home.path())
        .env("QUOTEGEN_USERNAME", "admin")
        .env("QUOTEGEN_PASSWORD", "pw")
        .arg("session")
        .write_stdin("show\nlogin admin nope\nlogin admin pw\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("login <user> <password>"))
        .stdout(predicate::str::contains("Invalid credentials"))
        .stdout(predicate::str::contains("Signed in"))
        .stdout(predicate::str::contains("▸ Client Info"))
        .stderr(predicate::str::contains("Access denied"));
}

#[test]
fn test_session_edits_and_previews() {
    let home = open_home();

    quotegen(home.path())
        .write_stdin(
            "set client-name Venad Finances\n\
             price set 1 name Design\n\
             price set 1 price 100000\n\
             preview\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("client-name updated"))
        .stdout(predicate::str::contains("Price module 1 updated"))
        .stdout(predicate::str::contains("One Lakh Rupees Only"));
}

#[test]
fn test_session_keeps_going_after_errors() {
    let home = open_home();

    quotegen(home.path())
        .arg("session")
        .write_stdin("fly away\nterm remove 9\nterm add\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command: fly"))
        .stderr(predicate::str::contains("No term at position 9"))
        .stdout(predicate::str::contains("Term 7 added"));
}

#[test]
fn test_session_floor_of_one() {
    let home = open_home();

    quotegen(home.path())
        .arg("session")
        .write_stdin("page remove 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept the last page"));
}

#[test]
fn test_session_print_to_file_needs_preview() {
    let home = open_home();
    let out = home.path().join("printed.html");
    let command = format!("print --to {}\n", out.display());

    quotegen(home.path())
        .arg("session")
        .write_stdin(command.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to print"));
    assert!(!out.exists());

    quotegen(home.path())
        .arg("session")
        .write_stdin(format!("preview\n{}", command))
        .assert()
        .success()
        .stdout(predicate::str::contains("Quote sent to print"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("id=\"print-root\""));
}

#[test]
fn test_session_dump_is_json() {
    let home = open_home();

    quotegen(home.path())
        .arg("session")
        .write_stdin("set quote-ref Q-7\ndump\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quoteRef\": \"Q-7\""));
}

#[test]
fn test_fresh_install_is_locked() {
    let home = tempfile::tempdir().unwrap();
    let script = write_script(&home, "");

    quotegen(home.path())
        .args(["render", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));

    quotegen(home.path())
        .arg("session")
        .write_stdin("show\nlogin admin admin\nset client-name Acme\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No credentials configured"))
        .stdout(predicate::str::contains("client-name updated").not())
        .stderr(predicate::str::contains("Access denied"));

    quotegen(home.path())
        .args(["config", "gate-open", "on"])
        .assert()
        .success();

    quotegen(home.path())
        .args(["render", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("▸ Client Info"));
}

#[test]
fn test_suffixed_prices_count_towards_the_total() {
    let home = open_home();
    let script = write_script(
        &home,
        "price set 1 name Design\nprice set 1 price 15000/-\nprice add\nprice set 2 name Hosting\nprice set 2 price \"2500 INR\"\n",
    );

    quotegen(home.path())
        .args(["render", "--view", "preview", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("15000/-"))
        .stdout(predicate::str::contains(
            "Total Amount: ₹ 17,500 (Seventeen Thousand Five Hundred Rupees Only)",
        ));
}
