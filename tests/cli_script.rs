use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cashbook_cli").expect("binary builds");
    cmd.env("CASHBOOK_CLI_SCRIPT", "1")
        .env("CASHBOOK_HOME", home.path());
    cmd
}

#[test]
fn script_mode_records_and_reports_balances() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin("income 1000 salary\nbalances\nexit\n")
        .assert()
        .success()
        .stdout(contains("recorded"))
        .stdout(contains("1.000,00"));
}

#[test]
fn script_mode_rejects_overdraft_and_keeps_running() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin("expense 50\nbalances\nexit\n")
        .assert()
        .success()
        .stdout(contains("insufficient cash"))
        .stdout(contains("0,00"));
}

#[test]
fn script_mode_persists_between_runs() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin("income 2500 bonus\nexit\n")
        .assert()
        .success();
    cli(&home)
        .write_stdin("balances\nexit\n")
        .assert()
        .success()
        .stdout(contains("2.500,00"));
}

#[test]
fn script_mode_exports_the_current_month() {
    let home = TempDir::new().expect("temp dir");
    let report = home.path().join("report.csv");
    cli(&home)
        .write_stdin(format!(
            "income 1000 pay\nexport {}\nexit\n",
            report.display()
        ))
        .assert()
        .success()
        .stdout(contains("Exported"));

    let csv = std::fs::read_to_string(&report).expect("report written");
    assert!(csv.starts_with("Date,Description,Account,Debit,Credit"));
    assert!(csv.contains("Caja"));
    assert!(csv.contains("1000.00"));
}

#[test]
fn script_mode_reports_empty_month_on_export() {
    let home = TempDir::new().expect("temp dir");
    let report = home.path().join("empty.csv");
    cli(&home)
        .write_stdin(format!("export {}\nexit\n", report.display()))
        .assert()
        .success()
        .stdout(contains("no movements recorded"));
    assert!(!report.exists());
}
