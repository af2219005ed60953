mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("finance_core_cli")
        .expect("binary built")
        .env("FINANCE_CORE_CLI_SCRIPT", "1")
        .env("FINANCE_CORE_HOME", home)
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn help_lists_commands() {
    let home = common::temp_base();
    script(&home, "help\nexit\n").success().stdout(
        contains("Available commands")
            .and(contains("Expenses & incomes:"))
            .and(contains("Investments:"))
            .and(contains("add-expense")),
    );
}

#[test]
fn help_for_one_command_names_its_area() {
    let home = common::temp_base();
    script(
        &home,
        "help top-up
exit
",
    )
    .success()
    .stdout(contains("top-up (Investments)").and(contains("Usage: top-up")));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = common::temp_base();
    script(&home, "sumary\nexit\n")
        .success()
        .stdout(contains("Unknown command `sumary`").and(contains("Suggestion: `summary`?")));
}

#[test]
fn summary_requires_login() {
    let home = common::temp_base();
    script(&home, "summary\nexit\n")
        .success()
        .stdout(contains("No user signed in."));
}

#[test]
fn recorded_transactions_show_up_in_summary() {
    let home = common::temp_base();
    let input = "\
login alice
filter 2025 06 all
add-expense \"Weekly market\" 120.50 Food 2025-06-03
add-income Salary 1000 2025-06-01
summary
list expenses
exit
";
    script(&home, input).success().stdout(
        contains("Signed in as alice.")
            .and(contains("Balance  : R$ 879.50"))
            .and(contains("Weekly market")),
    );

    assert!(home
        .join("users")
        .join("alice")
        .join("expenses.json")
        .exists());
    assert!(home.join("config.json").exists());
}

#[test]
fn last_user_is_remembered_between_runs() {
    let home = common::temp_base();
    script(&home, "login bob\nexit\n").success();
    script(&home, "whoami\nexit\n")
        .success()
        .stdout(contains("Signed in as bob."));
}

#[test]
fn project_prints_final_amount() {
    let home = common::temp_base();
    script(&home, "project 1000 12% 12\nexit\n")
        .success()
        .stdout(contains("Final amount : R$ 1120.00"));
}

#[test]
fn version_reports_where_files_live() {
    let home = common::temp_base();
    let config_file = home.join("config.json");
    script(&home, "version\nexit\n").success().stdout(
        contains("Finance Core")
            .and(contains("Config file"))
            .and(contains(config_file.display().to_string())),
    );
}
