mod common;

use anyhow::Result;
use common::{exec, signed_in_shell};
use debora::Ledger;
use debora::auth::MemoryAuthenticator;
use debora::cli::Shell;

#[test]
fn test_login_shows_dashboard() -> Result<()> {
    let mut shell = Shell::new(Ledger::with_sample_data(), MemoryAuthenticator::new());
    exec(
        &mut shell,
        "register --email bob@example.com --password hunter22",
    )?;

    let out = exec(
        &mut shell,
        "login --email BOB@example.com --password hunter22",
    )?;

    assert!(out.contains("Signed in as bob@example.com"));
    assert!(out.contains("Total Balance:"));
    assert!(out.contains("3500.00"));
    assert!(out.contains("Salary"));
    assert!(out.contains("Rent"));
    Ok(())
}

#[test]
fn test_logout_locks_the_ledger() -> Result<()> {
    let mut shell = signed_in_shell(Ledger::new())?;

    assert!(exec(&mut shell, "logout")?.contains("Signed out."));
    let err = exec(&mut shell, "summary").unwrap_err();

    assert!(err.to_string().contains("log in first"));
    assert!(shell.session().is_none());
    Ok(())
}

#[test]
fn test_full_crud_session() -> Result<()> {
    let mut shell = signed_in_shell(Ledger::new())?;

    let out = exec(
        &mut shell,
        r#"add --label "Coffee beans" --amount -12.90 --category groceries --date 2024-04-02"#,
    )?;
    assert!(out.starts_with("Success: Operation created successfully"));
    let id = shell.ledger().operations().next().unwrap().id;

    let out = exec(&mut shell, &format!("edit {} --label Espresso", id))?;
    assert!(out.starts_with("Success: Operation updated successfully"));
    assert_eq!(shell.ledger().get(id)?.label, "Espresso");
    assert_eq!(shell.ledger().get(id)?.amount_cents, -1290);

    let out = exec(&mut shell, "list")?;
    assert!(out.contains("Espresso"));
    assert!(out.contains("expense"));
    assert!(out.contains("12.90"));

    let out = exec(&mut shell, &format!("delete {}", id))?;
    assert!(out.starts_with("Success: Operation deleted successfully"));
    assert!(shell.ledger().is_empty());

    let out = exec(&mut shell, &format!("delete {}", id))?;
    assert!(out.starts_with("Not found:"));
    Ok(())
}

#[test]
fn test_edit_with_bad_amount_reports_invalid_input() -> Result<()> {
    let mut shell = signed_in_shell(Ledger::with_sample_data())?;
    let salary = shell.ledger().operations().next().unwrap().clone();

    let out = exec(
        &mut shell,
        &format!("edit {} --amount 12.345", salary.id),
    )?;

    assert!(out.starts_with("Invalid input:"));
    assert!(out.contains("amount: amount has more than two decimal places"));
    assert_eq!(shell.ledger().get(salary.id)?, &salary);
    Ok(())
}

#[test]
fn test_help_does_not_end_session() -> Result<()> {
    let mut shell = signed_in_shell(Ledger::new())?;

    let out = exec(&mut shell, "help")?;

    assert!(out.contains("add"));
    assert!(out.contains("summary"));
    Ok(())
}
