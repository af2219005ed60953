use crate::cli::commands::{expect_args, parse_amount, parse_date};
use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::{NewTransaction, TransactionKind};

const ADD_EXPENSE_USAGE: &str = "add-expense <description> <value> <category> <YYYY-MM-DD>";
const ADD_INCOME_USAGE: &str = "add-income <description> <value> <YYYY-MM-DD>";
const DELETE_USAGE: &str = "delete <expense|income|investment> <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-expense",
            "Record an expense",
            ADD_EXPENSE_USAGE,
            cmd_add_expense,
        ),
        CommandEntry::new(
            "add-income",
            "Record an income",
            ADD_INCOME_USAGE,
            cmd_add_income,
        ),
        CommandEntry::new(
            "delete",
            "Delete an expense, income, or investment by id",
            DELETE_USAGE,
            cmd_delete,
        ),
    ]
}

fn store_transaction(context: &mut ShellContext, draft: NewTransaction) -> CommandResult {
    let user = context.require_user()?;
    let record = context.store.insert_transaction(&user, draft)?;
    context.refresh()?;
    io::print_success(format!(
        "{} `{}` recorded ({}, id {}).",
        record.kind,
        record.description,
        context.money(record.value),
        record.id
    ));
    Ok(())
}

fn cmd_add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 4, ADD_EXPENSE_USAGE)?;
    let draft = NewTransaction::expense(
        args[0],
        parse_amount(args[1])?,
        args[2],
        parse_date(args[3])?,
    );
    store_transaction(context, draft)
}

fn cmd_add_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 3, ADD_INCOME_USAGE)?;
    let draft = NewTransaction::income(args[0], parse_amount(args[1])?, parse_date(args[2])?);
    store_transaction(context, draft)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, DELETE_USAGE)?;
    let (target, id) = (args[0].to_ascii_lowercase(), args[1]);
    let user = context.require_user()?;

    if !context.confirm(&format!("Delete {} `{}`?", target, id))? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }

    match target.as_str() {
        "investment" | "investments" => context.store.delete_investment(&user, id)?,
        other => {
            let kind = other
                .parse::<TransactionKind>()
                .map_err(|_| CommandError::InvalidArguments(format!("usage: {}", DELETE_USAGE)))?;
            context.store.delete_transaction(&user, kind, id)?;
        }
    }
    context.refresh()?;
    io::print_success(format!("Deleted {} `{}`.", target, id));
    Ok(())
}
