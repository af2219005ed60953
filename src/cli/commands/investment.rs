use crate::cli::commands::{expect_args, parse_amount, parse_date, parse_months, parse_rate};
use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::{dates, projection};
use crate::domain::{
    Displayable, Identifiable, InvestmentRecord, InvestmentType, InvestmentUpdate, NewInvestment,
};

const ADD_USAGE: &str = "add-investment <name> <amount> <YYYY-MM-DD> <annual-rate> <type> <months>";
const EDIT_USAGE: &str = "edit-investment <id> <name|amount|start|rate|type|months> <value>";
const TOP_UP_USAGE: &str = "top-up <id> <amount>";
const PROJECT_USAGE: &str = "project <principal> <annual-rate> <months>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "investments",
            "List investments with projected returns",
            "investments",
            cmd_investments,
        ),
        CommandEntry::new(
            "add-investment",
            "Record a fixed-rate investment",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "edit-investment",
            "Change one field of an investment",
            EDIT_USAGE,
            cmd_edit,
        ),
        CommandEntry::new(
            "top-up",
            "Add money to an investment",
            TOP_UP_USAGE,
            cmd_top_up,
        ),
        CommandEntry::new(
            "project",
            "Project compound growth without storing anything",
            PROJECT_USAGE,
            cmd_project,
        ),
    ]
}

fn find_investment(context: &ShellContext, id: &str) -> Result<InvestmentRecord, CommandError> {
    context
        .dashboard
        .investment_records()
        .into_iter()
        .find(|record| record.id() == id)
        .ok_or_else(|| CommandError::Message(format!("No investment with id `{}`.", id)))
}

fn apply_update(context: &mut ShellContext, id: &str, update: InvestmentUpdate) -> CommandResult {
    let user = context.require_user()?;
    let updated = context.store.update_investment(&user, id, update)?;
    context.refresh()?;
    io::print_success(format!("Investment updated: {}.", updated.display_label()));
    io::print_info(format!(
        "  Principal: {}",
        context.money(updated.initial_amount)
    ));
    Ok(())
}

fn cmd_investments(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_user()?;
    output_section("Investments");
    let records = context.dashboard.investment_records();
    if records.is_empty() {
        io::print_info("  (none)");
        return Ok(());
    }
    for (record, estimate) in records.iter().zip(context.dashboard.investments()) {
        io::print_info(format!(
            "  {:<20} {:<14} {:>14} -> {:>14} (+{})  since {}  {}",
            record.name,
            record.investment_type,
            context.money(estimate.principal),
            context.money(estimate.projection.final_amount),
            context.money(estimate.projection.interest),
            dates::format_date(record.start_date),
            record.id
        ));
    }
    let totals = context.dashboard.portfolio();
    io::print_info(format!(
        "  Total: {} invested, {} projected ({} interest) across {} investments",
        context.money(totals.principal),
        context.money(totals.final_amount),
        context.money(totals.interest),
        totals.count
    ));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 6, ADD_USAGE)?;
    let draft = NewInvestment {
        name: args[0].to_string(),
        initial_amount: parse_amount(args[1])?,
        start_date: parse_date(args[2])?,
        return_rate: parse_rate(args[3])?,
        investment_type: args[4].parse::<InvestmentType>()?,
        term_months: parse_months(args[5])?,
    };
    let user = context.require_user()?;
    let record = context.store.insert_investment(&user, draft)?;
    context.refresh()?;
    io::print_success(format!(
        "Investment `{}` recorded (id {}).",
        record.name, record.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 3, EDIT_USAGE)?;
    let (id, field, value) = (args[0], args[1].to_ascii_lowercase(), args[2]);
    let mut update = InvestmentUpdate::from_record(&find_investment(context, id)?);
    match field.as_str() {
        "name" => update.name = value.to_string(),
        "amount" => update.initial_amount = parse_amount(value)?,
        "start" => update.start_date = parse_date(value)?,
        "rate" => update.return_rate = parse_rate(value)?,
        "type" => update.investment_type = value.parse::<InvestmentType>()?,
        "months" => update.term_months = parse_months(value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}`; usage: {}",
                other, EDIT_USAGE
            )))
        }
    }
    apply_update(context, id, update)
}

fn cmd_top_up(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, TOP_UP_USAGE)?;
    let id = args[0];
    let amount = parse_amount(args[1])?;
    let update = InvestmentUpdate::from_record(&find_investment(context, id)?).with_top_up(amount);
    apply_update(context, id, update)
}

fn cmd_project(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 3, PROJECT_USAGE)?;
    let principal = parse_amount(args[0])?;
    let rate = parse_rate(args[1])?;
    let months = parse_months(args[2])?;
    if principal <= 0.0 || rate <= 0.0 {
        return Err(CommandError::InvalidArguments(
            "principal and rate must be positive".into(),
        ));
    }
    let outcome = projection::project(principal, rate, months);
    output_section(format!("Projection over {} months", months));
    io::print_info(format!(
        "  Monthly rate : {:.4}%",
        projection::monthly_rate(rate) * 100.0
    ));
    io::print_info(format!(
        "  Interest     : {}",
        context.money(outcome.interest)
    ));
    io::print_info(format!(
        "  Final amount : {}",
        context.money(outcome.final_amount)
    ));
    Ok(())
}
