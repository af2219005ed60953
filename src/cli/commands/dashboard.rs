use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::dates;
use crate::domain::{CategoryFilter, FilterState, MonthFilter, TransactionKind, TransactionRecord};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "filter",
            "Show or change the year / month / category selection",
            "filter [year] [month|all] [category|all]",
            cmd_filter,
        ),
        CommandEntry::new(
            "summary",
            "Show overall and period totals",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "list",
            "List filtered transactions, newest first",
            "list [expenses|incomes]",
            cmd_list,
        ),
        CommandEntry::new(
            "categories",
            "List expense categories available to the filter",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new("years", "List the selectable years", "years", cmd_years),
        CommandEntry::new("months", "List the selectable months", "months", cmd_months),
    ]
}

fn describe_filter(filter: &FilterState) -> String {
    let month = match filter.selected_month {
        MonthFilter::All => "Todos os Meses".to_string(),
        MonthFilter::Month(month) => dates::month_label(month)
            .map(str::to_string)
            .unwrap_or_else(|| month.to_string()),
    };
    format!(
        "year {} / month {} / category {}",
        filter.selected_year, month, filter.selected_category
    )
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        io::print_info(format!(
            "Filter: {}",
            describe_filter(context.dashboard.filter())
        ));
        return Ok(());
    }

    let mut filter = context.dashboard.filter().clone();
    if let Some(raw_year) = args.first() {
        filter.selected_year = raw_year.trim().parse::<i32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a valid year", raw_year))
        })?;
    }
    if let Some(raw_month) = args.get(1) {
        filter.selected_month = raw_month.parse::<MonthFilter>()?;
    }
    if let Some(raw_category) = args.get(2) {
        filter.selected_category = CategoryFilter::from(*raw_category);
    }

    io::print_success(format!("Filter: {}", describe_filter(&filter)));
    context.dashboard.set_filter(filter);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_user()?;
    let summary = context.dashboard.summary();

    output_section("Overall");
    io::print_info(format!(
        "  Incomes  : {}",
        context.money(summary.overall.total_incomes)
    ));
    io::print_info(format!(
        "  Expenses : {}",
        context.money(summary.overall.total_expenses)
    ));
    io::print_info(format!(
        "  Balance  : {}",
        context.money(summary.overall.balance)
    ));

    output_section(format!("Period ({})", describe_filter(&summary.filter)));
    io::print_info(format!(
        "  Incomes  : {}",
        context.money(summary.period.period_incomes)
    ));
    io::print_info(format!(
        "  Expenses : {}",
        context.money(summary.period.period_expenses)
    ));
    io::print_info(format!(
        "  Balance  : {}",
        context.money(summary.period.period_balance)
    ));
    io::print_info(format!(
        "  Listed   : {} expenses, {} incomes",
        summary.listed_expenses, summary.listed_incomes
    ));
    Ok(())
}

fn print_records(context: &ShellContext, title: &str, records: &[TransactionRecord]) {
    output_section(title);
    if records.is_empty() {
        io::print_info("  (none)");
        return;
    }
    for record in records {
        let category = record.category.as_deref().unwrap_or("-");
        io::print_info(format!(
            "  {}  {:<24} {:>14}  {:<12} {}",
            dates::format_date(record.date),
            record.description,
            context.money(record.value),
            category,
            record.id
        ));
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_user()?;
    let kinds: Vec<TransactionKind> = match args.first() {
        None => vec![TransactionKind::Expense, TransactionKind::Income],
        Some(raw) => vec![raw.parse::<TransactionKind>()?],
    };
    for kind in kinds {
        match kind {
            TransactionKind::Expense => {
                print_records(context, "Expenses", &context.dashboard.expenses())
            }
            TransactionKind::Income => {
                print_records(context, "Incomes", &context.dashboard.incomes())
            }
        }
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_user()?;
    output_section("Categories");
    for category in context.dashboard.categories() {
        io::print_info(format!("  {}", category));
    }
    Ok(())
}

fn cmd_years(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Years");
    for year in dates::trailing_years(context.config.year_span) {
        io::print_info(format!("  {}", year));
    }
    Ok(())
}

fn cmd_months(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Months");
    for (key, label) in dates::month_options() {
        io::print_info(format!("  {:<4} {}", key, label));
    }
    Ok(())
}
