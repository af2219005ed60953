use std::{
    borrow::Cow,
    collections::HashMap,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::context::{CliMode, LoopControl, ShellContext};
use crate::cli::errors::{CliError, CommandError};
use crate::cli::output::info as output_info;
use crate::cli::registry::CommandRegistry;
use crate::core::dates;
use crate::domain::ALL_SENTINEL;

/// Environment variable switching the shell to non-interactive script mode.
pub const SCRIPT_ENV: &str = "FINANCE_CORE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::info!(?mode, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(context.registry);
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => match context.confirm_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err),
            },
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = parse_command_line(line)?;

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Line-editor support: completes command names and the fixed words each
/// command accepts, and hints the remaining usage once a command is typed.
struct CommandHelper {
    commands: Vec<&'static str>,
    usages: HashMap<&'static str, &'static str>,
    months: Vec<String>,
}

impl CommandHelper {
    fn new(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<&'static str> = registry.names().collect();
        commands.sort_unstable();
        let usages = registry
            .list()
            .into_iter()
            .map(|entry| (entry.name, entry.usage))
            .collect();
        let months = dates::month_options()
            .into_iter()
            .map(|(value, _)| value)
            .collect();
        Self {
            commands,
            usages,
            months,
        }
    }

    /// Fixed words accepted at argument position `index` of `command`.
    fn argument_words(&self, command: &str, index: usize) -> Vec<&str> {
        match (command, index) {
            ("help", 0) => self.commands.clone(),
            ("list", 0) => vec!["expenses", "incomes"],
            ("delete", 0) => vec!["expense", "income", "investment"],
            ("filter", 1) => self.months.iter().map(String::as_str).collect(),
            ("filter", 2) => vec![ALL_SENTINEL],
            _ => Vec::new(),
        }
    }

    /// Start of the word under the cursor and the words that can replace it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<&str>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let mut before = prefix[..start].split_whitespace();
        let words = match before.next() {
            None => self.commands.clone(),
            Some(command) => self.argument_words(&command.to_ascii_lowercase(), before.count()),
        };
        let matching = words
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .collect();
        (start, matching)
    }

    /// Argument part of the usage line once a bare command and a space are typed.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let command = line.strip_suffix(' ')?.trim_start();
        if command.is_empty() || command.contains(char::is_whitespace) {
            return None;
        }
        let usage = self.usages.get(command.to_ascii_lowercase().as_str())?;
        let arguments = usage.split_once(' ')?.1.trim();
        (!arguments.is_empty()).then(|| arguments.to_string())
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, CommandError> {
    split(input).map_err(|err| {
        CommandError::InvalidArguments(format!("cannot read `{}`: {}", input.trim(), err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry::REGISTRY;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"add-expense "Weekly market" 120.5 Food 2025-06-01"#)
            .expect("tokens");
        assert_eq!(tokens[1], "Weekly market");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line(r#"add-income "Salary 10"#).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    fn helper() -> CommandHelper {
        CommandHelper::new(&REGISTRY)
    }

    #[test]
    fn first_word_completes_command_names() {
        let helper = helper();
        let (start, words) = helper.candidates("add-");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["add-expense", "add-income", "add-investment"]);
    }

    #[test]
    fn arguments_complete_from_fixed_vocabularies() {
        let helper = helper();
        assert_eq!(helper.candidates("list in"), (5, vec!["incomes"]));
        assert_eq!(helper.candidates("DELETE inv"), (7, vec!["investment"]));
        assert_eq!(helper.candidates("filter 2025 1").1, vec!["10", "11", "12"]);
        assert_eq!(helper.candidates("filter 2025 06 a").1, vec!["all"]);
        assert_eq!(helper.candidates("help top").1, vec!["top-up"]);
        assert!(helper.candidates("add-expense Mar").1.is_empty());
    }

    #[test]
    fn typed_command_hints_its_arguments() {
        let helper = helper();
        assert_eq!(
            helper.usage_hint("top-up ").as_deref(),
            Some("<id> <amount>")
        );
        assert_eq!(helper.usage_hint("summary "), None);
        assert_eq!(helper.usage_hint("top-up"), None);
        assert_eq!(helper.usage_hint("top-up abc "), None);
        assert_eq!(helper.usage_hint("nope "), None);
    }
}
