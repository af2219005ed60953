use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::cli::errors::{CliError, CommandError};
use crate::cli::io as cli_io;
use crate::cli::registry::{CommandEntry, CommandRegistry, REGISTRY};
use crate::config::{Config, ConfigManager};
use crate::core::Dashboard;
use crate::domain::{FilterState, UserId};
use crate::session::Session;
use crate::store::{DocumentStore, JsonDocumentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: &'static CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: Box<dyn DocumentStore>,
    pub session: Session,
    pub dashboard: Dashboard,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    /// Builds a context whose config and documents live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        Self::with_config_manager(mode, config_manager)
    }

    fn with_config_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = JsonDocumentStore::new(Some(config_manager.data_dir(&config)))?;
        let mut context = Self {
            mode,
            registry: &REGISTRY,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store: Box::new(store),
            session: Session::new(),
            dashboard: Dashboard::new(FilterState::default()),
            running: true,
        };
        context.restore_last_user()?;
        Ok(context)
    }

    fn restore_last_user(&mut self) -> Result<(), CliError> {
        let Some(last) = self.config.last_user.clone() else {
            return Ok(());
        };
        self.session.sign_in(UserId::new(last));
        self.refresh()?;
        Ok(())
    }

    /// Reloads the dashboard snapshots for whoever is signed in.
    pub fn refresh(&mut self) -> Result<(), CliError> {
        self.dashboard
            .load_from(self.store.as_ref(), &self.session)?;
        Ok(())
    }

    pub fn require_user(&self) -> Result<UserId, CommandError> {
        Ok(self.session.require_user()?.clone())
    }

    pub fn remember_user(&mut self, user: Option<&UserId>) -> Result<(), CommandError> {
        self.config.last_user = user.map(|user| user.as_str().to_string());
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn money(&self, amount: f64) -> String {
        self.config.format_money(amount)
    }

    pub fn prompt(&self) -> String {
        match self.session.current_user() {
            Some(user) => format!("finance({})> ", user),
            None => "finance> ".to_string(),
        }
    }

    pub fn command(&self, name: &str) -> Option<&'static CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Closest registered command name within edit distance 3, if any.
    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= 3)
            .map(|(_, name)| name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(crate::FinanceError::NotSignedIn) => {
                cli_io::print_error("No user signed in.");
                cli_io::print_hint("Use `login <uid>` first.");
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                cli_io::print_error(other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .expect("context");
        (context, temp)
    }

    #[test]
    fn suggestions_stay_within_edit_distance() {
        let (context, _guard) = context();
        assert_eq!(context.closest_command("sumary"), Some("summary"));
        assert_eq!(context.closest_command("LOGIN"), Some("login"));
        assert_eq!(context.closest_command("zzzzzzzzzzzz"), None);
    }

    #[test]
    fn last_user_is_restored_on_start() {
        let temp = TempDir::new().expect("temp dir");
        {
            let mut context =
                ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
                    .expect("context");
            context
                .remember_user(Some(&UserId::new("u-7")))
                .expect("remember");
        }
        let context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .expect("context");
        assert_eq!(
            context.session.current_user().map(UserId::as_str),
            Some("u-7")
        );
        assert_eq!(context.prompt(), "finance(u-7)> ");
    }

    #[test]
    fn unknown_commands_continue_the_loop() {
        let (mut context, _guard) = context();
        let control = context.dispatch("bogus", "bogus", &[]).expect("dispatch");
        assert_eq!(control, LoopControl::Continue);
        let control = context.dispatch("exit", "exit", &[]).expect("dispatch");
        assert_eq!(control, LoopControl::Exit);
    }
}
