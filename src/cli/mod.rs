pub mod commands;
pub mod context;
pub mod errors;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliMode, LoopControl, ShellContext};
pub use errors::{CliError, CommandError, CommandResult};
pub use shell::{run_cli, SCRIPT_ENV};
