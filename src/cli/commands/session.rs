use crate::cli::commands::expect_args;
use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::UserId;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Sign in as the given user id",
            "login <uid>",
            cmd_login,
        ),
        CommandEntry::new("logout", "Sign out the current user", "logout", cmd_logout),
        CommandEntry::new("whoami", "Show the signed-in user", "whoami", cmd_whoami),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let uid = expect_args(args, 1, "login <uid>")?[0];
    if uid.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "user id must not be empty".into(),
        ));
    }
    let user = UserId::new(uid.trim());
    context.session.sign_in(user.clone());
    context.remember_user(Some(&user))?;
    context.refresh()?;
    io::print_success(format!("Signed in as {}.", user));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.sign_out() {
        Some(user) => {
            context.remember_user(None)?;
            context.refresh()?;
            io::print_success(format!("Signed out {}.", user));
        }
        None => io::print_warning("No user signed in."),
    }
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.current_user() {
        Some(user) => io::print_info(format!("Signed in as {}.", user)),
        None => io::print_info("No user signed in."),
    }
    Ok(())
}
