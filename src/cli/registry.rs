use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::cli::commands;
use crate::cli::context::ShellContext;
use crate::cli::errors::CommandResult;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Part of the app a command belongs to; help pages are grouped by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandArea {
    General,
    Session,
    Dashboard,
    Transactions,
    Investments,
}

impl CommandArea {
    pub const ALL: [CommandArea; 5] = [
        CommandArea::General,
        CommandArea::Session,
        CommandArea::Dashboard,
        CommandArea::Transactions,
        CommandArea::Investments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommandArea::General => "General",
            CommandArea::Session => "Session",
            CommandArea::Dashboard => "Dashboard",
            CommandArea::Transactions => "Expenses & incomes",
            CommandArea::Investments => "Investments",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub area: CommandArea,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            area: CommandArea::General,
            handler,
        }
    }

    pub fn in_area(mut self, area: CommandArea) -> Self {
        self.area = area;
        self
    }
}

/// Every shell command, built once per process.
pub static REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut registry = CommandRegistry::new();
    for entry in commands::all_definitions() {
        registry.register(entry);
    }
    registry
});

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    /// Commands of one area, in registration order.
    pub fn in_area(&self, area: CommandArea) -> Vec<&CommandEntry> {
        self.list()
            .into_iter()
            .filter(|entry| entry.area == area)
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }
}
