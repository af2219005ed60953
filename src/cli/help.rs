use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandArea, CommandEntry, CommandRegistry};

const NAME_WIDTH: usize = 16;

/// Lists every command under its area heading.
pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for area in CommandArea::ALL {
        let entries = registry.in_area(area);
        if entries.is_empty() {
            continue;
        }
        io::print_info(format!("{}:", area.label()));
        for entry in entries {
            io::print_info(format!(
                "  {:<width$} {}",
                entry.name,
                entry.description,
                width = NAME_WIDTH
            ));
        }
    }
    io::print_info("Use `help <command>` for the usage of one command.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("{} ({})", entry.name, entry.area.label()));
    io::print_info(format!("  {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
}
