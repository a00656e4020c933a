//! Special commands parser for the interactive chat session
//!
//! Special commands modify session state or print information instead of
//! being sent to the backend. Commands are prefixed with `/` and are
//! case-insensitive.

use colored::Colorize;

/// Special commands that can be executed during an interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Toggle the instructions panel
    ///
    /// While the panel is open, the next regular input line is sent as
    /// instructions rather than as a prompt.
    Instructions,

    /// Close the instructions panel without sending anything
    Cancel,

    /// Display session status (message count, phase, panel state)
    Status,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; process as a regular input line
    None,
}

/// Parse a line of input into a special command.
///
/// # Examples
///
/// ```
/// use parlay::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/help"), SpecialCommand::Help);
/// assert_eq!(parse_special_command("hello"), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> SpecialCommand {
    match input.trim().to_lowercase().as_str() {
        "/instructions" => SpecialCommand::Instructions,
        "/cancel" => SpecialCommand::Cancel,
        "/status" => SpecialCommand::Status,
        "/help" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        _ => SpecialCommand::None,
    }
}

/// Print help for the available special commands.
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {}  toggle the instructions panel", "/instructions".cyan());
    println!("  {}        close the instructions panel", "/cancel".cyan());
    println!("  {}        show session status", "/status".cyan());
    println!("  {}          show this help", "/help".cyan());
    println!("  {}          leave the session", "/exit".cyan());
    println!();
}
