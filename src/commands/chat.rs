//! Interactive chat session handler
//!
//! Runs a readline-based loop that submits user input to the gateway,
//! normalizes each reply, and prints the resulting transcript entries.
//! At most one request is outstanding at a time; the loop awaits each
//! call before prompting again.

use crate::client::GatewayClient;
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::normalizer::{normalize, normalize_with_fallback};
use crate::render::{render_message, MarkdownRenderer};
use crate::session::{ChatSession, INSTRUCTIONS_UPDATED_FALLBACK};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start an interactive chat session.
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `api_base` - Optional override for the gateway base URL
pub async fn run_chat(config: Config, api_base: Option<String>) -> Result<()> {
    let api_base = api_base.unwrap_or_else(|| config.chat.api_base.clone());
    let show_timestamps = config.chat.show_timestamps;

    let client = GatewayClient::new(api_base.as_str())?;
    let renderer = MarkdownRenderer::new();
    let mut session = ChatSession::new();
    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&api_base);

    loop {
        let prompt = if session.show_instructions() {
            format!("{} ", "[instructions] >>".green())
        } else {
            ">> ".to_string()
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    SpecialCommand::Instructions => {
                        if session.toggle_instructions() {
                            println!(
                                "{}",
                                "Instructions panel open. Type the instructions to send, or /cancel to close."
                                    .cyan()
                            );
                        } else {
                            println!("{}", "Instructions panel closed.".cyan());
                        }
                        continue;
                    }
                    SpecialCommand::Cancel => {
                        if session.show_instructions() {
                            session.toggle_instructions();
                            println!("{}", "Instructions panel closed.".cyan());
                        }
                        continue;
                    }
                    SpecialCommand::Status => {
                        print_status(&session);
                        continue;
                    }
                    SpecialCommand::Help => {
                        print_help();
                        continue;
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::None => {}
                }

                rl.add_history_entry(trimmed)?;

                if session.show_instructions() {
                    session.set_instructions(trimmed);
                    let Some(instructions) = session.submit_instructions() else {
                        continue;
                    };

                    println!("{}", "Sending instructions...".dimmed());
                    match client.post_instructions(&instructions).await {
                        Ok(reply) => session.complete(normalize_with_fallback(
                            &reply,
                            INSTRUCTIONS_UPDATED_FALLBACK,
                        )),
                        Err(e) => {
                            tracing::error!("Instructions error: {}", e);
                            session.fail();
                        }
                    }
                } else {
                    let Some(prompt_text) = session.submit_prompt(trimmed) else {
                        continue;
                    };

                    println!("{}", "AI is thinking...".dimmed());
                    match client.post_prompt(&prompt_text).await {
                        Ok(reply) => session.complete(normalize(&reply)),
                        Err(e) => {
                            tracing::error!("Chat error: {}", e);
                            session.fail();
                        }
                    }
                }

                if let Some(message) = session.transcript().last() {
                    println!("\n{}", render_message(message, &renderer, show_timestamps));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_welcome_banner(api_base: &str) {
    println!();
    println!("{}", "Parlay".bold());
    println!("Connected to gateway at {}", api_base.cyan());
    println!("Type a message to chat, or {} for commands.", "/help".cyan());
    println!();
}

fn print_status(session: &ChatSession) {
    let phase = if session.is_busy() { "busy" } else { "idle" };
    let panel = if session.show_instructions() {
        "open"
    } else {
        "closed"
    };
    println!("Messages: {}", session.transcript().len());
    println!("Phase: {}", phase);
    println!("Instructions panel: {}", panel);
    println!();
}
