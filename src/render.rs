//! Terminal rendering for transcript messages
//!
//! Message content is markdown; this module turns it into ANSI-colored
//! text covering paragraphs, emphasis, headings, lists, inline and
//! fenced code, block quotes, and GFM tables. Rendering is a pure
//! function of its input: the same transcript always produces the same
//! output.

use crate::message::{Message, Role, ToolUse};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Markdown renderer for terminal output
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render markdown text to colored terminal output.
    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(markdown, options);

        let mut output = String::new();

        let mut in_code_block = false;
        let mut code_content = String::new();
        let mut in_heading = false;
        let mut heading_level: usize = 0;
        let mut in_emphasis = false;
        let mut in_strong = false;
        let mut in_strikethrough = false;

        // Ordered lists carry the next item number; bullets carry None.
        let mut list_stack: Vec<Option<u64>> = Vec::new();

        let mut in_table = false;
        let mut table_rows: Vec<Vec<String>> = Vec::new();
        let mut current_row: Vec<String> = Vec::new();
        let mut current_cell = String::new();

        for event in parser {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Heading(level, _, _) => {
                        in_heading = true;
                        heading_level = level as usize;
                        output.push('\n');
                    }
                    Tag::Paragraph => {
                        if !output.is_empty() && !output.ends_with('\n') {
                            output.push('\n');
                        }
                    }
                    Tag::List(start) => {
                        list_stack.push(start);
                        if !output.ends_with('\n') {
                            output.push('\n');
                        }
                    }
                    Tag::Item => {
                        let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                        match list_stack.last_mut() {
                            Some(Some(number)) => {
                                output.push_str(&format!("{}{}. ", indent, number));
                                *number += 1;
                            }
                            _ => output.push_str(&format!("{}• ", indent)),
                        }
                    }
                    Tag::CodeBlock(kind) => {
                        in_code_block = true;
                        if let CodeBlockKind::Fenced(_) = kind {
                            code_content.clear();
                        }
                        output.push('\n');
                    }
                    Tag::Emphasis => in_emphasis = true,
                    Tag::Strong => in_strong = true,
                    Tag::Strikethrough => in_strikethrough = true,
                    Tag::BlockQuote => {
                        output.push_str(&format!("{}", "│ ".bright_black()));
                    }
                    Tag::Table(_) => {
                        in_table = true;
                        table_rows.clear();
                        current_row.clear();
                        current_cell.clear();
                    }
                    _ => {}
                },
                Event::End(tag) => match tag {
                    Tag::Heading(_, _, _) => {
                        in_heading = false;
                        output.push('\n');
                    }
                    Tag::Paragraph => output.push('\n'),
                    Tag::List(_) => {
                        list_stack.pop();
                        if list_stack.is_empty() {
                            output.push('\n');
                        }
                    }
                    Tag::Item => output.push('\n'),
                    Tag::CodeBlock(_) => {
                        for line in code_content.lines() {
                            output.push_str(&format!("  {}\n", line.dimmed()));
                        }
                        code_content.clear();
                        in_code_block = false;
                    }
                    Tag::Emphasis => in_emphasis = false,
                    Tag::Strong => in_strong = false,
                    Tag::Strikethrough => in_strikethrough = false,
                    Tag::Link(_, dest, _) => {
                        output.push_str(&format!(" ({})", dest.blue().underline()));
                    }
                    Tag::TableCell => {
                        current_row.push(current_cell.trim().to_string());
                        current_cell.clear();
                    }
                    Tag::TableHead | Tag::TableRow => {
                        table_rows.push(std::mem::take(&mut current_row));
                    }
                    Tag::Table(_) => {
                        output.push_str(&render_table(&table_rows));
                        table_rows.clear();
                        in_table = false;
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if in_table {
                        current_cell.push_str(&text);
                    } else if in_code_block {
                        code_content.push_str(&text);
                    } else if in_heading {
                        output.push_str(&format_heading(&text, heading_level));
                    } else if in_strikethrough {
                        output.push_str(&format!("{}", text.strikethrough()));
                    } else if in_emphasis {
                        output.push_str(&format!("{}", text.italic()));
                    } else if in_strong {
                        output.push_str(&format!("{}", text.bold()));
                    } else {
                        output.push_str(&text);
                    }
                }
                Event::Code(code) => {
                    if in_table {
                        current_cell.push_str(&code);
                    } else {
                        output.push_str(&format!("{}", code.yellow()));
                    }
                }
                Event::SoftBreak => {
                    if in_table {
                        current_cell.push(' ');
                    } else {
                        output.push('\n');
                    }
                }
                Event::HardBreak => output.push('\n'),
                Event::Rule => output.push_str(&format!("{}\n", "────────".dimmed())),
                _ => {}
            }
        }

        output
    }
}

fn format_heading(text: &str, level: usize) -> String {
    match level {
        1 => format!("{}", text.bold().underline()),
        2 => format!("{}", text.bold()),
        _ => format!("{}", text.bold().dimmed()),
    }
}

fn render_table(rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut rows = rows.iter();
    if let Some(header) = rows.next() {
        table.set_titles(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
    }
    for row in rows {
        table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }

    table.to_string()
}

/// Render one transcript message: role header, optional timestamp,
/// markdown content, and any tool annotations.
pub fn render_message(
    message: &Message,
    renderer: &MarkdownRenderer,
    show_timestamps: bool,
) -> String {
    let header = match message.role {
        Role::User => format!("{}", "You".blue().bold()),
        Role::Assistant => format!("{}", "Assistant".green().bold()),
    };

    let mut out = String::new();
    if show_timestamps {
        let stamp = message.timestamp.format("%H:%M:%S").to_string();
        out.push_str(&format!("{} {}\n", header, stamp.dimmed()));
    } else {
        out.push_str(&header);
        out.push('\n');
    }

    out.push_str(renderer.render(&message.content).trim_end());
    out.push('\n');

    if let Some(tools) = &message.tools {
        out.push_str(&render_tools(tools));
    }

    out
}

/// Render tool annotations as labeled lines, the description dimmed
/// alongside the name.
pub fn render_tools(tools: &[ToolUse]) -> String {
    let mut out = String::new();
    for tool in tools {
        out.push_str(&format!(
            "  {} {}\n",
            format!("[{}]", tool.name).cyan().bold(),
            tool.description.dimmed()
        ));
    }
    out
}

/// Render a whole transcript; used for full redraws.
pub fn render_transcript(
    messages: &[Message],
    renderer: &MarkdownRenderer,
    show_timestamps: bool,
) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&render_message(message, renderer, show_timestamps));
        out.push('\n');
    }
    out
}
