//! Interactive browse session driven by lines of input

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use bookshelf_core::host::ListContainer;
use bookshelf_core::FilterCriteria;

use crate::commands::{CliController, Settings};
use crate::output;

const PROMPT: &str = "bookshelf> ";

const HELP: &str = "\
Commands:
  filter [genre=ID] [author=ID] [title=TEXT]   apply a new filter (no arguments clears it)
  more                                        reveal the next page
  select ID                                   show the details of a visible book
  list                                        print the visible books again
  help                                        show this help
  quit                                        leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Filter(Vec<(String, String)>),
    More,
    Select(String),
    List,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for blank lines
fn parse_line(line: &str) -> Result<Option<BrowseCommand>, String> {
    let tokens = shell_words::split(line).map_err(|e| format!("Could not parse input: {e}"))?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match head.as_str() {
        "filter" | "f" => {
            let mut pairs = Vec::with_capacity(args.len());
            for arg in args {
                let Some((key, value)) = arg.split_once('=') else {
                    return Err(format!("Expected key=value, got '{arg}'"));
                };
                if !matches!(key, "genre" | "author" | "title") {
                    return Err(format!(
                        "Unknown filter key '{key}' (expected genre, author or title)"
                    ));
                }
                pairs.push((key.to_string(), value.to_string()));
            }
            BrowseCommand::Filter(pairs)
        }
        "more" | "m" => BrowseCommand::More,
        "select" | "s" => match args {
            [id] => BrowseCommand::Select(id.clone()),
            _ => return Err("Usage: select ID".to_string()),
        },
        "list" | "ls" => BrowseCommand::List,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    };
    Ok(Some(command))
}

fn print_visible<W: Write>(controller: &CliController, out: &mut W) -> Result<()> {
    let units = controller.list().units();
    if units.is_empty() {
        writeln!(out, "No books found.")?;
    } else {
        writeln!(out, "{}", output::units_table(units))?;
    }
    writeln!(
        out,
        "{}",
        output::indicator_line(
            units.len(),
            controller.state().match_count(),
            &controller.indicator()
        )
    )?;
    Ok(())
}

/// Run the session until `quit` or end of input
pub fn run<R: BufRead, W: Write>(settings: &Settings, input: R, mut out: W) -> Result<()> {
    let mut controller = settings.open_controller(false)?;
    print_visible(&controller, &mut out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                warn!(input = %line, "Rejected browse input");
                writeln!(out, "{message}")?;
                continue;
            }
        };
        debug!(?command, "Browse command");

        match command {
            BrowseCommand::Filter(pairs) => {
                let criteria =
                    FilterCriteria::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                controller.on_filter_submitted(criteria);
                print_visible(&controller, &mut out)?;
            }
            BrowseCommand::More => {
                if controller.on_show_more_requested() {
                    print_visible(&controller, &mut out)?;
                } else {
                    writeln!(out, "No more books to show.")?;
                }
            }
            BrowseCommand::Select(id) => {
                if controller.click(&id) {
                    write!(out, "{}", controller.details_mut().take_output())?;
                } else {
                    writeln!(out, "No visible book with id '{id}'.")?;
                }
            }
            BrowseCommand::List => print_visible(&controller, &mut out)?,
            BrowseCommand::Help => writeln!(out, "{HELP}")?,
            BrowseCommand::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}
