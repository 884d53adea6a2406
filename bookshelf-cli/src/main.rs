//! Bookshelf - browse a book catalog from the terminal
//!
//! One-shot commands print a filtered page of the catalog; `browse` runs
//! an interactive session over stdin.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use bookshelf_core::theme::Theme;

mod browse;
mod commands;
mod output;

use commands::{FilterArgs, Settings, Vocabulary};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "bookshelf",
    author,
    version,
    about = "Browse, filter and page through a book catalog"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set the logging level
    #[clap(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Config file to use instead of the per-user one
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (.yaml, .yml or .json)
    #[clap(long, global = true)]
    catalog: Option<PathBuf>,

    /// Number of books revealed per page
    #[clap(long, global = true)]
    page_size: Option<usize>,

    /// Color theme for rendered pages (day or night)
    #[clap(long, global = true)]
    theme: Option<Theme>,
}

#[derive(Parser, Debug)]
enum Command {
    /// List the books matching a filter
    List {
        #[clap(flatten)]
        filter: FilterArgs,

        /// Number of pages to reveal (at least 1)
        #[clap(long, default_value = "1", value_parser = page_count_parser())]
        pages: usize,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show the details of one book
    Show {
        /// Book id
        id: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// List the genre filter options
    Genres {
        #[clap(long)]
        json: bool,
    },

    /// List the author filter options
    Authors {
        #[clap(long)]
        json: bool,
    },

    /// Interactive session: filter, page and select books from stdin
    Browse,

    /// Render the matching books as a standalone HTML page
    Render {
        #[clap(flatten)]
        filter: FilterArgs,

        /// Number of pages to reveal (at least 1)
        #[clap(long, default_value = "1", value_parser = page_count_parser())]
        pages: usize,

        /// Write to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

fn page_count_parser() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
}

fn initialize_tracing(log_level: &LogLevel) {
    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let settings = Settings::resolve(
        cli.config.as_deref(),
        cli.catalog,
        cli.page_size,
        cli.theme,
    )?;

    match cli.command {
        Command::List {
            filter,
            pages,
            json,
        } => commands::execute_list(&settings, &filter, pages, json),
        Command::Show { id, json } => commands::execute_show(&settings, &id, json),
        Command::Genres { json } => {
            commands::execute_vocabulary(&settings, Vocabulary::Genres, json)
        }
        Command::Authors { json } => {
            commands::execute_vocabulary(&settings, Vocabulary::Authors, json)
        }
        Command::Browse => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            browse::run(&settings, stdin.lock(), stdout.lock())
        }
        Command::Render {
            filter,
            pages,
            output,
        } => commands::execute_render(&settings, &filter, pages, output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pages_must_be_positive() {
        for command in ["list", "render"] {
            let err = Cli::try_parse_from(["bookshelf", command, "--pages", "0"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }

        let cli = Cli::try_parse_from(["bookshelf", "list", "--pages", "3"]).unwrap();
        assert!(matches!(cli.command, Command::List { pages: 3, .. }));

        let cli = Cli::try_parse_from(["bookshelf", "render"]).unwrap();
        assert!(matches!(cli.command, Command::Render { pages: 1, .. }));
    }
}
