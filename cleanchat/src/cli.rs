// cleanchat/src/cli.rs
//! This file defines the command-line interface (CLI) for the cleanchat application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "cleanchat",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect banned language in chat messages",
    long_about = "CleanChat classifies chat messages as banned or clean using an obfuscation-tolerant Russian ban-list, optional lemmatization and edit-distance matching. It can check single messages, moderate a stream of messages from many authors, and report the most frequent violators.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a filter configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", global = true, help = "Path to a filter configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Override the URL the ban-list is fetched from.
    #[arg(long = "lexicon-url", value_name = "URL", env = "CLEANCHAT_LEXICON_URL", global = true, help = "Fetch the ban-list from this URL.")]
    pub lexicon_url: Option<String>,

    /// Skip the network and use the embedded ban-list.
    #[arg(long, global = true, help = "Use the embedded ban-list without fetching.")]
    pub offline: bool,

    /// Path to a `surface<TAB>lemma` dictionary enabling the lemma and fuzzy steps.
    #[arg(long = "lemma-model", value_name = "FILE", env = "CLEANCHAT_LEMMA_MODEL", global = true, help = "Lemma dictionary enabling the linguistic step.")]
    pub lemma_model: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `cleanchat` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classifies each argument, or each stdin line, as BANNED or CLEAN.
    #[command(about = "Classify messages as BANNED or CLEAN. Exits with status 1 when any message is banned.")]
    Check(CheckCommand),

    /// Reads a stream of authored messages, records violations and reports the top violators.
    #[command(about = "Moderate a stream of authored messages and report the top violators.")]
    Moderate(ModerateCommand),

    /// Shows where the ban-list came from and what it contains.
    #[command(about = "Show the ban-list source, size and short-word count.")]
    Lexicon(LexiconCommand),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Messages to classify (reads stdin lines if none are given).
    #[arg(value_name = "TEXT", help = "Messages to classify. Reads one message per stdin line when omitted.")]
    pub texts: Vec<String>,

    /// Print which detection step matched.
    #[arg(long, short = 'e', help = "Print the matched word and detection step for banned messages.")]
    pub explain: bool,
}

/// Arguments for the `moderate` command.
#[derive(Parser, Debug)]
pub struct ModerateCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read messages from a file instead of stdin.")]
    pub input: Option<PathBuf>,

    /// Input lines are JSON objects instead of tab-separated fields.
    #[arg(long, help = "Parse each input line as a JSON message object.")]
    pub json: bool,

    /// How many violators to report.
    #[arg(long, value_name = "N", help = "Number of top violators to report (defaults to reporting.top_n).")]
    pub top: Option<usize>,

    /// Append every violation to this JSON-lines file.
    #[arg(long = "audit-log", value_name = "FILE", help = "Append violation records to a JSON-lines file.")]
    pub audit_log: Option<PathBuf>,
}

/// Arguments for the `lexicon` command.
#[derive(Parser, Debug)]
pub struct LexiconCommand {
    /// Print every word, one per line.
    #[arg(long, help = "Print every ban-list word.")]
    pub list: bool,
}
