//! Command implementations and the dispatcher used by `main`.

pub mod bootstrap;
pub mod check;
pub mod lexicon;
pub mod moderate;

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use cleanchat_core::ModerationEngine;

use crate::cli::{Cli, Commands};
use crate::ui::output_format;
use crate::ui::theme::{build_theme_map, ThemeMap};
use self::bootstrap::{build_engine, resolve_config, ConfigOverrides};
use self::moderate::ModerateOptions;

/// Exit status when `check` finds a banned message.
pub const EXIT_BANNED: u8 = 1;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Resolves configuration, builds the engine and runs the selected command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let theme = build_theme_map(cli.theme.as_deref())?;
    let config = resolve_config(cli.config.as_deref(), &ConfigOverrides::from(&cli))?;
    let engine = build_engine(&config).await?;

    match cli.command {
        Commands::Check(cmd) => {
            let outcome = check::run_check(engine.as_ref(), cmd.texts, cmd.explain, &theme)?;
            if outcome.any_banned() {
                Ok(ExitCode::from(EXIT_BANNED))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Moderate(cmd) => {
            let opts = ModerateOptions {
                input: cmd.input,
                json: cmd.json,
                top: cmd.top,
                audit_log: cmd.audit_log,
            };
            let engine: Arc<dyn ModerationEngine> = engine;
            let report = moderate::run_moderate(engine, &config, opts, &theme).await?;
            if report.invalid > 0 {
                warn_msg(format!("Skipped {} malformed line(s).", report.invalid), &theme);
            }
            if !cli.quiet {
                info_msg(
                    format!(
                        "Processed {} message(s): {} banned, {} without text.",
                        report.summary.processed, report.summary.banned, report.summary.skipped
                    ),
                    &theme,
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lexicon(cmd) => {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            lexicon::print_lexicon(&mut stdout.lock(), engine.as_ref(), cmd.list, &theme, supports_color)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
