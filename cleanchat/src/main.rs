// cleanchat/src/main.rs
//! CleanChat entry point.

use clap::Parser;
use std::process::ExitCode;

use cleanchat::cli::Cli;
use cleanchat::commands::{self, error_msg};
use cleanchat::logger;
use cleanchat::ui::theme::ThemeStyle;

/// Exit status for configuration and I/O failures.
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
