//! Command dispatch logic for repo-census

use super::{ScrapeArgs, scrape};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-census", version, author, long_about = None)]
#[command(about = "Find out who committed today to the most-starred GitHub repositories")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect the top-starred repositories and today's commit authors
    Scrape(Box<ScrapeArgs>),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match Cli::parse_from(args).command {
        Command::Scrape(scrape_args) => scrape(host, &scrape_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ColorMode, LogLevel};
    use crate::facts::{DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_RPS};

    fn parse(args: &[&str]) -> ScrapeArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Scrape(args) = cli.command;
        *args
    }

    #[test]
    fn test_scrape_defaults() {
        let args = parse(&["repo-census", "scrape", "--api-url", "http://localhost:1234"]);
        assert_eq!(args.api_url, "http://localhost:1234");
        assert_eq!(args.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(args.max_rps, DEFAULT_MAX_RPS);
        assert_eq!(args.timeout, 30);
        assert_eq!(args.top, None);
        assert_eq!(args.color, ColorMode::Auto);
        assert_eq!(args.log_level, LogLevel::None);
        assert!(args.json.is_none());
        assert!(!args.check);
    }

    #[test]
    fn test_scrape_explicit_options() {
        let args = parse(&[
            "repo-census",
            "scrape",
            "--github-token",
            "secret",
            "--max-concurrent",
            "2",
            "--max-rps",
            "3",
            "--timeout",
            "5",
            "--top",
            "7",
            "--color",
            "never",
            "--log-level",
            "debug",
            "--json",
            "out.json",
            "--check",
        ]);
        assert_eq!(args.github_token.as_deref(), Some("secret"));
        assert_eq!(args.max_concurrent, 2);
        assert_eq!(args.max_rps, 3);
        assert_eq!(args.timeout, 5);
        assert_eq!(args.top, Some(7));
        assert_eq!(args.color, ColorMode::Never);
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.json.as_deref().map(camino::Utf8Path::as_str), Some("out.json"));
        assert!(args.check);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["repo-census", "scrape", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["repo-census"]).is_err());
    }
}
