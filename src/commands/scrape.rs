use super::common::{ColorMode, LogLevel, init_logging};
use crate::facts::{Collector, DEFAULT_API_URL, DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_RPS, DEFAULT_TIMEOUT};
use crate::reports::{generate_console, generate_json};
use crate::{Host, Result};
use camino::Utf8PathBuf;
use clap::Args;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Maximum number of requests in flight at once
    #[arg(long, value_name = "COUNT", env = "MAX_CONCURRENT_REQUESTS", default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Maximum number of requests started per second
    #[arg(long, value_name = "RPS", env = "MAX_RPS", default_value_t = DEFAULT_MAX_RPS)]
    pub max_rps: u32,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Show only the first N repositories in the console report
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Exit with failure if any repository could not be summarized
    #[arg(long)]
    pub check: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Also write the collected data, including dropped repositories, to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

/// Collect the repositories and report on them.
///
/// # Errors
///
/// Returns an error if the collector cannot be created, GitHub rejects the token,
/// or a report cannot be written.
pub async fn scrape<H: Host>(host: &mut H, args: &ScrapeArgs) -> Result<()> {
    init_logging(args.log_level);

    let collector = Collector::with_base_url(
        args.github_token.as_deref(),
        args.api_url.as_str(),
        args.max_concurrent,
        args.max_rps,
        Duration::from_secs(args.timeout),
    )?;

    let outcome = collector.collect().await;
    collector.close();
    let collection = outcome?;

    let mut console_output = String::new();
    generate_console(&collection, args.top, args.color.use_colors_on_stdout(), &mut console_output)?;
    write!(host.output(), "{console_output}").into_app_err("unable to write the console report")?;

    if let Some(path) = &args.json {
        let mut json_output = String::new();
        generate_json(&collection, &mut json_output)?;
        fs::write(path, json_output).into_app_err_with(|| format!("unable to write JSON report '{path}'"))?;
    }

    if args.check && !collection.omissions.is_empty() {
        let _ = writeln!(host.error(), "{} repositories could not be summarized", collection.omissions.len());
        host.exit(1);
    }

    Ok(())
}
