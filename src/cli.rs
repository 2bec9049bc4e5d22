use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "year-recap")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Yearly and rolling-window statistics for GitHub contribution calendars",
    long_about = "year-recap reads a saved GitHub contributions payload and derives totals, \
                  streaks, gaps, monthly and weekday breakdowns, and the top repositories \
                  and languages, either for a calendar year or for the past 365 days."
)]
pub struct Cli {
    /// Saved contributions payload (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Calendar year to report on (default: rolling past year)
    #[arg(short, long, value_name = "YYYY")]
    pub year: Option<i32>,

    /// IANA time zone used to decide what "today" is
    #[arg(long = "tz", env = "REPORT_TZ", value_name = "ZONE")]
    pub time_zone: Option<String>,

    /// Observation instant (RFC 3339), defaults to now
    #[arg(long, value_name = "INSTANT")]
    pub now: Option<DateTime<Utc>>,

    /// Number of issues the user was involved in
    #[arg(long, default_value_t = 0)]
    pub issues: u32,

    /// Number of pull requests the user authored
    #[arg(long, default_value_t = 0)]
    pub prs: u32,

    /// Reply from the AI summary service (JSON) to use instead of the fallback
    #[arg(long, value_name = "FILE")]
    pub ai_reply: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Only print a short digest of the report
    #[arg(long)]
    pub dry_run: bool,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to config file (default: ~/.config/year-recap/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable placeholder padding of ranked lists
    #[arg(long)]
    pub no_placeholders: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Report snapshot as JSON
    Json,
    /// Summary as markdown
    Markdown,
    /// Prompt text for the AI summary service
    Prompt,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Config,
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_none() && self.input.is_none() {
            return Err("--input is required to build a report".to_string());
        }

        if self.dry_run && self.format != OutputFormat::Json {
            return Err("--dry-run only supports JSON output".to_string());
        }

        Ok(())
    }
}
