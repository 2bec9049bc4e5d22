mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use std::fs;
use year_recap::report::{ActivityCounts, ReportBuilder};
use year_recap::stats::ReportWindow;
use year_recap::summary::prompt::{system_prompt, user_prompt};
use year_recap::{logging, Config, ProfilePayload};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle subcommands
    if let Some(command) = &cli.command {
        return handle_command(command);
    }

    // Load or create config
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load_or_create_default()?
    };

    // Apply CLI overrides to config
    let config = apply_cli_overrides(config, &cli);

    run_report(config, &cli)
}

fn run_report(config: Config, cli: &Cli) -> Result<()> {
    let input = cli.input.as_ref().context("--input is required")?;
    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read payload {}", input.display()))?;
    let payload = ProfilePayload::from_json(&raw).context("failed to parse payload")?;

    if let Some(username) = &config.username {
        if !username.eq_ignore_ascii_case(&payload.user.login) {
            tracing::warn!(
                expected = %username,
                found = %payload.user.login,
                "payload belongs to a different user than configured"
            );
        }
    }

    let now = cli.now.unwrap_or_else(Utc::now);
    let window = ReportWindow::resolve(cli.year, &config.time_zone, now)?;

    let builder = ReportBuilder::new(config)?;
    let counts = ActivityCounts {
        issues: cli.issues,
        pull_requests: cli.prs,
    };
    let mut report = builder.build(&payload, &window, counts)?;

    if let Some(reply_path) = &cli.ai_reply {
        let reply = fs::read_to_string(reply_path)
            .with_context(|| format!("failed to read AI reply {}", reply_path.display()))?;
        report.apply_ai_reply(&reply);
    }

    let generated_at = Utc::now();
    let output = if cli.dry_run {
        serde_json::to_string_pretty(&report.dry_run_digest(generated_at))?
    } else {
        match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&report.snapshot(generated_at)?)?,
            OutputFormat::Markdown => report.summary.to_markdown(&report.title()),
            OutputFormat::Prompt => {
                format!("{}\n{}", system_prompt(), user_prompt(&report.digest())?)
            }
        }
    };

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Updated report: {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn handle_command(command: &Commands) -> Result<()> {
    match command {
        Commands::Init { force } => {
            let config_path = Config::default_config_path()?;

            if config_path.exists() && !force {
                eprintln!("Config file already exists at: {}", config_path.display());
                eprintln!("Use --force to overwrite");
                std::process::exit(1);
            }

            Config::create_default()?;
            println!("✓ Created config file at: {}", config_path.display());
        }
        Commands::Config => {
            let config = Config::load_or_create_default()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("Current configuration:\n");
            println!("{}", toml_str);
        }
    }
    Ok(())
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    // Override time zone if provided
    if let Some(ref tz) = cli.time_zone {
        config.time_zone = tz.clone();
    }

    if cli.no_placeholders {
        config.pad_placeholders = false;
    }

    config
}
