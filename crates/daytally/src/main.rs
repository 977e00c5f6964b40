//! daytally - Task completion and time statistics from daily notes

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daytally_core::{Config, LoadReport, MidnightPolicy, NotesSource};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "daytally",
    version,
    about = "Task completion and time statistics from Markdown daily notes",
    long_about = "Scans a folder of daily notes for checkbox task lines such as\n\
                  \n\
                    - [x] 09:00 - 10:30 Write report #work\n\
                    - [ ] 11:00 - 11:30 Review PR #work\n\
                  \n\
                  and reports completion and time spent, overall and per #category.\n\
                  \n\
                  Examples:\n\
                    daytally --notes-dir ~/Notes/days     # Summary table (default)\n\
                    daytally summary --top 5              # Five categories with most time\n\
                    daytally --format json                # Summary as JSON\n\
                    daytally check ~/Notes/days/today.md  # Show how each task line parses\n\
                    daytally config                       # Print effective configuration\n\
                  \n\
                  Environment Variables:\n\
                    DAYTALLY_NOTES_DIR                    # Notes folder\n\
                    DAYTALLY_CONFIG                       # Config file path\n\
                    DAYTALLY_FORMAT                       # Force output format: json|table\n\
                    DAYTALLY_NO_COLOR                     # Disable ANSI colors\n\
                    DAYTALLY_LOG                          # Log filter (e.g. daytally_core=debug)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Folder holding the daily notes (overrides config)
    #[arg(long, env = "DAYTALLY_NOTES_DIR", global = true)]
    notes_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/daytally/config.toml)
    #[arg(long, env = "DAYTALLY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Also scan subfolders of the notes folder
    #[arg(long, global = true)]
    recursive: bool,

    /// How ranges crossing midnight are counted (wrap|zero)
    #[arg(long, global = true, value_parser = ["wrap", "zero"])]
    midnight: Option<String>,

    /// Force output format (json|table)
    #[arg(long, env = "DAYTALLY_FORMAT", global = true, value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "DAYTALLY_NO_COLOR", global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print task statistics for the notes folder (default)
    Summary {
        /// Only show the N categories with the most time spent
        #[arg(long, short = 'n')]
        top: Option<usize>,
    },
    /// Show how each task line of a single note parses
    Check {
        /// Note file to check
        file: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DAYTALLY_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let json = cli.format.as_deref() == Some("json");
    let no_color = cli.no_color;

    match cli.command.unwrap_or(Command::Summary { top: None }) {
        Command::Summary { top } => run_summary(&config, top, json, no_color),
        Command::Check { file } => run_check(&config, file, json),
        Command::Config => run_config(&config),
    }
}

/// Layer flags and environment over the config file
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(dir) = &cli.notes_dir {
        config.notes_dir = Some(dir.clone());
    }
    if cli.recursive {
        config.recursive = true;
    }
    match cli.midnight.as_deref() {
        Some("wrap") => config.midnight_policy = MidnightPolicy::Wrap,
        Some("zero") => config.midnight_policy = MidnightPolicy::Zero,
        _ => {}
    }

    debug!(
        notes_dir = ?config.notes_dir,
        recursive = config.recursive,
        midnight_policy = %config.midnight_policy,
        "Resolved configuration"
    );
    Ok(config)
}

fn run_summary(config: &Config, top: Option<usize>, json: bool, no_color: bool) -> Result<()> {
    let notes_dir = config.notes_dir()?;
    let source = NotesSource::from_config(config);
    let mut report = LoadReport::new();

    let summary = source
        .summarize(notes_dir, config.midnight_policy, &mut report)
        .with_context(|| format!("Failed to scan notes in {}", notes_dir.display()))?;

    println!("{}", cli::format_summary(&summary, top, json, no_color));

    if !json {
        eprintln!(
            "\n{} tasks from {} notes in {}",
            summary.total_tasks,
            report.files_read(),
            notes_dir.display()
        );
        if summary.skipped_lines > 0 {
            eprintln!(
                "{} task lines skipped (invalid time, run `daytally check <file>`)",
                summary.skipped_lines
            );
        }
    }

    if report.has_errors() {
        eprintln!("Warnings:");
        for error in &report.errors {
            eprintln!("  - {}: {}", error.source, error.message);
            if let Some(suggestion) = &error.suggestion {
                eprintln!("    {}", suggestion);
            }
        }
    }

    Ok(())
}

fn run_check(config: &Config, file: PathBuf, json: bool) -> Result<()> {
    let lines = NotesSource::read_file(&file)
        .with_context(|| format!("Failed to read note {}", file.display()))?;

    let checked = cli::check_lines(&lines, config.midnight_policy);
    println!("{}", cli::format_check(&checked, json));

    let invalid = checked.iter().filter(|c| c.outcome.is_err()).count();
    if invalid > 0 {
        return Err(cli::CliError::InvalidLines {
            path: file,
            count: invalid,
        }
        .into());
    }

    Ok(())
}

fn run_config(config: &Config) -> Result<()> {
    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;

    match Config::default_path() {
        Some(path) => println!("# default location: {}", path.display()),
        None => println!("# no default config location on this platform"),
    }
    print!("{}", rendered);

    Ok(())
}
