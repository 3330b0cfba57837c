//! `asanhai` command line.
//!
//! # Responsibility
//! - Translate user commands into `TrackerService` calls.
//! - Resolve configuration and logging before touching storage.

mod output;

use anyhow::{Context, Result};
use asanhai_core::db::open_db;
use asanhai_core::{
    init_logging, Clock, JsonFileSnapshotRepository, SnapshotRepository,
    SqliteSnapshotRepository, SystemClock, TaskFilter, TaskId, TrackerConfig, TrackerService,
};
use clap::{Parser, Subcommand};
use log::debug;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "asanhai",
    version,
    about = "Dated tasks, completion history and weekly reports"
)]
struct Cli {
    /// SQLite database file (overrides ASANHAI_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for log files (overrides ASANHAI_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add one task.
    Add {
        #[arg(short, long)]
        title: String,

        /// Due date as YYYY-MM-DD.
        #[arg(short = 'D', long)]
        deadline: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Add tasks from `title, description, YYYY-MM-DD` lines; reads stdin
    /// when no file is given.
    BulkAdd { file: Option<PathBuf> },
    /// List tasks in a bucket.
    List {
        /// all, today, tomorrow, day-after-tomorrow, pending, overdue or upcoming.
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,
    },
    /// Toggle completion of a task.
    Toggle { id: TaskId },
    /// Move a task to a new deadline.
    Reschedule { id: TaskId, deadline: String },
    /// Delete a task.
    Delete { id: TaskId },
    /// Show task counts for one week.
    Week {
        /// Weeks away from the current one; negative values go back.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Show this week's completions, reschedules, pending and overdue tasks.
    Report,
    /// Write tasks and history to a JSON snapshot file.
    Export { path: PathBuf },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::BulkAdd { .. } => "bulk-add",
            Self::List { .. } => "list",
            Self::Toggle { .. } => "toggle",
            Self::Reschedule { .. } => "reschedule",
            Self::Delete { .. } => "delete",
            Self::Week { .. } => "week",
            Self::Report => "report",
            Self::Export { .. } => "export",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TrackerConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir.to_str().context("log directory must be valid UTF-8")?;
        init_logging(config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let mut service = TrackerService::open(repo, SystemClock)?;

    let text = run(&mut service, cli.command, cli.json)?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn run<R, C>(service: &mut TrackerService<R, C>, command: Command, json: bool) -> Result<String>
where
    R: SnapshotRepository,
    C: Clock,
{
    debug!(
        "event=cli_command module=cli status=start command={}",
        command.name()
    );
    match command {
        Command::Add {
            title,
            deadline,
            description,
        } => {
            let id = service.add_task(&title, &description, &deadline)?;
            Ok(format!("Added {id}"))
        }
        Command::BulkAdd { file } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut input = String::new();
                    std::io::stdin()
                        .read_to_string(&mut input)
                        .context("failed to read stdin")?;
                    input
                }
            };
            let added = service.add_bulk(&input);
            Ok(format!("Added {added} task(s)"))
        }
        Command::List { filter } => {
            let tasks = service.filtered(filter);
            if json {
                return Ok(serde_json::to_string_pretty(&tasks)?);
            }
            Ok(output::render_tasks(filter, &tasks))
        }
        Command::Toggle { id } => {
            let previous = service.toggle_complete(id)?;
            Ok(if previous {
                format!("Reopened {id}")
            } else {
                format!("Completed {id}")
            })
        }
        Command::Reschedule { id, deadline } => {
            service.reschedule(id, &deadline)?;
            Ok(format!("Moved {id} to {}", deadline.trim()))
        }
        Command::Delete { id } => Ok(if service.remove(id) {
            format!("Deleted {id}")
        } else {
            format!("No task {id}")
        }),
        Command::Week { offset } => {
            let window = service
                .week(offset)
                .context("week offset is outside the supported calendar range")?;
            if json {
                return Ok(serde_json::to_string_pretty(&window)?);
            }
            Ok(output::render_week(&window, service.tasks()))
        }
        Command::Report => {
            let report = service.weekly_report();
            if json {
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            Ok(output::render_report(&report))
        }
        Command::Export { path } => {
            JsonFileSnapshotRepository::new(&path)
                .save_snapshot(service.tasks(), service.events())
                .with_context(|| format!("failed to export to {}", path.display()))?;
            Ok(format!("Exported to {}", path.display()))
        }
    }
}
