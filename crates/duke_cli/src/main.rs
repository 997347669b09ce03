//! `duke` command-line entry point.
//!
//! # Responsibility
//! - Parse subcommands and global options.
//! - Wire configuration, logging and storage into `duke_core::TaskService`.
//! - Print the display strings produced by the core verbatim.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use duke_core::db::open_db;
use duke_core::{SqliteTaskRepository, Task, TaskId, TaskRepository, TaskService};
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "duke", about = "Personal task tracker")]
struct Cli {
    /// Task database file.
    #[arg(long, global = true, env = "DUKE_DB")]
    db: Option<PathBuf>,

    /// Directory for rolling log files (absolute after resolution).
    #[arg(long, global = true, env = "DUKE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "DUKE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Task(TaskCommand),
    /// Print the core version.
    Version,
}

/// Subcommands that operate on the stored task list.
#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Show every task in insertion order.
    List,
    /// Add a plain to-do.
    Todo {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Add a task with a due date-time.
    Deadline {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Due date-time, e.g. 2019-12-02T18:00.
        #[arg(long)]
        by: String,
    },
    /// Mark a task as done.
    Done { id: TaskId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Version => {
            println!("duke {}", duke_core::core_version());
            return Ok(());
        }
        Commands::Task(command) => command,
    };

    let config = AppConfig::resolve(cli.db, cli.log_dir, cli.log_level)?;
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let mut service = TaskService::open(SqliteTaskRepository::new(&conn))
        .context("failed to load tasks")?;

    run(&mut service, command)
}

fn init_logging(config: &AppConfig) -> Result<(), String> {
    let log_dir = config
        .log_dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", config.log_dir.display()))?;
    duke_core::init_logging(&config.log_level, log_dir)
}

fn run<R: TaskRepository>(service: &mut TaskService<R>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::List => {
            let lines = service.list_tasks();
            if lines.is_empty() {
                println!("Your task list is empty.");
            } else {
                println!("Here are the tasks in your list:");
                for line in lines {
                    println!("{line}");
                }
            }
        }
        TaskCommand::Todo { name } => {
            let task = service.add_todo(&name.join(" "))?;
            print_added(&task, service.task_list().len());
        }
        TaskCommand::Deadline { name, by } => {
            let task = service.add_deadline(&name.join(" "), &by)?;
            print_added(&task, service.task_list().len());
        }
        TaskCommand::Done { id } => {
            let task = service.complete_task(id).inspect_err(|err| {
                warn!("event=cli_done module=cli status=error task_id={id} error={err}");
            })?;
            println!("Nice! I've marked this task as done:");
            println!("  {task}");
        }
    }
    Ok(())
}

fn print_added(task: &Task, count: usize) {
    println!("Got it. I've added this task:");
    println!("  {task}");
    println!("Now you have {count} task(s) in the list.");
}
