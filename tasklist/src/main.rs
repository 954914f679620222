//! `tasklist` -- interactive shell over one project's task list.
//!
//! # Usage
//!
//! ```bash
//! # Against a local tasklist-server on the default address
//! cargo run --bin tasklist
//!
//! # Another server and project
//! cargo run --bin tasklist -- --server-url http://10.0.0.5:9400 --project groceries
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use tasklist::app::{App, Intent};
use tasklist::config::{CliArgs, ClientConfig};
use tasklist::shell::{self, Command};
use tasklist::store::RemoteTaskStore;
use tasklist::store::http::HttpTaskStore;
use tasklist_proto::task::TaskId;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to a file; stdout belongs to the shell.
    let _log_guard = init_logging(&config.log_level, config.log_file.as_deref());

    tracing::info!(server = %config.server_url, project_id = %config.project, "tasklist starting");

    let store = HttpTaskStore::new(config.server_url.clone());
    let mut app = App::new(config.project.clone(), store);

    println!("{}", shell::banner(&config.project_info(), &config.server_url));
    app.dispatch(Intent::Refresh).await;
    print!("{}", shell::render(&app.view()));

    let result = run_shell(&mut app).await;

    tracing::info!("tasklist exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns the appender guard, which must be held for the life of the
/// process. Returns `None` if the log path has no usable directory or name.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("tasklist.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Reads commands from stdin until `quit` or end of input.
async fn run_shell<S: RemoteTaskStore>(app: &mut App<S>) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(shell::prompt(&app.view()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        let command = match shell::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Nothing => continue,
            Command::Help => {
                println!("{}", shell::HELP);
                continue;
            }
            Command::List => {}
            Command::Submit(name) => {
                app.dispatch(Intent::Enter(name)).await;
            }
            Command::Cancel => app.dispatch(Intent::CancelEdit).await,
            Command::Refresh => app.dispatch(Intent::Refresh).await,
            Command::Edit(index) => {
                if let Some(id) = task_at(app, index) {
                    app.dispatch(Intent::BeginEdit(id)).await;
                }
            }
            Command::Toggle(index) => {
                if let Some(id) = task_at(app, index) {
                    app.dispatch(Intent::Toggle(id)).await;
                }
            }
            Command::Delete(index) => {
                if let Some(id) = task_at(app, index) {
                    app.dispatch(Intent::Delete(id)).await;
                }
            }
            Command::Drag { from, to } => {
                if task_at(app, from).is_some() && task_at(app, to).is_some() {
                    for intent in shell::drag_gesture(from, to) {
                        app.dispatch(intent).await;
                    }
                }
            }
        }

        print!("{}", shell::render(&app.view()));
    }
}

/// Id of the task shown at `index`, printing a notice if there is none.
fn task_at<S: RemoteTaskStore>(app: &App<S>, index: usize) -> Option<TaskId> {
    let id = app.tasks().list().at(index).map(|t| t.id.clone());
    if id.is_none() {
        println!("no task #{}", index + 1);
    }
    id
}
