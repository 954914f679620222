//! Line-oriented command shell over [`App`](crate::app::App).
//!
//! Parsing and rendering are pure so the binary only wires stdin and stdout.
//! Rows are addressed by their 1-based position in the printed list.

use tasklist_proto::task::{Project, Task};
use url::Url;

use crate::app::{AppView, Intent};
use crate::tasks::{ListView, RowBounds};

/// Height of one simulated row, in pointer units.
pub const ROW_HEIGHT: f32 = 24.0;

/// Help text printed by `help`.
pub const HELP: &str = "\
commands:
  ls                 show the list
  add <name>         add a task (plain text does the same)
  edit <n>           rename task n; type the new name next
  cancel             leave edit mode
  done <n>           toggle task n
  rm <n>             delete task n
  drag <from> <to>   move a row on screen (not saved)
  refresh            reload from the server
  help               this text
  quit               exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the list.
    List,
    /// Type a name and submit it.
    Submit(String),
    /// Start renaming the row at this 0-based index.
    Edit(usize),
    /// Leave edit mode.
    Cancel,
    /// Toggle the row at this 0-based index.
    Toggle(usize),
    /// Delete the row at this 0-based index.
    Delete(usize),
    /// Drag a row from one 0-based index to another.
    Drag {
        /// Row picked up.
        from: usize,
        /// Row dropped on.
        to: usize,
    },
    /// Reload the list.
    Refresh,
    /// Print usage.
    Help,
    /// Exit the shell.
    Quit,
    /// Blank line.
    Nothing,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A row number was expected.
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),
    /// A row argument was not a positive number.
    #[error("not a row number: {0:?}")]
    BadRow(String),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns [`ParseError`] if a command is missing or has a malformed row
/// number.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    Ok(match word {
        "" => Command::Nothing,
        "ls" => Command::List,
        "add" => Command::Submit(rest.to_string()),
        "edit" => Command::Edit(row(rest, "edit")?),
        "cancel" => Command::Cancel,
        "done" => Command::Toggle(row(rest, "done")?),
        "rm" => Command::Delete(row(rest, "rm")?),
        "drag" => {
            let (from, to) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::MissingRow("drag"))?;
            Command::Drag {
                from: row(from, "drag")?,
                to: row(to.trim(), "drag")?,
            }
        }
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Submit(line.to_string()),
    })
}

/// Parses a 1-based row number into a 0-based index.
fn row(arg: &str, command: &'static str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingRow(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::BadRow(arg.to_string())),
    }
}

/// Bounds of the row at `index` in a list of [`ROW_HEIGHT`] rows.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row_bounds(index: usize) -> RowBounds {
    let top = index as f32 * ROW_HEIGHT;
    RowBounds::new(top, top + ROW_HEIGHT)
}

/// The pointer events of dragging row `from` onto row `to`.
///
/// The pointer passes over every row in between, each time three quarters
/// of the way across it in the direction of travel.
#[must_use]
pub fn drag_gesture(from: usize, to: usize) -> Vec<Intent> {
    let hover = |index: usize, fraction: f32| {
        let row = row_bounds(index);
        Intent::DragHover {
            index,
            pointer_y: (row.bottom - row.top).mul_add(fraction, row.top),
            row,
        }
    };

    let mut intents = vec![Intent::DragStart(from)];
    if to > from {
        intents.extend((from + 1..=to).map(|i| hover(i, 0.75)));
    } else {
        intents.extend((to..from).rev().map(|i| hover(i, 0.25)));
    }
    intents.push(Intent::DragEnd);
    intents
}

/// Renders the list, one numbered row per task.
#[must_use]
pub fn render(view: &AppView<'_>) -> String {
    let mut out = String::new();
    match view.list {
        ListView::Loading => out.push_str("  (loading...)\n"),
        ListView::Empty => out.push_str("  There are no tasks, add new one\n"),
        ListView::Populated(tasks) => {
            for (i, task) in tasks.iter().enumerate() {
                out.push_str(&render_row(i, task));
                out.push('\n');
            }
        }
    }
    out
}

fn render_row(index: usize, task: &Task) -> String {
    let mark = if task.status { 'x' } else { ' ' };
    format!("{:>3}. [{mark}] {}", index + 1, task.name)
}

/// First line printed on start, e.g. `project Groceries (groceries) on http://...`.
#[must_use]
pub fn banner(project: &Project, server: &Url) -> String {
    if project.name == project.id.as_str() {
        format!("project {} on {server}", project.id)
    } else {
        format!("project {} ({}) on {server}", project.name, project.id)
    }
}

/// The prompt for the current session mode, e.g. `Edit task [Milk]> `.
#[must_use]
pub fn prompt(view: &AppView<'_>) -> String {
    let draft = view.session.draft_name();
    if draft.is_empty() {
        format!("{}> ", view.session.submit_label())
    } else {
        format!("{} [{draft}]> ", view.session.submit_label())
    }
}
