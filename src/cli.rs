//! One-shot subcommands.
//!
//! Each command loads the collection, runs a single controller operation and
//! prints the resulting view. A failure of that operation is turned back into
//! an error so the process exits non-zero.

use std::io::Write;

use clap::Subcommand;
use log::{debug, warn};

use crate::controller::ListController;
use crate::error::{ErrorKind, Result, TaskpadError};
use crate::item::{Filter, Item, ItemId, validate_title};
use crate::list::Operation;
use crate::remote::RemoteCollection;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the collection
    List {
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        #[arg(long, help = "Print items as JSON")]
        json: bool,
    },
    /// Create a todo
    Add { title: String },
    /// Flip a todo between pending and completed
    Toggle { id: String },
    /// Change a todo's title
    Rename { id: String, title: String },
    /// Remove a todo
    Delete { id: String },
}

impl Command {
    fn operation(&self) -> Operation {
        match self {
            Command::List { .. } => Operation::Load,
            Command::Add { .. } => Operation::Add,
            Command::Toggle { .. } => Operation::Toggle,
            Command::Rename { .. } => Operation::Save,
            Command::Delete { .. } => Operation::Delete,
        }
    }
}

pub async fn run_command<R, W>(
    controller: &mut ListController<R>,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    R: RemoteCollection,
    W: Write,
{
    controller.initialize().await;
    check_last_error(controller, Operation::Load)?;

    let operation = command.operation();
    let json = match command {
        Command::List { filter, json } => {
            controller.set_filter(filter);
            json
        }
        Command::Add { title } => {
            validate_title(&title)?;
            controller.add_item(&title).await;
            false
        }
        Command::Toggle { id } => {
            let item = find_item(controller, &id)?;
            controller.toggle_complete(&item).await;
            false
        }
        Command::Rename { id, title } => {
            validate_title(&title)?;
            let item = find_item(controller, &id)?;
            controller.begin_edit(&item);
            controller.update_draft(&title);
            controller.commit_edit().await;
            false
        }
        Command::Delete { id } => {
            let item = find_item(controller, &id)?;
            controller.delete_item(&item.id).await;
            false
        }
    };
    check_last_error(controller, operation)?;

    if json {
        let items: Vec<&Item> = controller.derived_view().collect();
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
    } else {
        for item in controller.derived_view() {
            writeln!(out, "{}", format_item_line(item))?;
        }
    }
    Ok(())
}

pub fn format_item_line(item: &Item) -> String {
    let status = if item.completed { "[✓]" } else { "[ ]" };
    format!("{status} {}  {}", item.id, item.title)
}

fn find_item<R: RemoteCollection>(controller: &ListController<R>, id: &str) -> Result<Item> {
    let id = ItemId::from(id);
    controller
        .state()
        .find(&id)
        .cloned()
        .ok_or(TaskpadError::NotFound(id))
}

/// Fail only when the command's own operation failed.
///
/// A delete the server answers with "not found" already removed the item, and
/// a resync failing after a confirmed mutation leaves the confirmed state in
/// place; both are reported as warnings.
fn check_last_error<R: RemoteCollection>(
    controller: &ListController<R>,
    operation: Operation,
) -> Result<()> {
    let Some(error) = controller.last_error() else {
        return Ok(());
    };

    let already_gone = operation == Operation::Delete && error.kind == ErrorKind::NotFound;
    if error.operation == operation && !already_gone {
        debug!("Command failed with {:?}", error.kind);
        return Err(TaskpadError::Other(error.to_string()));
    }

    warn!("{error}");
    eprintln!("Warning: {error}");
    Ok(())
}
