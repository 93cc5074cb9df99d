//! `trl paths` and `trl tree` commands

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{connect, require_note};
use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Note id
    pub note_id: String,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Note id to start from
    #[arg(default_value = "root")]
    pub note_id: String,
}

pub fn run_paths(args: PathsArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;
    let note = require_note(&client, &args.note_id)?;

    let paths = note.get_all_note_paths()?;
    if paths.is_empty() {
        println!("No paths (deleted or detached note).");
        return Ok(());
    }

    for path in &paths {
        println!("{}", path.to_string().cyan());
    }

    Ok(())
}

pub fn run_tree(args: TreeArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;
    let note = require_note(&client, &args.note_id)?;

    let ids = note.get_descendant_note_ids()?;
    println!(
        "{} {}",
        ids.len().to_string().bold(),
        "notes (including start)".dimmed()
    );
    for id in ids {
        println!("{}", id);
    }

    Ok(())
}
