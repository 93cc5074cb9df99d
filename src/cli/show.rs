//! `trl show` command
//!
//! # Usage
//! ```bash
//! trl show root
//! trl show Ab12Cd34 --content
//! trl show Ab12Cd34 --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{connect, require_note};
use super::ConnectionArgs;
use crate::model::Note;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Note id
    pub note_id: String,

    /// Also fetch and print the content
    #[arg(long)]
    pub content: bool,

    /// Output format (pretty, json)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

pub fn run(args: ShowArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;
    let note = require_note(&client, &args.note_id)?;

    match args.format.as_str() {
        "json" => print_json(&note, args.content),
        _ => print_pretty(&note, args.content),
    }
}

fn print_pretty(note: &Note, with_content: bool) -> Result<()> {
    let snapshot = note.snapshot();

    println!("{}", snapshot.title()?.bold());
    println!("{}", "─".repeat(40));
    println!("ID:       {}", note.note_id().cyan());
    println!("Type:     {} ({})", snapshot.note_type()?, snapshot.mime()?);
    println!("Created:  {}", snapshot.date_created()?);
    println!("Modified: {}", snapshot.date_modified()?);
    if snapshot.is_protected()? {
        println!("{}", "protected".yellow());
    }

    let branches = note.get_branches()?;
    if !branches.is_empty() {
        let parents = branches
            .iter()
            .map(|b| b.snapshot().parent_note_id().map(str::to_string))
            .collect::<crate::Result<Vec<_>>>()?;
        println!("Parents:  {}", parents.join(", "));
    }

    if with_content {
        println!();
        match note.get_text_content()? {
            Some(text) => println!("{}", text),
            None => println!("{}", "(binary content)".dimmed()),
        }
    }

    Ok(())
}

fn print_json(note: &Note, with_content: bool) -> Result<()> {
    let mut object = note.snapshot().raw().fields().clone();
    if with_content {
        object.insert("content".to_string(), note.get_content()?);
    }
    println!("{}", serde_json::to_string_pretty(&object)?);
    Ok(())
}
