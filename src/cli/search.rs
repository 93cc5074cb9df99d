//! `trl search` command
//!
//! # Usage
//! ```bash
//! trl search "#todo"
//! trl search "meeting" --ancestor Ab12Cd34 --limit 5
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::connect;
use super::ConnectionArgs;
use crate::model::{Note, SearchParams};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search expression (full text and/or attribute filters)
    pub query: String,

    /// Maximum results (default from config)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only search below this note
    #[arg(long)]
    pub ancestor: Option<String>,

    /// Skip content search
    #[arg(long)]
    pub fast: bool,

    /// Include archived notes
    #[arg(long)]
    pub archived: bool,

    /// Output format (pretty, json, compact)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

pub fn run(args: SearchArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, config) = connect(connection)?;

    let params = SearchParams {
        limit: Some(args.limit.unwrap_or(config.search.default_limit)),
        ancestor_note_id: args.ancestor.clone(),
        fast_search: args.fast.then_some(true),
        include_archived_notes: args.archived.then_some(true),
        ..Default::default()
    };

    let notes = client.search_for_notes(&args.query, Some(&params))?;

    match args.format.as_str() {
        "json" => print_json(&notes),
        "compact" => print_compact(&notes),
        _ => print_pretty(&notes, &args.query),
    }
}

fn print_pretty(notes: &[Note], query: &str) -> Result<()> {
    if notes.is_empty() {
        println!("No notes match '{}'.", query);
        return Ok(());
    }

    println!("{} results for {}", notes.len(), query.cyan());
    println!("{}", "─".repeat(60));

    for note in notes {
        let snapshot = note.snapshot();
        println!(
            "{}  {} {}",
            note.note_id().dimmed(),
            snapshot.title()?,
            format!("[{}]", snapshot.note_type()?).dimmed()
        );
    }
    Ok(())
}

fn print_compact(notes: &[Note]) -> Result<()> {
    for note in notes {
        println!("{} | {}", note.note_id(), note.snapshot().title()?);
    }
    Ok(())
}

fn print_json(notes: &[Note]) -> Result<()> {
    let snapshots: Vec<_> = notes.iter().map(|n| n.snapshot().raw().fields()).collect();
    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
