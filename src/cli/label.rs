//! `trl label` command
//!
//! # Usage
//! ```bash
//! trl label Ab12Cd34 set priority high
//! trl label Ab12Cd34 add tag rust --inheritable
//! trl label Ab12Cd34 toggle archived --off
//! trl label Ab12Cd34 remove priority
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::utils::{connect, require_note};
use super::ConnectionArgs;
use crate::model::{AttributeType, DEFAULT_ATTRIBUTE_POSITION};

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Note id
    pub note_id: String,

    #[command(subcommand)]
    pub command: LabelCommands,
}

#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Create the label or replace its value
    Set {
        name: String,
        value: Option<String>,
    },

    /// Add another label, even if one with this name exists
    Add {
        name: String,
        value: Option<String>,

        /// Let descendants inherit the label
        #[arg(long)]
        inheritable: bool,

        /// Sort position among the note's attributes
        #[arg(long, default_value_t = DEFAULT_ATTRIBUTE_POSITION)]
        position: i64,
    },

    /// Add the label if missing (--off removes it)
    Toggle {
        name: String,
        value: Option<String>,

        #[arg(long)]
        off: bool,
    },

    /// Remove the label; no error if absent
    Remove {
        name: String,
        value: Option<String>,
    },
}

pub fn run(args: LabelArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;
    let note = require_note(&client, &args.note_id)?;

    match &args.command {
        LabelCommands::Set { name, value } => {
            note.set_label(name, value.as_deref())?;
            println!("{} Set #{} on {}", "✓".green(), name, note.note_id());
        }
        LabelCommands::Add {
            name,
            value,
            inheritable,
            position,
        } => {
            let added = note.add_attribute(
                AttributeType::Label,
                name,
                value.as_deref().unwrap_or(""),
                *inheritable,
                *position,
            )?;
            let id = added.as_ref().map(|a| a.attribute_id()).unwrap_or("?");
            println!("{} Added #{} ({}) to {}", "✓".green(), name, id, note.note_id());
        }
        LabelCommands::Toggle { name, value, off } => {
            note.toggle_label(!off, name, value.as_deref())?;
            let state = if *off { "off" } else { "on" };
            println!("{} Toggled #{} {} on {}", "✓".green(), name, state, note.note_id());
        }
        LabelCommands::Remove { name, value } => {
            note.remove_label(name, value.as_deref())?;
            println!("{} Removed #{} from {}", "✓".green(), name, note.note_id());
        }
    }

    Ok(())
}
