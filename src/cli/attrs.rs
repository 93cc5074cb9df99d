//! `trl attrs` command
//!
//! Lists attributes as a table. Inherited rows are marked by their owning
//! note differing from the inspected one.

use anyhow::Result;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::{connect, require_note};
use super::ConnectionArgs;
use crate::model::{Attribute, AttributeType};

#[derive(Args, Debug)]
pub struct AttrsArgs {
    /// Note id
    pub note_id: String,

    /// Only attributes attached to the note itself
    #[arg(long)]
    pub owned: bool,

    /// Only labels or only relations
    #[arg(short = 't', long = "type")]
    pub attribute_type: Option<AttributeType>,

    /// Only attributes with this name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Inheritable")]
    inheritable: bool,
    #[tabled(rename = "Owner")]
    owner: String,
}

impl AttributeRow {
    fn from_attribute(attribute: &Attribute) -> crate::Result<Self> {
        let snapshot = attribute.snapshot();
        Ok(Self {
            kind: snapshot.attribute_type()?.to_string(),
            name: snapshot.name()?.to_string(),
            value: snapshot.value()?.to_string(),
            inheritable: snapshot.is_inheritable()?,
            owner: snapshot.note_id()?.to_string(),
        })
    }
}

pub fn run(args: AttrsArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;
    let note = require_note(&client, &args.note_id)?;

    let attributes = if args.owned {
        note.get_owned_attributes(args.attribute_type, args.name.as_deref())?
    } else {
        note.get_attributes(args.attribute_type, args.name.as_deref())?
    };

    if attributes.is_empty() {
        println!("No attributes.");
        return Ok(());
    }

    let rows = attributes
        .iter()
        .map(AttributeRow::from_attribute)
        .collect::<crate::Result<Vec<_>>>()?;

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}
