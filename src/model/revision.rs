//! Note revision proxy
//!
//! Revisions are historical snapshots of a note and never change.

use std::sync::Arc;

use serde_json::Value;

use super::note::Note;
use super::params::NoteType;
use super::{entity_identity, Entity, Snapshot};
use crate::error::Result;
use crate::remote::{DispatchChannel, EntityKind};

#[derive(Debug, Clone)]
pub struct NoteRevision {
    id: String,
    snapshot: NoteRevisionSnapshot,
    channel: Arc<DispatchChannel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteRevisionSnapshot(Snapshot);

impl NoteRevisionSnapshot {
    pub fn note_revision_id(&self) -> Result<&str> {
        self.0.get_str("noteRevisionId")
    }

    pub fn note_id(&self) -> Result<&str> {
        self.0.get_str("noteId")
    }

    pub fn note_type(&self) -> Result<NoteType> {
        self.0.get("type")
    }

    pub fn mime(&self) -> Result<&str> {
        self.0.get_str("mime")
    }

    pub fn title(&self) -> Result<&str> {
        self.0.get_str("title")
    }

    pub fn is_protected(&self) -> Result<bool> {
        self.0.get("isProtected")
    }

    pub fn date_last_edited(&self) -> Result<&str> {
        self.0.get_str("dateLastEdited")
    }

    pub fn date_created(&self) -> Result<&str> {
        self.0.get_str("dateCreated")
    }

    pub fn utc_date_last_edited(&self) -> Result<&str> {
        self.0.get_str("utcDateLastEdited")
    }

    pub fn utc_date_created(&self) -> Result<&str> {
        self.0.get_str("utcDateCreated")
    }

    pub fn utc_date_modified(&self) -> Result<&str> {
        self.0.get_str("utcDateModified")
    }

    pub fn raw(&self) -> &Snapshot {
        &self.0
    }
}

impl Entity for NoteRevision {
    const KIND: EntityKind = EntityKind::Revision;
    const ID_FIELD: &'static str = "noteRevisionId";

    fn from_parts(id: String, snapshot: Snapshot, channel: Arc<DispatchChannel>) -> Self {
        Self {
            id,
            snapshot: NoteRevisionSnapshot(snapshot),
            channel,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn raw_snapshot(&self) -> &Snapshot {
        &self.snapshot.0
    }

    fn channel(&self) -> &Arc<DispatchChannel> {
        &self.channel
    }
}

entity_identity!(NoteRevision);

impl NoteRevision {
    pub fn note_revision_id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &NoteRevisionSnapshot {
        &self.snapshot
    }

    /// The note this revision belongs to
    pub fn get_note(&self) -> Result<Option<Note>> {
        self.invoke_entity("getNote", vec![])
    }

    /// Content as it was at this revision
    pub fn get_content(&self) -> Result<Value> {
        Ok(self.invoke("getContent", vec![])?.unwrap_or(Value::Null))
    }

    pub fn is_string_note(&self) -> Result<bool> {
        self.invoke_value("isStringNote", vec![])
    }
}
