//! Branch proxy
//!
//! A branch places a note under one parent. A note with several branches
//! appears in several places in the tree. `noteId` and `parentNoteId` never
//! change; moving a note means deleting the branch and creating another.

use std::sync::Arc;

use serde_json::json;

use super::note::Note;
use super::{entity_identity, Entity, Snapshot};
use crate::error::Result;
use crate::remote::{DispatchChannel, EntityKind};

#[derive(Debug, Clone)]
pub struct Branch {
    id: String,
    snapshot: BranchSnapshot,
    channel: Arc<DispatchChannel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchSnapshot(Snapshot);

impl BranchSnapshot {
    pub fn branch_id(&self) -> Result<&str> {
        self.0.get_str("branchId")
    }

    pub fn note_id(&self) -> Result<&str> {
        self.0.get_str("noteId")
    }

    pub fn parent_note_id(&self) -> Result<&str> {
        self.0.get_str("parentNoteId")
    }

    /// Sort key among siblings
    pub fn note_position(&self) -> Result<i64> {
        self.0.get("notePosition")
    }

    /// Text shown before the title in this placement
    pub fn prefix(&self) -> Result<Option<&str>> {
        self.0.get_str_nullable("prefix")
    }

    pub fn is_expanded(&self) -> Result<bool> {
        self.0.get("isExpanded")
    }

    pub fn is_deleted(&self) -> Result<bool> {
        self.0.get("isDeleted")
    }

    pub fn delete_id(&self) -> Result<Option<&str>> {
        self.0.get_str_nullable("deleteId")
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

impl Entity for Branch {
    const KIND: EntityKind = EntityKind::Branch;
    const ID_FIELD: &'static str = "branchId";

    fn from_parts(id: String, snapshot: Snapshot, channel: Arc<DispatchChannel>) -> Self {
        Self {
            id,
            snapshot: BranchSnapshot(snapshot),
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

entity_identity!(Branch);

impl Branch {
    pub fn branch_id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &BranchSnapshot {
        &self.snapshot
    }

    /// The placed note, fetched fresh
    pub fn get_note(&self) -> Result<Option<Note>> {
        let note_id = self.snapshot.note_id()?;
        self.channel
            .call_entity(EntityKind::Api, None, "getNote", vec![json!(note_id)])
    }

    /// The parent note, fetched fresh
    pub fn get_parent_note(&self) -> Result<Option<Note>> {
        let parent_id = self.snapshot.parent_note_id()?;
        self.channel
            .call_entity(EntityKind::Api, None, "getNote", vec![json!(parent_id)])
    }
}
