//! Attribute proxy

use std::sync::Arc;

use super::note::Note;
use super::params::AttributeType;
use super::{entity_identity, Entity, Snapshot};
use crate::error::Result;
use crate::remote::{DispatchChannel, EntityKind};

/// A label or relation owned by one note
#[derive(Debug, Clone)]
pub struct Attribute {
    id: String,
    snapshot: AttributeSnapshot,
    channel: Arc<DispatchChannel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSnapshot(Snapshot);

impl AttributeSnapshot {
    pub fn attribute_id(&self) -> Result<&str> {
        self.0.get_str("attributeId")
    }

    /// Owning note
    pub fn note_id(&self) -> Result<&str> {
        self.0.get_str("noteId")
    }

    pub fn attribute_type(&self) -> Result<AttributeType> {
        self.0.get("type")
    }

    pub fn name(&self) -> Result<&str> {
        self.0.get_str("name")
    }

    /// Free text for labels, target noteId for relations
    pub fn value(&self) -> Result<&str> {
        self.0.get_str("value")
    }

    pub fn position(&self) -> Result<i64> {
        self.0.get("position")
    }

    pub fn is_inheritable(&self) -> Result<bool> {
        self.0.get("isInheritable")
    }

    pub fn is_deleted(&self) -> Result<bool> {
        self.0.get("isDeleted")
    }

    pub fn delete_id(&self) -> Result<Option<&str>> {
        self.0.get_str_nullable("deleteId")
    }

    pub fn utc_date_modified(&self) -> Result<&str> {
        self.0.get_str("utcDateModified")
    }

    pub fn raw(&self) -> &Snapshot {
        &self.0
    }
}

impl Entity for Attribute {
    const KIND: EntityKind = EntityKind::Attribute;
    const ID_FIELD: &'static str = "attributeId";

    fn from_parts(id: String, snapshot: Snapshot, channel: Arc<DispatchChannel>) -> Self {
        Self {
            id,
            snapshot: AttributeSnapshot(snapshot),
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

entity_identity!(Attribute);

impl Attribute {
    pub fn attribute_id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &AttributeSnapshot {
        &self.snapshot
    }

    /// Owning note
    pub fn get_note(&self) -> Result<Option<Note>> {
        self.invoke_entity("getNote", vec![])
    }

    /// Relation target. `None` for labels and for targets that no longer
    /// exist.
    pub fn get_target_note(&self) -> Result<Option<Note>> {
        self.invoke_entity("getTargetNote", vec![])
    }

    /// True for promoted-attribute definitions (`label:*` / `relation:*`)
    pub fn is_definition(&self) -> Result<bool> {
        self.invoke_value("isDefinition", vec![])
    }
}
