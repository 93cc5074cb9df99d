//! Note proxy
//!
//! Content and note-level predicates live here. Attribute operations are in
//! `attributes.rs`, tree navigation in `tree.rs`.

use std::sync::Arc;

use serde_json::{json, Value};

use super::params::NoteType;
use super::revision::NoteRevision;
use super::{entity_identity, Entity, Snapshot};
use crate::error::Result;
use crate::remote::{DispatchChannel, EntityKind};

/// A node of the document tree
#[derive(Debug, Clone)]
pub struct Note {
    id: String,
    snapshot: NoteSnapshot,
    channel: Arc<DispatchChannel>,
}

/// Fields of a note as of fetch time
#[derive(Debug, Clone, PartialEq)]
pub struct NoteSnapshot(Snapshot);

impl NoteSnapshot {
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

    pub fn is_deleted(&self) -> Result<bool> {
        self.0.get("isDeleted")
    }

    pub fn delete_id(&self) -> Result<Option<&str>> {
        self.0.get_str_nullable("deleteId")
    }

    /// Local time, as formatted by the server
    pub fn date_created(&self) -> Result<&str> {
        self.0.get_str("dateCreated")
    }

    pub fn date_modified(&self) -> Result<&str> {
        self.0.get_str("dateModified")
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

impl Entity for Note {
    const KIND: EntityKind = EntityKind::Note;
    const ID_FIELD: &'static str = "noteId";

    fn from_parts(id: String, snapshot: Snapshot, channel: Arc<DispatchChannel>) -> Self {
        Self {
            id,
            snapshot: NoteSnapshot(snapshot),
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

entity_identity!(Note);

impl Note {
    pub fn note_id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &NoteSnapshot {
        &self.snapshot
    }

    /// Look up another note through the api entity
    pub(crate) fn lookup_note(&self, note_id: &str) -> Result<Option<Note>> {
        self.channel
            .call_entity(EntityKind::Api, None, "getNote", vec![json!(note_id)])
    }

    // ============== Content ==============

    pub fn get_content(&self) -> Result<Value> {
        Ok(self.invoke("getContent", vec![])?.unwrap_or(Value::Null))
    }

    /// Content as text. Binary notes come back as something other than a
    /// string and yield `None`.
    pub fn get_text_content(&self) -> Result<Option<String>> {
        match self.get_content()? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// e.g. `{"contentLength": 4, "dateModified": ...}`
    pub fn get_content_metadata(&self) -> Result<Value> {
        Ok(self.invoke("getContentMetadata", vec![])?.unwrap_or(Value::Null))
    }

    /// Content parsed as JSON by the server
    pub fn get_json_content(&self) -> Result<Value> {
        Ok(self.invoke("getJsonContent", vec![])?.unwrap_or(Value::Null))
    }

    pub fn set_content(&self, content: &str) -> Result<()> {
        self.invoke("setContent", vec![json!(content)])?;
        Ok(())
    }

    /// Serialize `content` as JSON and store it
    pub fn set_json_content(&self, content: &Value) -> Result<()> {
        self.invoke("setJsonContent", vec![content.clone()])?;
        Ok(())
    }

    // ============== Predicates ==============

    pub fn is_root(&self) -> Result<bool> {
        self.invoke_value("isRoot", vec![])
    }

    pub fn is_json(&self) -> Result<bool> {
        self.invoke_value("isJson", vec![])
    }

    pub fn is_java_script(&self) -> Result<bool> {
        self.invoke_value("isJavaScript", vec![])
    }

    pub fn is_html(&self) -> Result<bool> {
        self.invoke_value("isHtml", vec![])
    }

    /// True for notes whose content is text rather than binary
    pub fn is_string_note(&self) -> Result<bool> {
        self.invoke_value("isStringNote", vec![])
    }

    /// "frontend", "backend" or null
    pub fn get_script_env(&self) -> Result<Option<String>> {
        self.invoke_value("getScriptEnv", vec![])
    }

    // ============== Revisions ==============

    pub fn get_note_revisions(&self) -> Result<Vec<NoteRevision>> {
        self.invoke_entities("getNoteRevisions", vec![])
    }
}
