//! Client facade
//!
//! Calls routed to the `api` entity kind: lookups, search, note creation,
//! tree placement and app info. Calendar helpers are in `calendar.rs`, the
//! SQL passthrough in `sql.rs`.
//!
//! # Example
//! ```no_run
//! use trilium_remote::{ClientContext, TriliumClient};
//!
//! let context = ClientContext::new("http://localhost:8080/custom/trilium-client", "123");
//! let client = TriliumClient::connect(&context).unwrap();
//! let root = client.get_note("root").unwrap().unwrap();
//! println!("{}", root.snapshot().title().unwrap());
//! ```

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, TriliumError};
use crate::model::{Attribute, Branch, CreateNoteParams, Entity, Note, SearchParams};
use crate::remote::{ClientContext, DispatchChannel, EntityKind, Transport};

mod calendar;
mod sql;

pub use sql::Sql;

/// Entry point to one server
#[derive(Debug, Clone)]
pub struct TriliumClient {
    channel: Arc<DispatchChannel>,
}

/// `{note, branch}` as returned by the creation calls
#[derive(Debug, Deserialize)]
struct CreatedNote {
    note: Value,
    branch: Value,
}

impl TriliumClient {
    /// Client over HTTP
    pub fn connect(context: &ClientContext) -> Result<Self> {
        Ok(Self::from_channel(DispatchChannel::connect(context)?))
    }

    /// Client over a caller-supplied transport
    pub fn with_transport(context: &ClientContext, transport: impl Transport + 'static) -> Self {
        Self::from_channel(DispatchChannel::with_transport(context, transport))
    }

    pub fn from_channel(channel: DispatchChannel) -> Self {
        Self {
            channel: Arc::new(channel),
        }
    }

    pub fn channel(&self) -> &Arc<DispatchChannel> {
        &self.channel
    }

    pub fn sql(&self) -> Sql {
        Sql::new(Arc::clone(&self.channel))
    }

    fn request(&self, method: &str, args: Vec<Value>) -> Result<Option<Value>> {
        self.channel.call(EntityKind::Api, None, method, args)
    }

    fn request_value<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T> {
        self.channel.call_value(EntityKind::Api, None, method, args)
    }

    fn request_entity<E: Entity>(&self, method: &str, args: Vec<Value>) -> Result<Option<E>> {
        self.channel.call_entity(EntityKind::Api, None, method, args)
    }

    fn request_entities<E: Entity>(&self, method: &str, args: Vec<Value>) -> Result<Vec<E>> {
        self.channel.call_entities(EntityKind::Api, None, method, args)
    }

    fn request_created(&self, method: &str, args: Vec<Value>) -> Result<(Note, Branch)> {
        let value = self.request(method, args)?.ok_or_else(|| TriliumError::UnexpectedShape {
            method: method.to_string(),
            detail: "empty response".to_string(),
        })?;
        let created: CreatedNote =
            serde_json::from_value(value).map_err(|e| TriliumError::UnexpectedShape {
                method: method.to_string(),
                detail: e.to_string(),
            })?;

        Ok((
            Note::from_value(created.note, Arc::clone(&self.channel))?,
            Branch::from_value(created.branch, Arc::clone(&self.channel))?,
        ))
    }

    // ============== Context ==============

    /// Note the running script starts from
    pub fn start_note(&self) -> Result<Option<Note>> {
        self.request_entity("startNote", vec![])
    }

    /// Note currently active in the script context
    pub fn current_note(&self) -> Result<Option<Note>> {
        self.request_entity("currentNote", vec![])
    }

    /// Entity whose change triggered the script, if any (shape varies)
    pub fn origin_entity(&self) -> Result<Option<Value>> {
        match self.request("originEntity", vec![])? {
            None | Some(Value::Null) => Ok(None),
            Some(entity) => Ok(Some(entity)),
        }
    }

    /// Instance name from the server's config, useful to single out one
    /// instance of a synced setup
    pub fn get_instance_name(&self) -> Result<Option<String>> {
        self.request_value("getInstanceName", vec![])
    }

    /// `{appVersion, dbVersion, syncVersion, buildDate, ...}`
    pub fn get_app_info(&self) -> Result<Value> {
        Ok(self.request("getAppInfo", vec![])?.unwrap_or(Value::Null))
    }

    /// Write a line to the server's script log
    pub fn log(&self, message: &str) -> Result<()> {
        self.request("log", vec![json!(message)])?;
        Ok(())
    }

    // ============== Lookups ==============

    pub fn get_note(&self, note_id: &str) -> Result<Option<Note>> {
        self.request_entity("getNote", vec![json!(note_id)])
    }

    pub fn get_branch(&self, branch_id: &str) -> Result<Option<Branch>> {
        self.request_entity("getBranch", vec![json!(branch_id)])
    }

    pub fn get_attribute(&self, attribute_id: &str) -> Result<Option<Attribute>> {
        self.request_entity("getAttribute", vec![json!(attribute_id)])
    }

    // ============== Search ==============

    /// Notes matching a search expression such as
    /// `#dateModified =* MONTH AND #log`, in server ranking order
    pub fn search_for_notes(&self, query: &str, params: Option<&SearchParams>) -> Result<Vec<Note>> {
        let mut args = vec![json!(query)];
        if let Some(params) = params {
            args.push(serde_json::to_value(params)?);
        }
        self.request_entities("searchForNotes", args)
    }

    /// First match of a search expression
    pub fn search_for_note(&self, query: &str) -> Result<Option<Note>> {
        self.request_entity("searchForNote", vec![json!(query)])
    }

    pub fn get_notes_with_label(&self, name: &str, value: Option<&str>) -> Result<Vec<Note>> {
        self.request_entities("getNotesWithLabel", label_args(name, value))
    }

    pub fn get_note_with_label(&self, name: &str, value: Option<&str>) -> Result<Option<Note>> {
        self.request_entity("getNoteWithLabel", label_args(name, value))
    }

    // ============== Placement ==============

    /// Create a branch for `note_id` under `parent_note_id` unless one exists
    pub fn ensure_note_is_present_in_parent(
        &self,
        note_id: &str,
        parent_note_id: &str,
        prefix: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request(
            "ensureNoteIsPresentInParent",
            vec![json!(note_id), json!(parent_note_id), json!(prefix)],
        )
    }

    /// Delete the branch of `note_id` under `parent_note_id` if present. A
    /// note losing its last branch is deleted by the server.
    pub fn ensure_note_is_absent_from_parent(
        &self,
        note_id: &str,
        parent_note_id: &str,
    ) -> Result<()> {
        self.request(
            "ensureNoteIsAbsentFromParent",
            vec![json!(note_id), json!(parent_note_id)],
        )?;
        Ok(())
    }

    pub fn toggle_note_in_parent(
        &self,
        present: bool,
        note_id: &str,
        parent_note_id: &str,
        prefix: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request(
            "toggleNoteInParent",
            vec![json!(present), json!(note_id), json!(parent_note_id), json!(prefix)],
        )
    }

    /// Sort children of `parent_note_id` by title
    pub fn sort_notes_alphabetically(&self, parent_note_id: &str) -> Result<()> {
        self.request("sortNotesAlphabetically", vec![json!(parent_note_id)])?;
        Ok(())
    }

    // ============== Creation ==============

    /// Create a text note; returns the note and its branch
    pub fn create_text_note(
        &self,
        parent_note_id: &str,
        title: &str,
        content: &str,
    ) -> Result<(Note, Branch)> {
        self.request_created(
            "createTextNote",
            vec![json!(parent_note_id), json!(title), json!(content)],
        )
    }

    /// Create a code note with JSON mime
    pub fn create_data_note(
        &self,
        parent_note_id: &str,
        title: &str,
        content: &Value,
    ) -> Result<(Note, Branch)> {
        self.request_created(
            "createDataNote",
            vec![json!(parent_note_id), json!(title), content.clone()],
        )
    }

    pub fn create_new_note(&self, params: &CreateNoteParams) -> Result<(Note, Branch)> {
        self.request_created("createNewNote", vec![serde_json::to_value(params)?])
    }
}

/// `[name]` or `[name, value]`
fn label_args(name: &str, value: Option<&str>) -> Vec<Value> {
    let mut args = vec![json!(name)];
    if let Some(value) = value {
        args.push(json!(value));
    }
    args
}
