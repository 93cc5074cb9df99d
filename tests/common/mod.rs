//! In-memory stand-in for the scripting endpoint
//!
//! Implements enough of the backend API (notes, branches, attributes with
//! inheritance, content, paths) to drive the client end to end without a
//! server. Plugged in through the `Transport` seam.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use trilium_remote::remote::{Envelope, RawResponse};
use trilium_remote::{
    ClientContext, EntityKind, Transport, TriliumClient, DEFAULT_ATTRIBUTE_POSITION,
};

pub const TOKEN: &str = "123";

#[derive(Debug, Clone)]
struct NoteRec {
    note_id: String,
    title: String,
    note_type: String,
    mime: String,
    content: String,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct BranchRec {
    branch_id: String,
    note_id: String,
    parent_note_id: String,
    note_position: i64,
    prefix: Option<String>,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct AttrRec {
    attribute_id: String,
    note_id: String,
    attr_type: String,
    name: String,
    value: String,
    position: i64,
    is_inheritable: bool,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct RevisionRec {
    note_revision_id: String,
    note_id: String,
    title: String,
    content: String,
}

#[derive(Debug, Default)]
struct State {
    notes: BTreeMap<String, NoteRec>,
    branches: Vec<BranchRec>,
    attributes: Vec<AttrRec>,
    revisions: Vec<RevisionRec>,
    next_id: u64,
    calls: Vec<Envelope>,
}

type Reply = Result<Option<Value>, (u16, String)>;

fn fail(message: impl Into<String>) -> (u16, String) {
    (500, message.into())
}

fn arg_str(args: &[Value], index: usize) -> Option<String> {
    args.get(index).and_then(|v| v.as_str()).map(str::to_string)
}

fn arg_bool(args: &[Value], index: usize) -> bool {
    args.get(index).and_then(Value::as_bool).unwrap_or(false)
}

/// Fake server handle; clones share state
#[derive(Debug, Clone)]
pub struct FakeTrilium {
    state: Arc<Mutex<State>>,
}

impl FakeTrilium {
    pub fn new() -> Self {
        let mut state = State::default();
        state.notes.insert(
            "root".to_string(),
            NoteRec {
                note_id: "root".to_string(),
                title: "root".to_string(),
                note_type: "text".to_string(),
                mime: "text/html".to_string(),
                content: String::new(),
                is_deleted: false,
            },
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Client wired to this fake
    pub fn client(&self) -> TriliumClient {
        let context = ClientContext::new("http://fake/custom/trilium-client", TOKEN);
        TriliumClient::with_transport(&context, self.clone())
    }

    /// Every envelope received so far
    pub fn calls(&self) -> Vec<Envelope> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Place `note_id` under `parent_note_id` directly, bypassing the API.
    /// Lets tests build shapes the server would refuse, such as cycles.
    pub fn insert_branch(&self, note_id: &str, parent_note_id: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let branch_id = state.new_id("b");
        state.branches.push(BranchRec {
            branch_id: branch_id.clone(),
            note_id: note_id.to_string(),
            parent_note_id: parent_note_id.to_string(),
            note_position: 10,
            prefix: None,
            is_deleted: false,
        });
        branch_id
    }

    /// Snapshot the note's current title and content as a revision
    pub fn add_revision(&self, note_id: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let note_revision_id = state.new_id("r");
        let note = state.notes[note_id].clone();
        state.revisions.push(RevisionRec {
            note_revision_id: note_revision_id.clone(),
            note_id: note.note_id,
            title: note.title,
            content: note.content,
        });
        note_revision_id
    }

    /// Mark a note deleted without touching its branches
    pub fn delete_note(&self, note_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(note) = state.notes.get_mut(note_id) {
            note.is_deleted = true;
        }
    }

    /// Owned, non-deleted attributes of a note as `(type, name, value)`
    pub fn owned(&self, note_id: &str) -> Vec<(String, String, String)> {
        let state = self.state.lock().unwrap();
        let owned = state
            .owned_attrs(note_id, None, None)
            .into_iter()
            .map(|a| (a.attr_type.clone(), a.name.clone(), a.value.clone()))
            .collect();
        owned
    }

    fn handle(&self, envelope: &Envelope) -> Reply {
        let mut state = self.state.lock().unwrap();
        state.calls.push(envelope.clone());

        if envelope.token != TOKEN {
            return Err((401, "Unauthorized".to_string()));
        }

        let args = &envelope.args;
        match envelope.objtype {
            EntityKind::Api => state.api(&envelope.method_name, args),
            EntityKind::Note => {
                let note_id = envelope.objid.clone().unwrap_or_default();
                if !state.notes.contains_key(&note_id) {
                    return Err(fail(format!("Note '{}' not found", note_id)));
                }
                state.note(&note_id, &envelope.method_name, args)
            }
            EntityKind::Branch => {
                let branch_id = envelope.objid.clone().unwrap_or_default();
                match envelope.method_name.as_str() {
                    "getNote" => {
                        let note_id = state
                            .branch(&branch_id)
                            .map(|b| b.note_id.clone())
                            .ok_or_else(|| fail("Branch not found"))?;
                        Ok(Some(state.note_json_or_null(&note_id)))
                    }
                    other => Err(fail(format!("Unknown branch method {}", other))),
                }
            }
            EntityKind::Attribute => {
                let attribute_id = envelope.objid.clone().unwrap_or_default();
                let attr = state
                    .attributes
                    .iter()
                    .find(|a| a.attribute_id == attribute_id)
                    .cloned()
                    .ok_or_else(|| fail("Attribute not found"))?;
                match envelope.method_name.as_str() {
                    "getNote" => Ok(Some(state.note_json_or_null(&attr.note_id))),
                    "getTargetNote" if attr.attr_type == "relation" => {
                        Ok(Some(state.note_json_or_null(&attr.value)))
                    }
                    "getTargetNote" => Ok(Some(Value::Null)),
                    "isDefinition" => Ok(Some(json!(attr.name.contains(':')))),
                    other => Err(fail(format!("Unknown attribute method {}", other))),
                }
            }
            EntityKind::Sql => match envelope.method_name.as_str() {
                "getRows" => Ok(Some(json!([{"noteId": "root", "title": "root"}]))),
                "execute" => Ok(Some(json!({"changes": 0}))),
                other => Err(fail(format!("Unknown sql method {}", other))),
            },
            EntityKind::Revision => {
                let revision_id = envelope.objid.clone().unwrap_or_default();
                let revision = state
                    .revisions
                    .iter()
                    .find(|r| r.note_revision_id == revision_id)
                    .cloned()
                    .ok_or_else(|| fail(format!("Revision '{}' not found", revision_id)))?;
                match envelope.method_name.as_str() {
                    "getNote" => Ok(Some(state.note_json_or_null(&revision.note_id))),
                    "getContent" => Ok(Some(json!(revision.content))),
                    "isStringNote" => Ok(Some(json!(true))),
                    other => Err(fail(format!("Unknown revision method {}", other))),
                }
            }
        }
    }
}

impl Transport for FakeTrilium {
    fn send(&self, envelope: &Envelope) -> trilium_remote::Result<RawResponse> {
        Ok(match self.handle(envelope) {
            Ok(None) => RawResponse::empty(),
            Ok(Some(value)) => RawResponse::json(&value),
            Err((status, body)) => RawResponse::new(status, body),
        })
    }
}

impl State {
    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{:04}", prefix, self.next_id)
    }

    // ============== Lookups ==============

    fn live_note(&self, note_id: &str) -> Option<&NoteRec> {
        self.notes.get(note_id).filter(|n| !n.is_deleted)
    }

    fn branch(&self, branch_id: &str) -> Option<&BranchRec> {
        self.branches.iter().find(|b| b.branch_id == branch_id)
    }

    fn parent_branches(&self, note_id: &str) -> Vec<&BranchRec> {
        self.branches
            .iter()
            .filter(|b| b.note_id == note_id && !b.is_deleted)
            .collect()
    }

    fn child_branches(&self, note_id: &str) -> Vec<&BranchRec> {
        let mut children: Vec<&BranchRec> = self
            .branches
            .iter()
            .filter(|b| b.parent_note_id == note_id && !b.is_deleted)
            .collect();
        children.sort_by_key(|b| b.note_position);
        children
    }

    fn owned_attrs(&self, note_id: &str, attr_type: Option<&str>, name: Option<&str>) -> Vec<&AttrRec> {
        let mut attrs: Vec<&AttrRec> = self
            .attributes
            .iter()
            .filter(|a| a.note_id == note_id && !a.is_deleted)
            .filter(|a| attr_type.map_or(true, |t| a.attr_type == t))
            .filter(|a| name.map_or(true, |n| a.name == n))
            .collect();
        attrs.sort_by_key(|a| a.position);
        attrs
    }

    /// Ancestors through live branches, nearest first, each once
    fn ancestors(&self, note_id: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut queue = vec![note_id.to_string()];
        let mut out = Vec::new();
        while let Some(current) = queue.pop() {
            for branch in self.parent_branches(&current) {
                if seen.insert(branch.parent_note_id.clone()) {
                    out.push(branch.parent_note_id.clone());
                    queue.push(branch.parent_note_id.clone());
                }
            }
        }
        out
    }

    fn effective_attrs(&self, note_id: &str, attr_type: Option<&str>, name: Option<&str>) -> Vec<&AttrRec> {
        let mut attrs = self.owned_attrs(note_id, attr_type, name);
        for ancestor in self.ancestors(note_id) {
            attrs.extend(
                self.owned_attrs(&ancestor, attr_type, name)
                    .into_iter()
                    .filter(|a| a.is_inheritable),
            );
        }
        attrs
    }

    fn all_paths(&self, note_id: &str, depth: usize) -> Vec<Vec<String>> {
        if note_id == "root" {
            return vec![vec!["root".to_string()]];
        }
        if depth > 64 {
            return Vec::new();
        }
        let mut paths = Vec::new();
        for branch in self.parent_branches(note_id) {
            for mut path in self.all_paths(&branch.parent_note_id, depth + 1) {
                path.push(note_id.to_string());
                paths.push(path);
            }
        }
        paths
    }

    // ============== JSON ==============

    fn note_json(note: &NoteRec) -> Value {
        json!({
            "noteId": note.note_id,
            "type": note.note_type,
            "mime": note.mime,
            "title": note.title,
            "isProtected": false,
            "isDeleted": note.is_deleted,
            "deleteId": null,
            "dateCreated": "2021-03-01 10:00:00.000+0100",
            "dateModified": "2021-03-01 10:00:00.000+0100",
            "utcDateCreated": "2021-03-01 09:00:00.000Z",
            "utcDateModified": "2021-03-01 09:00:00.000Z",
        })
    }

    fn note_json_or_null(&self, note_id: &str) -> Value {
        self.live_note(note_id).map(Self::note_json).unwrap_or(Value::Null)
    }

    fn branch_json(branch: &BranchRec) -> Value {
        json!({
            "branchId": branch.branch_id,
            "noteId": branch.note_id,
            "parentNoteId": branch.parent_note_id,
            "notePosition": branch.note_position,
            "prefix": branch.prefix,
            "isExpanded": false,
            "isDeleted": branch.is_deleted,
            "deleteId": null,
            "utcDateCreated": "2021-03-01 09:00:00.000Z",
            "utcDateModified": "2021-03-01 09:00:00.000Z",
        })
    }

    fn attr_json(attr: &AttrRec) -> Value {
        json!({
            "attributeId": attr.attribute_id,
            "noteId": attr.note_id,
            "type": attr.attr_type,
            "name": attr.name,
            "value": attr.value,
            "position": attr.position,
            "isInheritable": attr.is_inheritable,
            "isDeleted": attr.is_deleted,
            "deleteId": null,
            "utcDateModified": "2021-03-01 09:00:00.000Z",
        })
    }

    fn revision_json(revision: &RevisionRec) -> Value {
        json!({
            "noteRevisionId": revision.note_revision_id,
            "noteId": revision.note_id,
            "type": "text",
            "mime": "text/html",
            "title": revision.title,
            "isProtected": false,
            "dateLastEdited": "2021-03-01 10:00:00.000+0100",
            "dateCreated": "2021-03-01 10:00:00.000+0100",
            "utcDateLastEdited": "2021-03-01 09:00:00.000Z",
            "utcDateCreated": "2021-03-01 09:00:00.000Z",
            "utcDateModified": "2021-03-01 09:00:00.000Z",
        })
    }

    fn attrs_json(attrs: &[&AttrRec]) -> Value {
        Value::Array(attrs.iter().map(|a| Self::attr_json(a)).collect())
    }

    // ============== Mutations ==============

    fn create_note(
        &mut self,
        parent_note_id: &str,
        title: &str,
        content: &str,
        note_type: &str,
        mime: &str,
        prefix: Option<String>,
    ) -> Reply {
        if self.live_note(parent_note_id).is_none() {
            return Err(fail(format!("Parent note '{}' not found", parent_note_id)));
        }
        let note_id = self.new_id("n");
        let note = NoteRec {
            note_id: note_id.clone(),
            title: title.to_string(),
            note_type: note_type.to_string(),
            mime: mime.to_string(),
            content: content.to_string(),
            is_deleted: false,
        };
        let position = self
            .child_branches(parent_note_id)
            .iter()
            .map(|b| b.note_position)
            .max()
            .unwrap_or(0)
            + 10;
        let branch = BranchRec {
            branch_id: self.new_id("b"),
            note_id: note_id.clone(),
            parent_note_id: parent_note_id.to_string(),
            note_position: position,
            prefix,
            is_deleted: false,
        };
        let reply = json!({"note": Self::note_json(&note), "branch": Self::branch_json(&branch)});
        self.notes.insert(note_id, note);
        self.branches.push(branch);
        Ok(Some(reply))
    }

    fn add_attr(
        &mut self,
        note_id: &str,
        attr_type: &str,
        name: &str,
        value: &str,
        is_inheritable: bool,
        position: i64,
    ) -> Value {
        let attr = AttrRec {
            attribute_id: self.new_id("a"),
            note_id: note_id.to_string(),
            attr_type: attr_type.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            position,
            is_inheritable,
            is_deleted: false,
        };
        let json = Self::attr_json(&attr);
        self.attributes.push(attr);
        json
    }

    fn remove_attrs(&mut self, note_id: &str, attr_type: &str, name: &str, value: Option<&str>) {
        for attr in self.attributes.iter_mut() {
            if attr.note_id == note_id
                && !attr.is_deleted
                && attr.attr_type == attr_type
                && attr.name == name
                && value.map_or(true, |v| attr.value == v)
            {
                attr.is_deleted = true;
            }
        }
    }

    fn set_attr(&mut self, note_id: &str, attr_type: &str, name: &str, value: &str) {
        let mut kept = false;
        for attr in self.attributes.iter_mut() {
            if attr.note_id == note_id
                && !attr.is_deleted
                && attr.attr_type == attr_type
                && attr.name == name
            {
                if kept {
                    attr.is_deleted = true;
                } else {
                    attr.value = value.to_string();
                    kept = true;
                }
            }
        }
        if !kept {
            self.add_attr(note_id, attr_type, name, value, false, DEFAULT_ATTRIBUTE_POSITION);
        }
    }

    // ============== Dispatch ==============

    fn api(&mut self, method: &str, args: &[Value]) -> Reply {
        match method {
            "getNote" => {
                let note_id = arg_str(args, 0).unwrap_or_default();
                Ok(Some(self.note_json_or_null(&note_id)))
            }
            "getBranch" => {
                let branch_id = arg_str(args, 0).unwrap_or_default();
                Ok(Some(
                    self.branch(&branch_id)
                        .map(Self::branch_json)
                        .unwrap_or(Value::Null),
                ))
            }
            "getAttribute" => {
                let attribute_id = arg_str(args, 0).unwrap_or_default();
                Ok(Some(
                    self.attributes
                        .iter()
                        .find(|a| a.attribute_id == attribute_id && !a.is_deleted)
                        .map(Self::attr_json)
                        .unwrap_or(Value::Null),
                ))
            }
            "startNote" | "currentNote" => Ok(Some(self.note_json_or_null("root"))),
            "getRootCalendarNote" | "getDateNote" | "getTodayNote" | "getWeekNote"
            | "getMonthNote" | "getYearNote" => {
                let title = arg_str(args, 0).unwrap_or_else(|| method.to_string());
                let existing = self
                    .notes
                    .values()
                    .find(|n| !n.is_deleted && n.title == title)
                    .map(Self::note_json);
                match existing {
                    Some(note) => Ok(Some(note)),
                    None => {
                        let created = self.create_note("root", &title, "", "text", "text/html", None)?;
                        Ok(created.map(|reply| reply["note"].clone()))
                    }
                }
            }
            "toggleNoteInParent" => {
                let present = arg_bool(args, 0);
                let method = if present {
                    "ensureNoteIsPresentInParent"
                } else {
                    "ensureNoteIsAbsentFromParent"
                };
                self.api(method, &args[1..])
            }
            "sortNotesAlphabetically" => {
                let parent = arg_str(args, 0).unwrap_or_default();
                let mut children: Vec<(String, String)> = self
                    .child_branches(&parent)
                    .iter()
                    .map(|b| (self.notes[&b.note_id].title.clone(), b.branch_id.clone()))
                    .collect();
                children.sort();
                for (index, (_, branch_id)) in children.into_iter().enumerate() {
                    if let Some(branch) =
                        self.branches.iter_mut().find(|b| b.branch_id == branch_id)
                    {
                        branch.note_position = (index as i64 + 1) * 10;
                    }
                }
                Ok(None)
            }
            "originEntity" => Ok(Some(Value::Null)),
            "getAppInfo" => Ok(Some(json!({"appVersion": "0.47.5", "dbVersion": 184}))),
            "getNotesWithLabel" | "getNoteWithLabel" => {
                let name = arg_str(args, 0).unwrap_or_default();
                let value = arg_str(args, 1);
                let mut ids: Vec<String> = self
                    .attributes
                    .iter()
                    .filter(|a| !a.is_deleted && a.attr_type == "label" && a.name == name)
                    .filter(|a| value.as_deref().map_or(true, |v| a.value == v))
                    .map(|a| a.note_id.clone())
                    .collect();
                ids.dedup();
                let notes: Vec<Value> = ids
                    .iter()
                    .filter_map(|id| self.live_note(id).map(Self::note_json))
                    .collect();
                if method == "getNoteWithLabel" {
                    Ok(Some(notes.into_iter().next().unwrap_or(Value::Null)))
                } else {
                    Ok(Some(Value::Array(notes)))
                }
            }
            "getInstanceName" => Ok(Some(Value::Null)),
            "log" => Ok(None),
            "createTextNote" => {
                let parent = arg_str(args, 0).unwrap_or_default();
                let title = arg_str(args, 1).unwrap_or_default();
                let content = arg_str(args, 2).unwrap_or_default();
                self.create_note(&parent, &title, &content, "text", "text/html", None)
            }
            "createDataNote" => {
                let parent = arg_str(args, 0).unwrap_or_default();
                let title = arg_str(args, 1).unwrap_or_default();
                let content = args.get(2).cloned().unwrap_or(Value::Null).to_string();
                self.create_note(&parent, &title, &content, "code", "application/json", None)
            }
            "createNewNote" => {
                let params = args.first().cloned().unwrap_or(Value::Null);
                let parent = params["parentNoteId"].as_str().unwrap_or_default().to_string();
                let title = params["title"].as_str().unwrap_or_default().to_string();
                let content = params["content"].as_str().unwrap_or_default().to_string();
                let note_type = params["type"].as_str().unwrap_or("text").to_string();
                let mime = params["mime"].as_str().unwrap_or("text/html").to_string();
                let prefix = params["prefix"].as_str().map(str::to_string);
                self.create_note(&parent, &title, &content, &note_type, &mime, prefix)
            }
            "ensureNoteIsPresentInParent" => {
                let note_id = arg_str(args, 0).unwrap_or_default();
                let parent = arg_str(args, 1).unwrap_or_default();
                let exists = self
                    .parent_branches(&note_id)
                    .iter()
                    .any(|b| b.parent_note_id == parent);
                if !exists {
                    let branch_id = self.new_id("b");
                    self.branches.push(BranchRec {
                        branch_id,
                        note_id,
                        parent_note_id: parent,
                        note_position: 10,
                        prefix: arg_str(args, 2),
                        is_deleted: false,
                    });
                }
                Ok(None)
            }
            "ensureNoteIsAbsentFromParent" => {
                let note_id = arg_str(args, 0).unwrap_or_default();
                let parent = arg_str(args, 1).unwrap_or_default();
                for branch in self.branches.iter_mut() {
                    if branch.note_id == note_id && branch.parent_note_id == parent {
                        branch.is_deleted = true;
                    }
                }
                if self.parent_branches(&note_id).is_empty() {
                    if let Some(note) = self.notes.get_mut(&note_id) {
                        note.is_deleted = true;
                    }
                }
                Ok(None)
            }
            "searchForNotes" => {
                let query = arg_str(args, 0).unwrap_or_default();
                let limit = args
                    .get(1)
                    .and_then(|p| p["limit"].as_u64())
                    .map(|l| l as usize)
                    .unwrap_or(usize::MAX);
                let found: Vec<Value> = self
                    .notes
                    .values()
                    .filter(|n| !n.is_deleted && n.title.contains(&query))
                    .take(limit)
                    .map(Self::note_json)
                    .collect();
                Ok(Some(Value::Array(found)))
            }
            other => Err(fail(format!("Unknown api method {}", other))),
        }
    }

    fn note(&mut self, note_id: &str, method: &str, args: &[Value]) -> Reply {
        // Label/relation variants are the generic attribute call with the
        // type fixed as a leading argument
        if let Some((generic, attr_type)) = specialize(method) {
            let mut full = vec![json!(attr_type)];
            full.extend_from_slice(args);
            if generic == "addAttribute" && full.len() == 4 {
                full.push(json!(DEFAULT_ATTRIBUTE_POSITION));
            }
            return self.note(note_id, &generic, &full);
        }

        match method {
            "getContent" => Ok(Some(json!(self.notes[note_id].content))),
            "setContent" => {
                let content = arg_str(args, 0).unwrap_or_default();
                if let Some(note) = self.notes.get_mut(note_id) {
                    note.content = content;
                }
                Ok(None)
            }
            "getJsonContent" => serde_json::from_str(&self.notes[note_id].content)
                .map(Some)
                .map_err(|e| fail(format!("SyntaxError: {}", e))),
            "setJsonContent" => {
                let content = args.first().cloned().unwrap_or(Value::Null).to_string();
                if let Some(note) = self.notes.get_mut(note_id) {
                    note.content = content;
                }
                Ok(None)
            }
            "getContentMetadata" => Ok(Some(
                json!({"contentLength": self.notes[note_id].content.len()}),
            )),
            "isRoot" => Ok(Some(json!(note_id == "root"))),
            "isJson" => Ok(Some(json!(self.notes[note_id].mime == "application/json"))),
            "isJavaScript" => Ok(Some(json!(self.notes[note_id].mime.contains("javascript")))),
            "isHtml" => Ok(Some(json!(self.notes[note_id].mime == "text/html"))),
            "isStringNote" => Ok(Some(json!(true))),
            "getScriptEnv" => Ok(Some(json!("backend"))),

            "getOwnedAttributes" | "getAttributes" => {
                let attr_type = arg_str(args, 0);
                let name = arg_str(args, 1);
                let attrs = if method == "getOwnedAttributes" {
                    self.owned_attrs(note_id, attr_type.as_deref(), name.as_deref())
                } else {
                    self.effective_attrs(note_id, attr_type.as_deref(), name.as_deref())
                };
                Ok(Some(Self::attrs_json(&attrs)))
            }
            "hasOwnedAttribute" | "hasAttribute" => {
                let attrs = self.lookup(note_id, method == "hasOwnedAttribute", args);
                Ok(Some(json!(!attrs.is_empty())))
            }
            "getOwnedAttribute" | "getAttribute" => {
                let attrs = self.lookup(note_id, method == "getOwnedAttribute", args);
                Ok(Some(attrs.first().map(|a| Self::attr_json(a)).unwrap_or(Value::Null)))
            }
            "getOwnedAttributeValue" | "getAttributeValue" => {
                let attrs = self.lookup(note_id, method == "getOwnedAttributeValue", args);
                Ok(Some(attrs.first().map(|a| json!(a.value)).unwrap_or(Value::Null)))
            }
            "getRelationTarget" => {
                let name = arg_str(args, 0);
                let target = self
                    .effective_attrs(note_id, Some("relation"), name.as_deref())
                    .first()
                    .map(|a| a.value.clone());
                Ok(Some(match target {
                    Some(target) => self.note_json_or_null(&target),
                    None => Value::Null,
                }))
            }
            "getTargetRelations" => {
                let attrs: Vec<&AttrRec> = self
                    .attributes
                    .iter()
                    .filter(|a| !a.is_deleted && a.attr_type == "relation" && a.value == note_id)
                    .collect();
                Ok(Some(Self::attrs_json(&attrs)))
            }

            "toggleAttribute" => {
                let attr_type = arg_str(args, 0).unwrap_or_default();
                let enabled = arg_bool(args, 1);
                let name = arg_str(args, 2).unwrap_or_default();
                let value = arg_str(args, 3);
                if enabled {
                    if self.owned_attrs(note_id, Some(attr_type.as_str()), Some(name.as_str())).is_empty() {
                        let value = value.unwrap_or_default();
                        self.add_attr(
                            note_id,
                            &attr_type,
                            &name,
                            &value,
                            false,
                            DEFAULT_ATTRIBUTE_POSITION,
                        );
                    }
                } else {
                    self.remove_attrs(note_id, &attr_type, &name, value.as_deref());
                }
                Ok(None)
            }
            "setAttribute" => {
                let attr_type = arg_str(args, 0).unwrap_or_default();
                let name = arg_str(args, 1).unwrap_or_default();
                let value = arg_str(args, 2).unwrap_or_default();
                self.set_attr(note_id, &attr_type, &name, &value);
                Ok(None)
            }
            "removeAttribute" => {
                let attr_type = arg_str(args, 0).unwrap_or_default();
                let name = arg_str(args, 1).unwrap_or_default();
                let value = arg_str(args, 2);
                self.remove_attrs(note_id, &attr_type, &name, value.as_deref());
                Ok(None)
            }
            "addAttribute" => {
                let attr_type = arg_str(args, 0).unwrap_or_default();
                let name = arg_str(args, 1).unwrap_or_default();
                let value = arg_str(args, 2).unwrap_or_default();
                let is_inheritable = arg_bool(args, 3);
                let position = args
                    .get(4)
                    .and_then(Value::as_i64)
                    .unwrap_or(DEFAULT_ATTRIBUTE_POSITION);
                Ok(Some(self.add_attr(
                    note_id,
                    &attr_type,
                    &name,
                    &value,
                    is_inheritable,
                    position,
                )))
            }

            "getBranches" => Ok(Some(Value::Array(
                self.parent_branches(note_id)
                    .into_iter()
                    .map(Self::branch_json)
                    .collect(),
            ))),
            "getChildBranches" => Ok(Some(Value::Array(
                self.child_branches(note_id)
                    .into_iter()
                    .map(Self::branch_json)
                    .collect(),
            ))),
            "getChildNotes" => {
                let ids: Vec<String> = self
                    .child_branches(note_id)
                    .iter()
                    .map(|b| b.note_id.clone())
                    .collect();
                Ok(Some(Value::Array(
                    ids.iter().map(|id| self.note_json_or_null(id)).collect(),
                )))
            }
            "getParentNotes" => {
                let ids: Vec<String> = self
                    .parent_branches(note_id)
                    .iter()
                    .map(|b| b.parent_note_id.clone())
                    .collect();
                Ok(Some(Value::Array(
                    ids.iter().map(|id| self.note_json_or_null(id)).collect(),
                )))
            }
            "hasChildren" => Ok(Some(json!(!self.child_branches(note_id).is_empty()))),
            "getAllNotePaths" => Ok(Some(json!(self.all_paths(note_id, 0)))),
            "isDescendantOfNote" => {
                let ancestor = arg_str(args, 0).unwrap_or_default();
                let found = self
                    .all_paths(note_id, 0)
                    .iter()
                    .any(|path| path.contains(&ancestor));
                Ok(Some(json!(found)))
            }
            "getNoteRevisions" => Ok(Some(Value::Array(
                self.revisions
                    .iter()
                    .filter(|r| r.note_id == note_id)
                    .map(Self::revision_json)
                    .collect(),
            ))),
            other => Err(fail(format!("Unknown note method {}", other))),
        }
    }

    /// Matches for `[type, name]` args, owned or effective
    fn lookup(&self, note_id: &str, owned: bool, args: &[Value]) -> Vec<&AttrRec> {
        let attr_type = arg_str(args, 0);
        let name = arg_str(args, 1);
        if owned {
            self.owned_attrs(note_id, attr_type.as_deref(), name.as_deref())
        } else {
            self.effective_attrs(note_id, attr_type.as_deref(), name.as_deref())
        }
    }
}

/// `hasLabel` → (`hasAttribute`, "label"), `getOwnedRelations` →
/// (`getOwnedAttributes`, "relation"), ...
fn specialize(method: &str) -> Option<(String, &'static str)> {
    if method == "getRelationTarget" || method == "getTargetRelations" {
        return None;
    }
    for (word, attr_type) in [("Label", "label"), ("Relation", "relation")] {
        if method.contains(word) {
            return Some((method.replace(word, "Attribute"), attr_type));
        }
    }
    None
}
