//! Tree navigation on a note
//!
//! A note with several parent branches has several paths from root. Paths
//! come from the server; descendant enumeration is walked client-side so a
//! cyclic branch graph is reported instead of followed forever.

use std::collections::HashSet;

use serde_json::json;
use tracing::debug;

use super::branch::Branch;
use super::note::Note;
use super::Entity;
use crate::error::{Result, TriliumError};
use crate::remote::EntityKind;

/// Note ids from root down to a note, inclusive at both ends
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotePath(Vec<String>);

impl NotePath {
    pub fn new(note_ids: Vec<String>) -> Self {
        Self(note_ids)
    }

    pub fn note_ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The note the path leads to
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// True if `note_id` is anywhere on the path, the last element included
    pub fn contains(&self, note_id: &str) -> bool {
        self.0.iter().any(|id| id == note_id)
    }

    /// True if `note_id` is on the path above its last element
    pub fn has_ancestor(&self, note_id: &str) -> bool {
        match self.0.split_last() {
            Some((_, ancestors)) => ancestors.iter().any(|id| id == note_id),
            None => false,
        }
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl std::fmt::Display for NotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Local counterpart of `Note::is_descendant_of_note` over already-fetched
/// paths. Like the server, a note counts as its own descendant.
pub fn any_path_contains(paths: &[NotePath], note_id: &str) -> bool {
    paths.iter().any(|path| path.contains(note_id))
}

/// Depth-first walk events
enum Visit {
    Enter(String),
    Leave(String),
}

impl Note {
    // ============== Paths ==============

    /// Every root-to-this path, one per branch chain. Each path ends with
    /// this note's id.
    pub fn get_all_note_paths(&self) -> Result<Vec<NotePath>> {
        let raw: Vec<Vec<String>> = self.invoke_value("getAllNotePaths", vec![])?;

        raw.into_iter()
            .map(|ids| {
                if ids.last().map(String::as_str) != Some(self.note_id()) {
                    return Err(TriliumError::UnexpectedShape {
                        method: "getAllNotePaths".to_string(),
                        detail: format!("path {:?} does not end at '{}'", ids, self.note_id()),
                    });
                }

                let mut seen = HashSet::new();
                if let Some(repeated) = ids.iter().find(|id| !seen.insert(id.as_str())) {
                    return Err(TriliumError::GraphIntegrity {
                        note_id: repeated.clone(),
                        detail: format!("note appears twice on path {}", ids.join("/")),
                    });
                }

                Ok(NotePath(ids))
            })
            .collect()
    }

    /// True if `ancestor_note_id` is on any path to this note, through any
    /// parent branch
    pub fn is_descendant_of_note(&self, ancestor_note_id: &str) -> Result<bool> {
        self.invoke_value("isDescendantOfNote", vec![json!(ancestor_note_id)])
    }

    // ============== Children and parents ==============

    /// Branches placing this note under its parents (none for root)
    pub fn get_branches(&self) -> Result<Vec<Branch>> {
        self.invoke_entities("getBranches", vec![])
    }

    pub fn has_children(&self) -> Result<bool> {
        self.invoke_value("hasChildren", vec![])
    }

    pub fn get_child_notes(&self) -> Result<Vec<Note>> {
        self.invoke_entities("getChildNotes", vec![])
    }

    pub fn get_child_branches(&self) -> Result<Vec<Branch>> {
        self.invoke_entities("getChildBranches", vec![])
    }

    pub fn get_parent_notes(&self) -> Result<Vec<Note>> {
        self.invoke_entities("getParentNotes", vec![])
    }

    // ============== Descendants ==============

    /// This note and everything below it through non-deleted branches, in
    /// depth-first pre-order. A note reachable through two parents appears
    /// once. One round trip per visited note.
    ///
    /// Fails with `GraphIntegrity` if a branch leads back to a note on the
    /// current path.
    pub fn get_descendant_note_ids(&self) -> Result<Vec<String>> {
        let mut order = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut on_path: HashSet<String> = HashSet::new();
        let mut stack = vec![Visit::Enter(self.note_id().to_string())];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(note_id) => {
                    if on_path.contains(&note_id) {
                        return Err(TriliumError::GraphIntegrity {
                            detail: format!(
                                "branch cycle below '{}' leads back to '{}'",
                                self.note_id(),
                                note_id
                            ),
                            note_id,
                        });
                    }
                    if !visited.insert(note_id.clone()) {
                        continue;
                    }

                    let children = self.live_child_ids(&note_id)?;
                    on_path.insert(note_id.clone());
                    order.push(note_id.clone());
                    stack.push(Visit::Leave(note_id));
                    stack.extend(children.into_iter().rev().map(Visit::Enter));
                }
                Visit::Leave(note_id) => {
                    on_path.remove(&note_id);
                }
            }
        }

        debug!(note_id = self.note_id(), count = order.len(), "walked descendants");
        Ok(order)
    }

    /// Child note ids of `note_id` through non-deleted branches
    fn live_child_ids(&self, note_id: &str) -> Result<Vec<String>> {
        let branches: Vec<Branch> = self.channel().call_entities(
            EntityKind::Note,
            Some(note_id),
            "getChildBranches",
            vec![],
        )?;

        let mut ids = Vec::with_capacity(branches.len());
        for branch in branches {
            if !branch.snapshot().is_deleted()? {
                ids.push(branch.snapshot().note_id()?.to_string());
            }
        }
        Ok(ids)
    }
}
