//! Owned and inherited attributes of a note
//!
//! Owned attributes are attached to the note itself. Inherited ones come
//! from inheritable attributes of any ancestor reachable through non-deleted
//! branches. The server resolves inheritance; these methods forward the
//! exact arguments and shape the replies.
//!
//! Mutation semantics:
//! - `set_*` creates or updates, leaving at most one attribute per
//!   `(type, name)`.
//! - `add_*` always creates, even when a matching attribute exists.
//! - `toggle_*(true, ..)` creates only when absent and never overwrites a
//!   value. `toggle_*(false, ..)` removes every matching owned attribute.
//! - `remove_*` is a no-op when nothing matches.
//!
//! When several attributes share `(type, name)` the getters return the first
//! one in server order.

use serde_json::json;

use super::attribute::Attribute;
use super::note::Note;
use super::params::AttributeType;
use super::Entity;
use crate::error::Result;

/// Position the server gives attributes added without an explicit one
/// (`add_label`, `add_relation`); pass it to `add_attribute` for the same
/// placement
pub const DEFAULT_ATTRIBUTE_POSITION: i64 = 1000;

impl Note {
    // ============== Lists ==============

    /// Attributes attached directly to this note, optionally filtered
    pub fn get_owned_attributes(
        &self,
        attribute_type: Option<AttributeType>,
        name: Option<&str>,
    ) -> Result<Vec<Attribute>> {
        self.invoke_entities("getOwnedAttributes", vec![json!(attribute_type), json!(name)])
    }

    /// Owned and inherited attributes, optionally filtered
    pub fn get_attributes(
        &self,
        attribute_type: Option<AttributeType>,
        name: Option<&str>,
    ) -> Result<Vec<Attribute>> {
        self.invoke_entities("getAttributes", vec![json!(attribute_type), json!(name)])
    }

    pub fn get_labels(&self, name: Option<&str>) -> Result<Vec<Attribute>> {
        self.invoke_entities("getLabels", vec![json!(name)])
    }

    pub fn get_owned_labels(&self, name: Option<&str>) -> Result<Vec<Attribute>> {
        self.invoke_entities("getOwnedLabels", vec![json!(name)])
    }

    pub fn get_relations(&self, name: Option<&str>) -> Result<Vec<Attribute>> {
        self.invoke_entities("getRelations", vec![json!(name)])
    }

    pub fn get_owned_relations(&self, name: Option<&str>) -> Result<Vec<Attribute>> {
        self.invoke_entities("getOwnedRelations", vec![json!(name)])
    }

    /// Relations of other notes pointing at this one
    pub fn get_target_relations(&self) -> Result<Vec<Attribute>> {
        self.invoke_entities("getTargetRelations", vec![])
    }

    // ============== Existence ==============

    pub fn has_attribute(&self, attribute_type: AttributeType, name: &str) -> Result<bool> {
        self.invoke_value("hasAttribute", vec![json!(attribute_type), json!(name)])
    }

    pub fn has_owned_attribute(&self, attribute_type: AttributeType, name: &str) -> Result<bool> {
        self.invoke_value("hasOwnedAttribute", vec![json!(attribute_type), json!(name)])
    }

    pub fn has_label(&self, name: &str) -> Result<bool> {
        self.invoke_value("hasLabel", vec![json!(name)])
    }

    pub fn has_owned_label(&self, name: &str) -> Result<bool> {
        self.invoke_value("hasOwnedLabel", vec![json!(name)])
    }

    pub fn has_relation(&self, name: &str) -> Result<bool> {
        self.invoke_value("hasRelation", vec![json!(name)])
    }

    pub fn has_owned_relation(&self, name: &str) -> Result<bool> {
        self.invoke_value("hasOwnedRelation", vec![json!(name)])
    }

    // ============== Single lookups ==============

    pub fn get_attribute(
        &self,
        attribute_type: AttributeType,
        name: &str,
    ) -> Result<Option<Attribute>> {
        self.invoke_entity("getAttribute", vec![json!(attribute_type), json!(name)])
    }

    pub fn get_owned_attribute(
        &self,
        attribute_type: AttributeType,
        name: &str,
    ) -> Result<Option<Attribute>> {
        self.invoke_entity("getOwnedAttribute", vec![json!(attribute_type), json!(name)])
    }

    pub fn get_label(&self, name: &str) -> Result<Option<Attribute>> {
        self.invoke_entity("getLabel", vec![json!(name)])
    }

    pub fn get_owned_label(&self, name: &str) -> Result<Option<Attribute>> {
        self.invoke_entity("getOwnedLabel", vec![json!(name)])
    }

    pub fn get_relation(&self, name: &str) -> Result<Option<Attribute>> {
        self.invoke_entity("getRelation", vec![json!(name)])
    }

    pub fn get_owned_relation(&self, name: &str) -> Result<Option<Attribute>> {
        self.invoke_entity("getOwnedRelation", vec![json!(name)])
    }

    pub fn get_attribute_value(
        &self,
        attribute_type: AttributeType,
        name: &str,
    ) -> Result<Option<String>> {
        self.invoke_value("getAttributeValue", vec![json!(attribute_type), json!(name)])
    }

    pub fn get_owned_attribute_value(
        &self,
        attribute_type: AttributeType,
        name: &str,
    ) -> Result<Option<String>> {
        self.invoke_value(
            "getOwnedAttributeValue",
            vec![json!(attribute_type), json!(name)],
        )
    }

    pub fn get_label_value(&self, name: &str) -> Result<Option<String>> {
        self.invoke_value("getLabelValue", vec![json!(name)])
    }

    pub fn get_owned_label_value(&self, name: &str) -> Result<Option<String>> {
        self.invoke_value("getOwnedLabelValue", vec![json!(name)])
    }

    pub fn get_relation_value(&self, name: &str) -> Result<Option<String>> {
        self.invoke_value("getRelationValue", vec![json!(name)])
    }

    pub fn get_owned_relation_value(&self, name: &str) -> Result<Option<String>> {
        self.invoke_value("getOwnedRelationValue", vec![json!(name)])
    }

    // ============== Relation targets ==============

    /// Target of the first relation called `name`, owned or inherited.
    /// `None` when there is no such relation or its target is gone.
    pub fn get_relation_target(&self, name: &str) -> Result<Option<Note>> {
        self.invoke_entity("getRelationTarget", vec![json!(name)])
    }

    /// Target of the first *owned* relation called `name`. Inherited
    /// relations are ignored.
    pub fn get_owned_relation_target(&self, name: &str) -> Result<Option<Note>> {
        let Some(relation) = self.get_owned_relation(name)? else {
            return Ok(None);
        };
        self.lookup_note(relation.snapshot().value()?)
    }

    /// Targets of every relation (optionally only those called `name`), in
    /// relation order. One round trip to list the relations plus one per
    /// target. A deleted target shows up as `None`.
    ///
    /// `name` is forwarded as the relation filter. Older clients ignored it
    /// and always listed every relation; pass `None` for that behavior.
    pub fn get_relation_targets(&self, name: Option<&str>) -> Result<Vec<Option<Note>>> {
        self.get_relations(name)?
            .iter()
            .map(|relation| self.lookup_note(relation.snapshot().value()?))
            .collect()
    }

    // ============== Mutations ==============

    /// Enable: create `(type, name, value)` unless an owned match exists.
    /// Disable: remove all owned matches.
    pub fn toggle_attribute(
        &self,
        attribute_type: AttributeType,
        enabled: bool,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        self.invoke(
            "toggleAttribute",
            vec![json!(attribute_type), json!(enabled), json!(name), json!(value)],
        )?;
        Ok(())
    }

    pub fn toggle_label(&self, enabled: bool, name: &str, value: Option<&str>) -> Result<()> {
        self.invoke("toggleLabel", vec![json!(enabled), json!(name), json!(value)])?;
        Ok(())
    }

    pub fn toggle_relation(&self, enabled: bool, name: &str, value: Option<&str>) -> Result<()> {
        self.invoke("toggleRelation", vec![json!(enabled), json!(name), json!(value)])?;
        Ok(())
    }

    /// Create or update: afterwards exactly one owned `(type, name)` exists
    /// and holds `value`
    pub fn set_attribute(
        &self,
        attribute_type: AttributeType,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        self.invoke(
            "setAttribute",
            vec![json!(attribute_type), json!(name), json!(value)],
        )?;
        Ok(())
    }

    pub fn set_label(&self, name: &str, value: Option<&str>) -> Result<()> {
        self.invoke("setLabel", vec![json!(name), json!(value)])?;
        Ok(())
    }

    /// Point relation `name` at `target_note_id`
    pub fn set_relation(&self, name: &str, target_note_id: &str) -> Result<()> {
        self.invoke("setRelation", vec![json!(name), json!(target_note_id)])?;
        Ok(())
    }

    /// Remove matching owned attributes. Absence is not an error.
    pub fn remove_attribute(
        &self,
        attribute_type: AttributeType,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        self.invoke(
            "removeAttribute",
            vec![json!(attribute_type), json!(name), json!(value)],
        )?;
        Ok(())
    }

    pub fn remove_label(&self, name: &str, value: Option<&str>) -> Result<()> {
        self.invoke("removeLabel", vec![json!(name), json!(value)])?;
        Ok(())
    }

    pub fn remove_relation(&self, name: &str, value: Option<&str>) -> Result<()> {
        self.invoke("removeRelation", vec![json!(name), json!(value)])?;
        Ok(())
    }

    /// Always create a new attribute, duplicates included
    pub fn add_attribute(
        &self,
        attribute_type: AttributeType,
        name: &str,
        value: &str,
        is_inheritable: bool,
        position: i64,
    ) -> Result<Option<Attribute>> {
        self.invoke_entity(
            "addAttribute",
            vec![
                json!(attribute_type),
                json!(name),
                json!(value),
                json!(is_inheritable),
                json!(position),
            ],
        )
    }

    pub fn add_label(
        &self,
        name: &str,
        value: &str,
        is_inheritable: bool,
    ) -> Result<Option<Attribute>> {
        self.invoke_entity(
            "addLabel",
            vec![json!(name), json!(value), json!(is_inheritable)],
        )
    }

    pub fn add_relation(
        &self,
        name: &str,
        target_note_id: &str,
        is_inheritable: bool,
    ) -> Result<Option<Attribute>> {
        self.invoke_entity(
            "addRelation",
            vec![json!(name), json!(target_note_id), json!(is_inheritable)],
        )
    }
}
