//! Entity proxies
//!
//! Every remote entity is a proxy made of two parts:
//!
//! - an immutable **snapshot** of the fields the server sent when the proxy
//!   was built, read through `entity.snapshot()`. Snapshot reads never touch
//!   the network.
//! - a back-reference to the [`DispatchChannel`]. Every method on the entity
//!   itself is a remote operation routed as `(KIND, id, method, args)`,
//!   except the local accessors: `snapshot()`, the primary-key getters
//!   (`note_id()`, `branch_id()`, `attribute_id()`, `note_revision_id()`)
//!   and the `Entity` plumbing (`id()`, `raw_snapshot()`, `channel()`).
//!
//! A snapshot never changes after construction. To observe a mutation, fetch
//! a fresh proxy.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, TriliumError};
use crate::remote::{DispatchChannel, EntityKind};

mod attribute;
mod attributes;
mod branch;
mod note;
mod params;
mod revision;
mod tree;

pub use attribute::{Attribute, AttributeSnapshot};
pub use attributes::DEFAULT_ATTRIBUTE_POSITION;
pub use branch::{Branch, BranchSnapshot};
pub use note::{Note, NoteSnapshot};
pub use params::*;
pub use revision::{NoteRevision, NoteRevisionSnapshot};
pub use tree::{any_path_contains, NotePath};

/// Raw field map of one entity as the server sent it
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    kind: EntityKind,
    fields: Map<String, Value>,
}

impl Snapshot {
    /// Wrap a server value. Anything other than a JSON object is rejected.
    pub fn from_value(kind: EntityKind, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { kind, fields }),
            other => Err(TriliumError::UnexpectedShape {
                method: format!("<{} snapshot>", kind),
                detail: format!("expected an object, got {}", other),
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// All fields, including ones this crate does not model
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn raw(&self, field: &str) -> Result<&Value> {
        self.fields
            .get(field)
            .ok_or_else(|| TriliumError::missing(self.kind, field))
    }

    /// Decode a required field
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Result<T> {
        Ok(T::deserialize(self.raw(field)?)?)
    }

    /// Decode a field that must be present but may be null
    pub fn get_nullable<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        match self.raw(field)? {
            Value::Null => Ok(None),
            value => Ok(Some(T::deserialize(value)?)),
        }
    }

    /// Borrow a required string field
    pub fn get_str(&self, field: &str) -> Result<&str> {
        match self.raw(field)? {
            Value::String(s) => Ok(s),
            other => Err(TriliumError::UnexpectedShape {
                method: format!("<{} snapshot>", self.kind),
                detail: format!("field '{}' is not a string: {}", field, other),
            }),
        }
    }

    /// Borrow a string field that must be present but may be null
    pub fn get_str_nullable(&self, field: &str) -> Result<Option<&str>> {
        match self.raw(field)? {
            Value::Null => Ok(None),
            _ => self.get_str(field).map(Some),
        }
    }
}

/// Shared behavior of every remote entity kind
pub trait Entity: Sized {
    /// Routing tag sent as `objtype`
    const KIND: EntityKind;

    /// Snapshot key holding the primary key
    const ID_FIELD: &'static str;

    fn from_parts(id: String, snapshot: Snapshot, channel: Arc<DispatchChannel>) -> Self;

    /// Primary key
    fn id(&self) -> &str;

    fn raw_snapshot(&self) -> &Snapshot;

    fn channel(&self) -> &Arc<DispatchChannel>;

    /// Build a proxy from a server snapshot. The primary key is required up
    /// front since every remote operation is routed by it.
    fn from_value(value: Value, channel: Arc<DispatchChannel>) -> Result<Self> {
        let snapshot = Snapshot::from_value(Self::KIND, value)?;
        let id = snapshot.get_str(Self::ID_FIELD)?.to_string();
        Ok(Self::from_parts(id, snapshot, channel))
    }

    /// Remote call scoped to this entity
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Option<Value>> {
        self.channel().call(Self::KIND, Some(self.id()), method, args)
    }

    fn invoke_value<T: DeserializeOwned>(&self, method: &str, args: Vec<Value>) -> Result<T> {
        self.channel()
            .call_value(Self::KIND, Some(self.id()), method, args)
    }

    fn invoke_entity<E: Entity>(&self, method: &str, args: Vec<Value>) -> Result<Option<E>> {
        self.channel()
            .call_entity(Self::KIND, Some(self.id()), method, args)
    }

    fn invoke_entities<E: Entity>(&self, method: &str, args: Vec<Value>) -> Result<Vec<E>> {
        self.channel()
            .call_entities(Self::KIND, Some(self.id()), method, args)
    }
}

/// Identity by primary key: `PartialEq`, `Eq`, `Hash` and a short `Display`.
macro_rules! entity_identity {
    ($entity:ty) => {
        impl PartialEq for $entity {
            fn eq(&self, other: &Self) -> bool {
                <$entity as $crate::model::Entity>::id(self)
                    == <$entity as $crate::model::Entity>::id(other)
            }
        }

        impl Eq for $entity {}

        impl std::hash::Hash for $entity {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&<$entity as $crate::model::Entity>::KIND, state);
                std::hash::Hash::hash(<$entity as $crate::model::Entity>::id(self), state);
            }
        }

        impl std::fmt::Display for $entity {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "{}:{}",
                    <$entity as $crate::model::Entity>::KIND,
                    <$entity as $crate::model::Entity>::id(self)
                )
            }
        }
    };
}

pub(crate) use entity_identity;
