//! trilium-remote - typed client for the Trilium scripting API
//!
//! Every operation is one `(objtype, objid, methodName, args)` call to a
//! single endpoint. The server owns all state; this crate routes calls and
//! shapes replies into typed proxies.
//!
//! ## Key Concepts
//!
//! - **Dispatch channel**: builds the envelope, performs one round trip,
//!   maps status codes to errors
//! - **Proxies**: `Note`, `Branch`, `Attribute`, `NoteRevision`. Snapshot
//!   fields via `.snapshot()` are local; every other method is remote
//! - **Owned vs inherited**: owned attributes sit on the note, inherited
//!   ones come from inheritable attributes of ancestors
//! - **Multi-parent tree**: one note, several branches, several paths

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;

pub use client::{Sql, TriliumClient};
pub use error::{Result, TriliumError};
pub use model::{
    any_path_contains, Attribute, AttributeType, Branch, CreateNoteParams, Entity, Note, NotePath,
    NoteRevision, NoteType, SearchParams, StartOfWeek, WeekNoteOptions,
    DEFAULT_ATTRIBUTE_POSITION,
};
pub use remote::{ClientContext, DispatchChannel, EntityKind, HttpTransport, Transport};
