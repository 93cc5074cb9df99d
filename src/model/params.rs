//! Enumerations and parameter builders sent as call arguments

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Note type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteType {
    Text,
    Code,
    File,
    Image,
    Search,
    Book,
    RelationMap,
    /// Any type newer than this client knows about
    #[serde(other)]
    Other,
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteType::Text => write!(f, "text"),
            NoteType::Code => write!(f, "code"),
            NoteType::File => write!(f, "file"),
            NoteType::Image => write!(f, "image"),
            NoteType::Search => write!(f, "search"),
            NoteType::Book => write!(f, "book"),
            NoteType::RelationMap => write!(f, "relation-map"),
            NoteType::Other => write!(f, "other"),
        }
    }
}

/// Attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Label,
    Relation,
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeType::Label => write!(f, "label"),
            AttributeType::Relation => write!(f, "relation"),
        }
    }
}

impl std::str::FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "label" => Ok(AttributeType::Label),
            "relation" => Ok(AttributeType::Relation),
            _ => Err(format!("Unknown attribute type: {}", s)),
        }
    }
}

/// Parameters for `createNewNote`
///
/// Optional keys are left off the wire so the server applies its own
/// defaults (mime derived from type, position after the last sibling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteParams {
    pub parent_note_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    pub is_protected: bool,
    pub is_expanded: bool,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_position: Option<i64>,
}

impl CreateNoteParams {
    pub fn new(
        parent_note_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        note_type: NoteType,
    ) -> Self {
        Self {
            parent_note_id: parent_note_id.into(),
            title: title.into(),
            content: content.into(),
            note_type,
            mime: None,
            is_protected: false,
            is_expanded: false,
            prefix: String::new(),
            note_position: None,
        }
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn protected(mut self, is_protected: bool) -> Self {
        self.is_protected = is_protected;
        self
    }

    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = is_expanded;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn position(mut self, note_position: i64) -> Self {
        self.note_position = Some(note_position);
        self
    }
}

/// Sort direction for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Options for `searchForNotes`. Unset options are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_archived_notes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor_note_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor_depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_attribute_search: Option<bool>,
}

/// First day of the week for week notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOfWeek {
    #[default]
    Monday,
    Sunday,
}

/// Options for `getWeekNote`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekNoteOptions {
    pub start_of_the_week: StartOfWeek,
}

/// `YYYY-MM-DD` as the calendar endpoints expect it
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM`
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
