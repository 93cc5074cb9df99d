//! Wire types
//!
//! Envelope and entity-kind tags for the single RPC endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity kind a call is routed to (`objtype` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Backend script API (client-level calls, no object id)
    #[serde(rename = "api")]
    Api,
    #[serde(rename = "note")]
    Note,
    #[serde(rename = "branch")]
    Branch,
    #[serde(rename = "attribute")]
    Attribute,
    #[serde(rename = "noterevision")]
    Revision,
    #[serde(rename = "sql")]
    Sql,
}

impl EntityKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Api => "api",
            EntityKind::Note => "note",
            EntityKind::Branch => "branch",
            EntityKind::Attribute => "attribute",
            EntityKind::Revision => "noterevision",
            EntityKind::Sql => "sql",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(EntityKind::Api),
            "note" => Ok(EntityKind::Note),
            "branch" => Ok(EntityKind::Branch),
            "attribute" => Ok(EntityKind::Attribute),
            "noterevision" => Ok(EntityKind::Revision),
            "sql" => Ok(EntityKind::Sql),
            _ => Err(format!("Unknown entity kind: {}", s)),
        }
    }
}

/// One request to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub token: String,
    pub objtype: EntityKind,
    pub objid: Option<String>,
    #[serde(rename = "methodName")]
    pub method_name: String,
    pub args: Vec<Value>,
}

/// Raw status and body of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with a JSON body
    pub fn json(value: &Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// 200 with no body
    pub fn empty() -> Self {
        Self::new(200, "")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
