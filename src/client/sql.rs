//! Raw SQL passthrough
//!
//! Routed as objtype `sql` with the fixed objid `"sql"`. Queries run on the
//! server's database; nothing is checked locally.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::error::{Result, TriliumError};
use crate::remote::{DispatchChannel, EntityKind};

const SQL_OBJID: &str = "sql";

#[derive(Debug, Clone)]
pub struct Sql {
    channel: Arc<DispatchChannel>,
}

impl Sql {
    pub(crate) fn new(channel: Arc<DispatchChannel>) -> Self {
        Self { channel }
    }

    /// Run a statement; returns whatever the server reports (change counts
    /// and the like)
    pub fn execute(&self, query: &str, params: &[Value]) -> Result<Option<Value>> {
        self.channel.call(
            EntityKind::Sql,
            Some(SQL_OBJID),
            "execute",
            vec![json!(query), Value::Array(params.to_vec())],
        )
    }

    /// Rows as column-name → value maps
    pub fn get_rows(&self, query: &str, params: &[Value]) -> Result<Vec<Map<String, Value>>> {
        let value = self.channel.call(
            EntityKind::Sql,
            Some(SQL_OBJID),
            "getRows",
            vec![json!(query), Value::Array(params.to_vec())],
        )?;

        match value {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(rows)) => rows
                .into_iter()
                .map(|row| match row {
                    Value::Object(map) => Ok(map),
                    other => Err(TriliumError::UnexpectedShape {
                        method: "getRows".to_string(),
                        detail: format!("row is not an object: {}", other),
                    }),
                })
                .collect(),
            Some(other) => Err(TriliumError::UnexpectedShape {
                method: "getRows".to_string(),
                detail: format!("expected a list of rows, got {}", other),
            }),
        }
    }
}
