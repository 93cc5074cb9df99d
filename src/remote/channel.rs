//! Dispatch channel
//!
//! Every operation in the crate ends up here as one
//! `(objtype, objid, methodName, args)` envelope and one transport exchange.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::{HttpTransport, Transport};
use super::types::{EntityKind, Envelope, RawResponse};
use crate::error::{Result, TriliumError};
use crate::model::Entity;

/// Session state for one server: where to send calls and which token to
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    /// Full endpoint URL (e.g. "http://localhost:8080/custom/trilium-client")
    pub url: String,
    pub token: String,
    /// Transport timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl ClientContext {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Generic RPC channel shared by every proxy of one client
pub struct DispatchChannel {
    token: String,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for DispatchChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchChannel")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl DispatchChannel {
    /// Channel over the blocking HTTP transport described by `context`
    pub fn connect(context: &ClientContext) -> Result<Self> {
        let transport = HttpTransport::new(&context.url, context.timeout_secs)?;
        Ok(Self::with_transport(context, transport))
    }

    /// Channel over any transport (fakes in tests, custom plumbing)
    pub fn with_transport(context: &ClientContext, transport: impl Transport + 'static) -> Self {
        Self {
            token: context.token.clone(),
            transport: Box::new(transport),
        }
    }

    /// Perform one remote call.
    ///
    /// Returns `None` when the server answered with an empty body.
    pub fn call(
        &self,
        kind: EntityKind,
        id: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Option<Value>> {
        let envelope = Envelope {
            token: self.token.clone(),
            objtype: kind,
            objid: id.map(str::to_string),
            method_name: method.to_string(),
            args,
        };

        debug!(objtype = %kind, objid = ?id, method, "dispatching remote call");
        let response = self.transport.send(&envelope)?;
        interpret(kind, method, response)
    }

    /// Call and decode the result into `T`. An empty body decodes as JSON null.
    pub fn call_value<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        id: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T> {
        let value = self.call(kind, id, method, args)?.unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// Call and wrap a single snapshot. A null result means "no such entity".
    pub fn call_entity<E: Entity>(
        self: &Arc<Self>,
        kind: EntityKind,
        id: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Option<E>> {
        match self.call(kind, id, method, args)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => E::from_value(value, Arc::clone(self)).map(Some),
        }
    }

    /// Call and wrap a list of snapshots. A null result is an empty list.
    pub fn call_entities<E: Entity>(
        self: &Arc<Self>,
        kind: EntityKind,
        id: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Vec<E>> {
        match self.call(kind, id, method, args)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| E::from_value(item, Arc::clone(self)))
                .collect(),
            Some(other) => Err(TriliumError::UnexpectedShape {
                method: method.to_string(),
                detail: format!("expected a list of {} snapshots, got {}", E::KIND, other),
            }),
        }
    }
}

/// Map status and body to a result
fn interpret(kind: EntityKind, method: &str, response: RawResponse) -> Result<Option<Value>> {
    if response.status == 500 {
        warn!(objtype = %kind, method, "remote execution failed");
        return Err(TriliumError::RemoteExecution(response.body));
    }

    if !response.is_success() {
        return Err(TriliumError::Transport {
            status: Some(response.status),
            message: response.body,
        });
    }

    if response.body.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&response.body)?))
}
