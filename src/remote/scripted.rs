//! Canned-response transport for unit tests

use std::sync::{Arc, Mutex};

use super::channel::{ClientContext, DispatchChannel};
use super::transport::Transport;
use super::types::{Envelope, RawResponse};
use crate::error::Result;

/// Replays canned responses in order and records what was sent
pub(crate) struct Scripted {
    responses: Mutex<Vec<RawResponse>>,
    sent: Arc<Mutex<Vec<Envelope>>>,
}

impl Transport for Scripted {
    fn send(&self, envelope: &Envelope) -> Result<RawResponse> {
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(self.responses.lock().unwrap().remove(0))
    }
}

/// Channel over a `Scripted` transport plus the log of sent envelopes
pub(crate) fn scripted_channel(
    responses: Vec<RawResponse>,
) -> (Arc<DispatchChannel>, Arc<Mutex<Vec<Envelope>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let transport = Scripted {
        responses: Mutex::new(responses),
        sent: Arc::clone(&sent),
    };
    let context = ClientContext::new("http://localhost/custom", "secret");
    (Arc::new(DispatchChannel::with_transport(&context, transport)), sent)
}
