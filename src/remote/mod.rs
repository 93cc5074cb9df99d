//! Remote endpoint module
//!
//! Wire envelope, transport seam and the dispatch channel every proxy
//! routes through.

mod channel;
#[cfg(test)]
pub(crate) mod scripted;
mod transport;
mod types;

pub use channel::{ClientContext, DispatchChannel};
pub use transport::{HttpTransport, Transport};
pub use types::*;
