//! Messages retrieved from a storage-node swarm.
//!
//! `raw` holds the wire shapes of a retrieval response, `received` turns one
//! raw record into a validated `ReceivedMessage`, and `batch` does that for a
//! whole response.

pub mod batch;
pub mod namespace;
pub mod raw;
pub mod received;
pub mod snode;

pub use batch::{BatchFailure, DecodedBatch, decode_batch};
pub use namespace::Namespace;
pub use raw::{RawMessage, RetrieveResponse};
pub use received::{
    DEFAULT_EXPIRATION_MS, DecodeContext, ReceivedMessage, ReceivedMessageInfo,
    SERVER_CLOCK_TOLERANCE_MS, within_clock_tolerance,
};
pub use snode::Snode;

#[cfg(test)]
mod proptests;
