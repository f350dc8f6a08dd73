//! # snode-inbox
//!
//! `snode_inbox` decodes the messages a client retrieves from a storage-node
//! swarm and keeps the bookkeeping needed to de-duplicate and expire them.
//!
//! ## Core Modules
//!
//! - `message`: Wire shapes of a retrieval response and the decoder that turns
//!   each raw record into a validated `ReceivedMessage`.
//! - `persistence`: A `sled` store of received-message info keyed by hash.
//! - `retrieval`: Parses a response body, decodes it and drops duplicates.
//! - `config`: Loads settings from `config/default` and the environment.
//! - `utils`: Error types and logging setup.

pub mod config;
pub mod message;
pub mod persistence;
pub mod retrieval;
pub mod utils;
