//! The `persistence` module remembers which messages have already been
//! received from a swarm.
//!
//! Only `ReceivedMessageInfo` is stored, never payloads. It backs
//! de-duplication by hash, deletion acknowledgements and eviction once a
//! record's expiration has passed. Storage is an embedded `sled` database.

pub mod sled_store;

pub use sled_store::MessageStore;
