use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::message::namespace::Namespace;
use crate::message::raw::RawMessage;
use crate::message::snode::Snode;
use crate::utils::error::DecodeError;

/// Storage nodes keep messages for 14 days, so hashes are remembered for 15
/// to avoid holding on to records no node will ever serve again.
pub const DEFAULT_EXPIRATION_MS: i64 = 15 * 24 * 60 * 60 * 1000;

/// How far a request timestamp may drift from the storage server's clock
/// before the server rejects it.
pub const SERVER_CLOCK_TOLERANCE_MS: i64 = 60 * 1000;

/// Returns true when `timestamp_ms` is within `SERVER_CLOCK_TOLERANCE_MS` of
/// `local_now_ms`, in either direction.
pub fn within_clock_tolerance(local_now_ms: i64, timestamp_ms: i64) -> bool {
    local_now_ms.abs_diff(timestamp_ms) <= SERVER_CLOCK_TOLERANCE_MS.unsigned_abs()
}

/// Where a batch of raw messages came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeContext {
    pub snode: Snode,
    pub swarm_public_key: String,
    pub namespace: Namespace,
}

/// The part of a received message that outlives its payload: enough to
/// de-duplicate by hash, acknowledge deletions and expire the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessageInfo {
    pub snode: Snode,
    pub swarm_public_key: String,
    pub namespace: Namespace,
    pub hash: String,
    pub expiration_date_ms: i64,
}

impl ReceivedMessageInfo {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiration_date_ms <= now_ms
    }
}

/// A message read from a swarm whose payload decoded successfully.
///
/// Built only through [`ReceivedMessage::decode`]; there is no way to hold one
/// with an undecodable payload, and none of its fields change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    hash: String,
    swarm_public_key: String,
    namespace: Namespace,
    snode: Snode,
    timestamp_ms: i64,
    expiration_date_ms: i64,
    data: Vec<u8>,
}

impl ReceivedMessage {
    /// Decodes one raw record.
    ///
    /// Fails with [`DecodeError::InvalidEncoding`] when `raw.base64_data` is
    /// not standard padded base64. The failure is logged and concerns this
    /// record only.
    ///
    /// Without an explicit expiration the record expires at the sender's
    /// `timestamp_ms` plus [`DEFAULT_EXPIRATION_MS`], saturating at `i64::MAX`.
    pub fn decode(raw: &RawMessage, context: &DecodeContext) -> Result<Self, DecodeError> {
        let data = match BASE64.decode(raw.base64_data.as_bytes()) {
            Ok(data) => data,
            Err(source) => {
                tracing::error!(
                    hash = %raw.hash,
                    snode = %context.snode,
                    namespace = %context.namespace,
                    error = %source,
                    "Failed to decode data for message"
                );
                return Err(DecodeError::InvalidEncoding {
                    hash: raw.hash.clone(),
                    source,
                });
            }
        };

        let expiration_date_ms = raw
            .expiration
            .unwrap_or_else(|| raw.timestamp_ms.saturating_add(DEFAULT_EXPIRATION_MS));

        Ok(Self {
            hash: raw.hash.clone(),
            swarm_public_key: context.swarm_public_key.clone(),
            namespace: context.namespace,
            snode: context.snode.clone(),
            timestamp_ms: raw.timestamp_ms,
            expiration_date_ms,
            data,
        })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn swarm_public_key(&self) -> &str {
        &self.swarm_public_key
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn snode(&self) -> &Snode {
        &self.snode
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn expiration_date_ms(&self) -> i64 {
        self.expiration_date_ms
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn info(&self) -> ReceivedMessageInfo {
        ReceivedMessageInfo {
            snode: self.snode.clone(),
            swarm_public_key: self.swarm_public_key.clone(),
            namespace: self.namespace,
            hash: self.hash.clone(),
            expiration_date_ms: self.expiration_date_ms,
        }
    }
}

impl fmt::Debug for ReceivedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceivedMessage")
            .field("hash", &self.hash)
            .field("expiration_ms", &self.expiration_date_ms)
            .field("timestamp_ms", &self.timestamp_ms)
            .field("data", &BASE64.encode(&self.data))
            .finish()
    }
}
