//! Error types shared by the decoder, the store and the retrieval pipeline.
//!
//! A `DecodeError` only ever concerns a single record. The other errors are
//! about a whole response body or the local store.

use thiserror::Error;

/// Failure to turn one raw record into a `ReceivedMessage`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload for message {hash}: {source}")]
    InvalidEncoding {
        hash: String,
        #[source]
        source: base64::DecodeError,
    },
}

/// Failure to parse a retrieval response body.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("malformed retrieval response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
