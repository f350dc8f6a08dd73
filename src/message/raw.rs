use serde::Deserialize;

use crate::utils::error::ResponseError;

/// One record of a retrieval response, exactly as the storage server sends it.
///
/// `data` is expected to be standard base64 but is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "data")]
    pub base64_data: String,
    pub hash: String,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub expiration: Option<i64>,
}

/// Body of a retrieval response.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveResponse {
    pub messages: Vec<RawMessage>,
    /// Set when the node holds more messages than it returned.
    #[serde(default)]
    pub more: bool,
    /// Hard fork version reported by the node.
    #[serde(default)]
    pub hf: Option<Vec<i32>>,
    /// Node time in milliseconds when the response was built.
    #[serde(default, rename = "t")]
    pub server_time_ms: Option<i64>,
}

impl RetrieveResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, ResponseError> {
        Ok(serde_json::from_slice(body)?)
    }
}
