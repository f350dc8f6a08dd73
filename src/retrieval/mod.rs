//! Turns a retrieval response body into newly received messages.
//!
//! The response is parsed, every record decoded on its own, and records whose
//! hash the store already knows are dropped.

use crate::message::{DecodeContext, ReceivedMessage, RetrieveResponse, decode_batch};
use crate::persistence::MessageStore;
use crate::utils::error::RetrievalError;

/// What happened to one retrieval response.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Records in the response.
    pub received: usize,
    /// Records dropped because their payload did not decode.
    pub invalid: usize,
    /// Records dropped because their hash was already stored.
    pub duplicates: usize,
    /// Messages seen for the first time, in response order.
    pub new_messages: Vec<ReceivedMessage>,
    /// The node has more messages to hand out.
    pub more: bool,
}

pub fn process_response(
    store: &MessageStore,
    context: &DecodeContext,
    body: &[u8],
) -> Result<IngestReport, RetrievalError> {
    let response = RetrieveResponse::from_slice(body)?;
    let batch = decode_batch(&response.messages, context);

    let mut report = IngestReport {
        received: response.messages.len(),
        invalid: batch.failures.len(),
        more: response.more,
        ..IngestReport::default()
    };

    let infos: Vec<_> = batch.messages.iter().map(ReceivedMessage::info).collect();
    let inserted = store.insert_all(&infos)?;

    for (message, is_new) in batch.messages.into_iter().zip(inserted) {
        if is_new {
            report.new_messages.push(message);
        } else {
            report.duplicates += 1;
        }
    }

    tracing::info!(
        snode = %context.snode,
        namespace = %context.namespace,
        received = report.received,
        new = report.new_messages.len(),
        duplicates = report.duplicates,
        invalid = report.invalid,
        "Processed retrieval response"
    );

    Ok(report)
}
