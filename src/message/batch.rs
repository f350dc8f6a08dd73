use crate::message::raw::RawMessage;
use crate::message::received::{DecodeContext, ReceivedMessage};
use crate::utils::error::DecodeError;

/// A record of a batch that could not be decoded.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the record in the input slice.
    pub index: usize,
    pub error: DecodeError,
}

/// Result of decoding every record of one retrieval response.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    /// Decoded messages, in input order.
    pub messages: Vec<ReceivedMessage>,
    pub failures: Vec<BatchFailure>,
}

impl DecodedBatch {
    pub fn len(&self) -> usize {
        self.messages.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decodes each raw record independently. A bad record is skipped and
/// reported in `failures`; it never stops the rest of the batch.
pub fn decode_batch(raw: &[RawMessage], context: &DecodeContext) -> DecodedBatch {
    let mut batch = DecodedBatch {
        messages: Vec::with_capacity(raw.len()),
        failures: Vec::new(),
    };

    for (index, message) in raw.iter().enumerate() {
        match ReceivedMessage::decode(message, context) {
            Ok(decoded) => batch.messages.push(decoded),
            Err(error) => batch.failures.push(BatchFailure { index, error }),
        }
    }

    if !batch.failures.is_empty() {
        tracing::warn!(
            total = raw.len(),
            failed = batch.failures.len(),
            "Dropped undecodable messages from batch"
        );
    }

    batch
}
