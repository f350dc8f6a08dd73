//! Property-based tests for message decoding.
//!
//! - Any valid base64 payload decodes to the bytes it encodes
//! - Any payload with a character outside the alphabet is rejected
//! - Context and raw fields pass through untouched
//! - Explicit expirations are kept, missing ones are derived from the timestamp

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use proptest::prelude::*;
use proptest::sample::Index;

use crate::message::{
    DEFAULT_EXPIRATION_MS, DecodeContext, Namespace, RawMessage, ReceivedMessage, Snode,
    decode_batch,
};
use crate::utils::error::DecodeError;

fn context_strategy() -> impl Strategy<Value = DecodeContext> {
    (
        "[0-9]{1,3}(\\.[0-9]{1,3}){3}",
        any::<u16>(),
        "[0-9a-f]{64}",
        "05[0-9a-f]{64}",
        any::<i32>(),
    )
        .prop_map(|(ip, port, key, swarm, namespace)| DecodeContext {
            snode: Snode::new(ip, port, key),
            swarm_public_key: swarm,
            namespace: Namespace::from(namespace),
        })
}

fn raw(base64_data: String, hash: String, timestamp_ms: i64, expiration: Option<i64>) -> RawMessage {
    RawMessage {
        base64_data,
        hash,
        timestamp_ms,
        expiration,
    }
}

proptest! {
    /// Encoding arbitrary bytes and decoding the record gives the bytes back.
    #[test]
    fn decode_roundtrips_payload(
        data in prop::collection::vec(any::<u8>(), 0..512),
        hash in "[A-Za-z0-9+/]{43}",
        timestamp_ms in any::<i64>(),
        context in context_strategy(),
    ) {
        let msg = ReceivedMessage::decode(
            &raw(BASE64.encode(&data), hash, timestamp_ms, None),
            &context,
        ).unwrap();
        prop_assert_eq!(msg.data(), data.as_slice());
    }

    /// Inserting a character outside the base64 alphabet always fails.
    #[test]
    fn decode_rejects_foreign_characters(
        valid in "[A-Za-z0-9+/]{0,64}",
        bad in "[!@#%*.,:;?_ -]",
        pos in any::<Index>(),
        hash in "[a-z0-9]{1,16}",
    ) {
        let mut payload = valid;
        payload.insert_str(pos.index(payload.len() + 1), &bad);

        let err = ReceivedMessage::decode(&raw(payload, hash.clone(), 0, None), &default_context())
            .unwrap_err();
        match err {
            DecodeError::InvalidEncoding { hash: failed, .. } => prop_assert_eq!(failed, hash),
        }
    }

    /// A payload whose length leaves one trailing symbol can never be decoded.
    #[test]
    fn decode_rejects_truncated_quantum(payload in "([A-Za-z0-9+/]{4}){0,16}[A-Za-z0-9+/]") {
        prop_assert!(ReceivedMessage::decode(&raw(payload, "h".into(), 0, None), &default_context()).is_err());
    }

    /// Hash, timestamp and every context field are carried over unchanged.
    #[test]
    fn decode_passes_fields_through(
        hash in ".{0,64}",
        timestamp_ms in any::<i64>(),
        expiration in any::<i64>(),
        context in context_strategy(),
    ) {
        let msg = ReceivedMessage::decode(
            &raw("AA==".into(), hash.clone(), timestamp_ms, Some(expiration)),
            &context,
        ).unwrap();
        prop_assert_eq!(msg.hash(), hash.as_str());
        prop_assert_eq!(msg.timestamp_ms(), timestamp_ms);
        prop_assert_eq!(msg.swarm_public_key(), context.swarm_public_key.as_str());
        prop_assert_eq!(msg.namespace().value(), context.namespace.value());
        prop_assert_eq!(msg.snode(), &context.snode);
    }

    /// An explicit expiration is kept exactly as sent.
    #[test]
    fn explicit_expiration_is_kept(timestamp_ms in any::<i64>(), expiration in any::<i64>()) {
        let msg = ReceivedMessage::decode(
            &raw(String::new(), "h".into(), timestamp_ms, Some(expiration)),
            &default_context(),
        ).unwrap();
        prop_assert_eq!(msg.expiration_date_ms(), expiration);
    }

    /// A missing expiration is the sender timestamp plus the default window.
    #[test]
    fn default_expiration_follows_timestamp(timestamp_ms in any::<i64>()) {
        let msg = ReceivedMessage::decode(
            &raw(String::new(), "h".into(), timestamp_ms, None),
            &default_context(),
        ).unwrap();
        prop_assert_eq!(
            msg.expiration_date_ms(),
            timestamp_ms.saturating_add(DEFAULT_EXPIRATION_MS)
        );
    }

    /// Batch decoding keeps exactly the decodable records, in input order.
    #[test]
    fn batch_keeps_valid_records_in_order(valid in prop::collection::vec(any::<bool>(), 0..32)) {
        let input: Vec<_> = valid
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let payload = if *ok { BASE64.encode([i as u8]) } else { "!".to_string() };
                raw(payload, i.to_string(), 0, None)
            })
            .collect();

        let batch = decode_batch(&input, &default_context());

        let expected: Vec<String> = valid
            .iter()
            .enumerate()
            .filter(|(_, ok)| **ok)
            .map(|(i, _)| i.to_string())
            .collect();
        let decoded: Vec<String> = batch.messages.iter().map(|m| m.hash().to_string()).collect();
        prop_assert_eq!(decoded, expected);
        prop_assert_eq!(batch.len(), valid.len());
    }
}

fn default_context() -> DecodeContext {
    DecodeContext {
        snode: Snode::new("127.0.0.1", 22021, "key"),
        swarm_public_key: "05swarm".to_string(),
        namespace: Namespace::Default,
    }
}
