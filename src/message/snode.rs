use serde::{Deserialize, Serialize};
use std::fmt;

/// The storage node that served a message.
///
/// Only kept as provenance; nothing about a message is validated against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snode {
    pub ip: String,
    pub port: u16,
    pub ed25519_pubkey: String,
}

impl Snode {
    pub fn new(ip: impl Into<String>, port: u16, ed25519_pubkey: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port,
            ed25519_pubkey: ed25519_pubkey.into(),
        }
    }
}

impl fmt::Display for Snode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}
