use serde::Deserialize;

use crate::message::{DecodeContext, Namespace, Snode};

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
    pub retrieval: RetrievalSettings,
}

/// Where received-message records are kept and how many per namespace.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
    /// `0` disables the cap.
    pub max_messages_per_namespace: usize,
}

impl StoreSettings {
    pub fn message_cap(&self) -> Option<usize> {
        match self.max_messages_per_namespace {
            0 => None,
            max => Some(max),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// The swarm, namespace and node that ingested responses were read from.
#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalSettings {
    pub swarm_public_key: String,
    pub namespace: i32,
    pub snode_ip: String,
    pub snode_port: u16,
    pub snode_ed25519_pubkey: String,
}

impl RetrievalSettings {
    pub fn decode_context(&self) -> DecodeContext {
        DecodeContext {
            snode: Snode::new(
                self.snode_ip.clone(),
                self.snode_port,
                self.snode_ed25519_pubkey.clone(),
            ),
            swarm_public_key: self.swarm_public_key.clone(),
            namespace: Namespace::from(self.namespace),
        }
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub store: Option<PartialStoreSettings>,
    pub logging: Option<PartialLoggingSettings>,
    pub retrieval: Option<PartialRetrievalSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
    pub max_messages_per_namespace: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRetrievalSettings {
    pub swarm_public_key: Option<String>,
    pub namespace: Option<i32>,
    pub snode_ip: Option<String>,
    pub snode_port: Option<u16>,
    pub snode_ed25519_pubkey: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                path: "inbox_db".to_string(),
                max_messages_per_namespace: 10_000,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
            retrieval: RetrievalSettings {
                swarm_public_key: String::new(),
                namespace: 0,
                snode_ip: "127.0.0.1".to_string(),
                snode_port: 22021,
                snode_ed25519_pubkey: String::new(),
            },
        }
    }
}
