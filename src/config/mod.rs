mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, RetrievalSettings, Settings, StoreSettings};

/// Loads `config/default` (if present) and `INBOX__*` environment variables
/// and merges them over the default settings.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("INBOX")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(merge(partial, Settings::default()))
}

fn merge(partial: PartialSettings, default: Settings) -> Settings {
    let store = partial.store;
    let logging = partial.logging;
    let retrieval = partial.retrieval;

    Settings {
        store: StoreSettings {
            path: store
                .as_ref()
                .and_then(|s| s.path.clone())
                .unwrap_or(default.store.path),
            max_messages_per_namespace: store
                .as_ref()
                .and_then(|s| s.max_messages_per_namespace)
                .unwrap_or(default.store.max_messages_per_namespace),
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
        retrieval: RetrievalSettings {
            swarm_public_key: retrieval
                .as_ref()
                .and_then(|r| r.swarm_public_key.clone())
                .unwrap_or(default.retrieval.swarm_public_key),
            namespace: retrieval
                .as_ref()
                .and_then(|r| r.namespace)
                .unwrap_or(default.retrieval.namespace),
            snode_ip: retrieval
                .as_ref()
                .and_then(|r| r.snode_ip.clone())
                .unwrap_or(default.retrieval.snode_ip),
            snode_port: retrieval
                .as_ref()
                .and_then(|r| r.snode_port)
                .unwrap_or(default.retrieval.snode_port),
            snode_ed25519_pubkey: retrieval
                .as_ref()
                .and_then(|r| r.snode_ed25519_pubkey.clone())
                .unwrap_or(default.retrieval.snode_ed25519_pubkey),
        },
    }
}
