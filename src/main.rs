use std::process::ExitCode;

use chrono::Utc;
use snode_inbox::config::load_config;
use snode_inbox::persistence::MessageStore;
use snode_inbox::retrieval::process_response;
use snode_inbox::utils::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging.level);

    let store = match MessageStore::open(&config.store.path, config.store.message_cap()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(path = %config.store.path, error = %e, "Failed to open message store");
            return ExitCode::FAILURE;
        }
    };
    let context = config.retrieval.decode_context();

    let mut failed = false;
    for path in std::env::args().skip(1) {
        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%path, error = %e, "Failed to read response file");
                failed = true;
                continue;
            }
        };

        match process_response(&store, &context, &body) {
            Ok(report) => {
                for message in &report.new_messages {
                    tracing::debug!(?message, "New message");
                }
                if report.more {
                    tracing::info!(%path, "Node reported more messages available");
                }
            }
            Err(e) => {
                tracing::error!(%path, error = %e, "Failed to process response");
                failed = true;
            }
        }
    }

    match store.prune_expired(Utc::now().timestamp_millis()) {
        Ok(removed) => tracing::info!(removed, "Pruned expired messages"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to prune expired messages");
            failed = true;
        }
    }

    if let Err(e) = store.flush() {
        tracing::error!(error = %e, "Failed to flush message store");
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
