use sled::{Db, Tree};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::message::{Namespace, ReceivedMessageInfo};
use crate::utils::error::StoreError;

/// Known message hashes, one tree per swarm and namespace.
///
/// Keys are message hashes, values are JSON-encoded `ReceivedMessageInfo`.
#[derive(Clone)]
pub struct MessageStore {
    db: Db,
    max_messages_per_namespace: Option<usize>,
}

impl MessageStore {
    /// Open or create a sled database at `path`.
    pub fn open(
        path: impl AsRef<Path>,
        max_messages_per_namespace: Option<usize>,
    ) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self {
            db,
            max_messages_per_namespace,
        })
    }

    fn tree(&self, swarm_public_key: &str, namespace: Namespace) -> Result<Tree, StoreError> {
        Ok(self.db.open_tree(tree_name(swarm_public_key, namespace))?)
    }

    /// Records `info` unless its hash is already known. Returns whether it
    /// was new.
    pub fn insert_if_new(&self, info: &ReceivedMessageInfo) -> Result<bool, StoreError> {
        let inserted = self.insert_all(std::slice::from_ref(info))?;
        Ok(inserted.first().copied().unwrap_or(false))
    }

    /// Records every info whose hash is not yet known and returns, per input,
    /// whether it was new.
    ///
    /// The per-namespace cap is checked once per touched namespace after the
    /// whole batch is written. Hashes written by this call are never evicted
    /// by it, so a batch larger than the cap leaves the namespace over it
    /// until later inserts or pruning bring it back.
    pub fn insert_all(&self, infos: &[ReceivedMessageInfo]) -> Result<Vec<bool>, StoreError> {
        let mut inserted = Vec::with_capacity(infos.len());
        let mut touched: HashMap<String, (Tree, HashSet<&[u8]>)> = HashMap::new();

        for info in infos {
            let name = tree_name(&info.swarm_public_key, info.namespace);
            let (tree, fresh) = match touched.entry(name) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let tree = self.db.open_tree(entry.key())?;
                    entry.insert((tree, HashSet::new()))
                }
            };

            let value = serde_json::to_vec(info)?;
            let is_new = tree
                .compare_and_swap(info.hash.as_bytes(), None as Option<&[u8]>, Some(value))?
                .is_ok();
            if is_new {
                fresh.insert(info.hash.as_bytes());
            }
            inserted.push(is_new);
        }

        for (tree, fresh) in touched.values() {
            if !fresh.is_empty() {
                self.enforce_limit(tree, fresh)?;
            }
        }
        Ok(inserted)
    }

    pub fn contains(
        &self,
        swarm_public_key: &str,
        namespace: Namespace,
        hash: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .tree(swarm_public_key, namespace)?
            .contains_key(hash.as_bytes())?)
    }

    pub fn get(
        &self,
        swarm_public_key: &str,
        namespace: Namespace,
        hash: &str,
    ) -> Result<Option<ReceivedMessageInfo>, StoreError> {
        match self.tree(swarm_public_key, namespace)?.get(hash.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    /// Forgets a hash, e.g. after the node confirmed its deletion.
    pub fn remove(
        &self,
        swarm_public_key: &str,
        namespace: Namespace,
        hash: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .tree(swarm_public_key, namespace)?
            .remove(hash.as_bytes())?
            .is_some())
    }

    pub fn known_hashes(
        &self,
        swarm_public_key: &str,
        namespace: Namespace,
    ) -> Result<Vec<String>, StoreError> {
        let mut hashes = Vec::new();
        for key in self.tree(swarm_public_key, namespace)?.iter().keys() {
            hashes.push(String::from_utf8_lossy(&key?).into_owned());
        }
        Ok(hashes)
    }

    pub fn len(&self, swarm_public_key: &str, namespace: Namespace) -> Result<usize, StoreError> {
        Ok(self.tree(swarm_public_key, namespace)?.len())
    }

    /// Removes every record whose expiration is at or before `now_ms`, across
    /// all swarms and namespaces. Returns how many were removed.
    pub fn prune_expired(&self, now_ms: i64) -> Result<usize, StoreError> {
        let mut removed = 0;

        for name in self.db.tree_names() {
            if !name.starts_with(TREE_PREFIX.as_bytes()) {
                continue;
            }
            let tree = self.db.open_tree(&name)?;

            let mut expired_keys = Vec::new();
            for entry in tree.iter() {
                let (key, value) = entry?;
                match serde_json::from_slice::<ReceivedMessageInfo>(&value) {
                    Ok(info) if info.is_expired(now_ms) => expired_keys.push(key),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Dropping unreadable message record");
                        expired_keys.push(key);
                    }
                }
            }

            for key in expired_keys {
                if tree.remove(key)?.is_some() {
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "Pruned expired message records");
        }
        Ok(removed)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Evicts the records closest to expiring once a tree exceeds the cap,
    /// skipping the hashes in `keep`.
    fn enforce_limit(&self, tree: &Tree, keep: &HashSet<&[u8]>) -> Result<(), StoreError> {
        let Some(max) = self.max_messages_per_namespace else {
            return Ok(());
        };

        let mut total = 0;
        let mut candidates = Vec::new();
        for entry in tree.iter() {
            let (key, value) = entry?;
            total += 1;
            if keep.contains(&*key) {
                continue;
            }
            let expiration = serde_json::from_slice::<ReceivedMessageInfo>(&value)
                .map(|info| info.expiration_date_ms)
                .unwrap_or(i64::MIN);
            candidates.push((expiration, key));
        }
        if total <= max {
            return Ok(());
        }
        candidates.sort_by_key(|(expiration, _)| *expiration);

        for (_, key) in candidates.into_iter().take(total - max) {
            tree.remove(key)?;
        }
        Ok(())
    }
}

const TREE_PREFIX: &str = "messages/";

fn tree_name(swarm_public_key: &str, namespace: Namespace) -> String {
    format!("{TREE_PREFIX}{swarm_public_key}/{namespace}")
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("db", &"sled::Db")
            .field("max_messages_per_namespace", &self.max_messages_per_namespace)
            .finish()
    }
}
