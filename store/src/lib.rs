//! In-memory roster of tracked accounts and its durable JSON snapshot.
//!
//! The roster maps a Discord user to the accounts they registered, keyed by
//! riot id. Mutations rewrite the whole snapshot through a [`SnapshotIo`];
//! the poll loop is the single writer while slash commands read concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;

use poise::serenity_prelude::UserId;
use riftwatch_shared::TrackedAccount;
use riftwatch_shared::traits::{SnapshotIo, SnapshotIoError};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

mod file;
pub use file::SnapshotFile;

/// Durable form of the roster: user -> riot id -> tracked account.
pub type Roster = BTreeMap<UserId, BTreeMap<String, TrackedAccount>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account {riot_id} is already tracked for this user")]
    AlreadyTracked { riot_id: String },

    #[error("account {riot_id} is not tracked for this user")]
    NotTracked { riot_id: String },

    #[error("snapshot I/O failed: {0}")]
    Io(#[source] SnapshotIoError),

    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Thread-safe handle to the tracked roster shared across async tasks.
#[derive(Debug, Clone)]
pub struct SharedPlayerStore {
    roster: Arc<RwLock<Roster>>,
    io: Arc<dyn SnapshotIo>,
}

impl SharedPlayerStore {
    /// Load the roster from durable storage. An absent or unreadable
    /// snapshot initializes an empty roster, which is persisted right away.
    pub async fn load(io: Arc<dyn SnapshotIo>) -> Result<Self, StoreError> {
        let roster = match io.read_all().await.map_err(StoreError::Io)? {
            Some(bytes) => match serde_json::from_slice::<Roster>(&bytes) {
                Ok(roster) => {
                    info!("loaded {} tracked user(s) from snapshot", roster.len());
                    roster
                }
                Err(e) => {
                    warn!("snapshot unreadable, starting from an empty roster: {e}");
                    Roster::new()
                }
            },
            None => {
                info!("no snapshot found, starting from an empty roster");
                Roster::new()
            }
        };

        let store = Self {
            roster: Arc::new(RwLock::new(roster)),
            io,
        };
        store.save().await?;
        Ok(store)
    }

    /// Persist the full roster, replacing the previous snapshot wholesale.
    pub async fn save(&self) -> Result<(), StoreError> {
        let bytes = {
            let roster = self.roster.read().await;
            serde_json::to_vec_pretty(&*roster)?
        };
        self.io.write_all(bytes).await.map_err(StoreError::Io)
    }

    /// Start tracking an account for a user. Persists on success.
    pub async fn register(
        &self,
        user: UserId,
        account: TrackedAccount,
    ) -> Result<(), StoreError> {
        {
            let mut roster = self.roster.write().await;
            let riot_id = account.riot_id();
            let accounts = roster.entry(user).or_default();
            if accounts.contains_key(&riot_id) {
                return Err(StoreError::AlreadyTracked { riot_id });
            }
            accounts.insert(riot_id, account);
        }
        self.save().await
    }

    /// Stop tracking an account. The user entry disappears with its last
    /// account. Persists on success.
    pub async fn unregister(
        &self,
        user: UserId,
        riot_id: &str,
    ) -> Result<TrackedAccount, StoreError> {
        let removed = {
            let mut roster = self.roster.write().await;
            let Some(accounts) = roster.get_mut(&user) else {
                return Err(StoreError::NotTracked {
                    riot_id: riot_id.to_string(),
                });
            };
            let Some(removed) = accounts.remove(riot_id) else {
                return Err(StoreError::NotTracked {
                    riot_id: riot_id.to_string(),
                });
            };
            if accounts.is_empty() {
                roster.remove(&user);
            }
            removed
        };
        self.save().await?;
        Ok(removed)
    }

    /// The accounts a user registered, if any.
    pub async fn accounts_of(&self, user: UserId) -> Option<BTreeMap<String, TrackedAccount>> {
        self.roster.read().await.get(&user).cloned()
    }

    /// Snapshot of every tracked account, cloned out for one poll tick.
    pub async fn all_accounts(&self) -> Vec<(UserId, TrackedAccount)> {
        self.roster
            .read()
            .await
            .iter()
            .flat_map(|(user, accounts)| {
                accounts.values().map(|account| (*user, account.clone()))
            })
            .collect()
    }

    /// Overwrite one account in memory only. The poll loop calls [`save`]
    /// once per tick after the whole roster is processed.
    ///
    /// [`save`]: SharedPlayerStore::save
    pub async fn commit(&self, user: UserId, account: TrackedAccount) {
        let mut roster = self.roster.write().await;
        roster
            .entry(user)
            .or_default()
            .insert(account.riot_id(), account);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use riftwatch_shared::Region;
    use std::sync::Mutex;

    /// In-memory SnapshotIo double exposing the last written document.
    #[derive(Debug, Default)]
    struct MemorySnapshot {
        cell: Mutex<Option<Vec<u8>>>,
    }

    #[async_trait]
    impl SnapshotIo for MemorySnapshot {
        async fn read_all(&self) -> Result<Option<Vec<u8>>, SnapshotIoError> {
            Ok(self.cell.lock().unwrap().clone())
        }

        async fn write_all(&self, bytes: Vec<u8>) -> Result<(), SnapshotIoError> {
            *self.cell.lock().unwrap() = Some(bytes);
            Ok(())
        }
    }

    fn sample_account(name: &str) -> TrackedAccount {
        TrackedAccount {
            game_name: name.to_string(),
            tag_line: "EUW".to_string(),
            region: Region::Euw,
            puuid: format!("puuid-{name}"),
            summoner_id: format!("summoner-{name}"),
            last_match_id: None,
            rank_entries: BTreeMap::new(),
            streaks: BTreeMap::new(),
            last_queue: None,
        }
    }

    #[tokio::test]
    async fn registering_twice_fails() {
        let store = SharedPlayerStore::load(Arc::new(MemorySnapshot::default()))
            .await
            .unwrap();
        let user = UserId::new(1);

        store.register(user, sample_account("Game")).await.unwrap();
        let result = store.register(user, sample_account("Game")).await;

        assert!(matches!(result, Err(StoreError::AlreadyTracked { .. })));
    }

    #[tokio::test]
    async fn unregistering_the_last_account_drops_the_user() {
        let store = SharedPlayerStore::load(Arc::new(MemorySnapshot::default()))
            .await
            .unwrap();
        let user = UserId::new(1);

        store.register(user, sample_account("Game")).await.unwrap();
        store.unregister(user, "Game#EUW").await.unwrap();

        assert!(store.accounts_of(user).await.is_none());
        assert!(matches!(
            store.unregister(user, "Game#EUW").await,
            Err(StoreError::NotTracked { .. })
        ));
    }

    #[tokio::test]
    async fn corrupt_snapshot_initializes_an_empty_persisted_roster() {
        let io = Arc::new(MemorySnapshot {
            cell: Mutex::new(Some(b"{ not json".to_vec())),
        });

        let store = SharedPlayerStore::load(io.clone()).await.unwrap();

        assert!(store.all_accounts().await.is_empty());
        // The empty state replaced the corrupt document.
        let persisted = io.cell.lock().unwrap().clone().unwrap();
        let roster: Roster = serde_json::from_slice(&persisted).unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn persisted_roster_survives_a_reload() {
        let io = Arc::new(MemorySnapshot::default());
        let user = UserId::new(42);

        {
            let store = SharedPlayerStore::load(io.clone()).await.unwrap();
            store.register(user, sample_account("Game")).await.unwrap();
            store.register(user, sample_account("Smurf")).await.unwrap();
        }

        let reloaded = SharedPlayerStore::load(io).await.unwrap();
        let accounts = reloaded.accounts_of(user).await.unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts["Game#EUW"].puuid, "puuid-Game");
    }

    #[tokio::test]
    async fn commit_overwrites_in_memory_without_persisting() {
        let io = Arc::new(MemorySnapshot::default());
        let store = SharedPlayerStore::load(io.clone()).await.unwrap();
        let user = UserId::new(7);

        store.register(user, sample_account("Game")).await.unwrap();

        let mut updated = sample_account("Game");
        updated.last_match_id = Some("EUW1_123".to_string());
        store.commit(user, updated).await;

        let in_memory = store.accounts_of(user).await.unwrap();
        assert_eq!(
            in_memory["Game#EUW"].last_match_id.as_deref(),
            Some("EUW1_123")
        );

        // Not yet on disk until the tick-level save.
        let persisted = io.cell.lock().unwrap().clone().unwrap();
        let roster: Roster = serde_json::from_slice(&persisted).unwrap();
        assert_eq!(roster[&user]["Game#EUW"].last_match_id, None);

        store.save().await.unwrap();
        let persisted = io.cell.lock().unwrap().clone().unwrap();
        let roster: Roster = serde_json::from_slice(&persisted).unwrap();
        assert_eq!(
            roster[&user]["Game#EUW"].last_match_id.as_deref(),
            Some("EUW1_123")
        );
    }
}
