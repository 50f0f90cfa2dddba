//! Store doubles for unit tests.

use crate::errors::StoreError;
use crate::models::{Team, UserCounter};
use crate::store::{CounterStore, DocumentStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

/// Holds every team read until `parties` reads are waiting, forcing the
/// interleaving where all of them observe the same base value.
pub struct GatedStore {
    inner: DocumentStore,
    gate: Barrier,
    free_reads: AtomicUsize,
}

impl GatedStore {
    pub fn new(inner: DocumentStore, parties: usize) -> Self {
        Self {
            inner,
            gate: Barrier::new(parties),
            free_reads: AtomicUsize::new(0),
        }
    }

    /// Lets the first `reads` team reads through without waiting, e.g. the
    /// ones a screen makes while mounting.
    pub fn after_reads(self, reads: usize) -> Self {
        self.free_reads.store(reads, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl CounterStore for GatedStore {
    async fn team_count(&self, team: Team) -> Result<Option<u64>, StoreError> {
        let count = self.inner.team_count(team).await?;
        let free = self
            .free_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !free {
            self.gate.wait().await;
        }
        Ok(count)
    }

    async fn set_team_count(&self, team: Team, count: u64) -> Result<(), StoreError> {
        self.inner.set_team_count(team, count).await
    }

    async fn user(&self, team: Team, user_id: &str) -> Result<Option<UserCounter>, StoreError> {
        self.inner.user(team, user_id).await
    }

    async fn put_user(&self, user: &UserCounter) -> Result<(), StoreError> {
        self.inner.put_user(user).await
    }

    async fn set_personal_count(
        &self,
        team: Team,
        user_id: &str,
        count: u64,
    ) -> Result<(), StoreError> {
        self.inner.set_personal_count(team, user_id, count).await
    }

    fn new_user_id(&self) -> String {
        self.inner.new_user_id()
    }
}

/// Rejects every remote call, like a store that is offline.
pub struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "store offline",
    ))
}

#[async_trait]
impl CounterStore for OfflineStore {
    async fn team_count(&self, _team: Team) -> Result<Option<u64>, StoreError> {
        Err(offline())
    }

    async fn set_team_count(&self, _team: Team, _count: u64) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn user(&self, _team: Team, _user_id: &str) -> Result<Option<UserCounter>, StoreError> {
        Err(offline())
    }

    async fn put_user(&self, _user: &UserCounter) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn set_personal_count(
        &self,
        _team: Team,
        _user_id: &str,
        _count: u64,
    ) -> Result<(), StoreError> {
        Err(offline())
    }

    fn new_user_id(&self) -> String {
        "offline".to_string()
    }
}
