//! Local key-value cache of the active user's identity.

use crate::errors::StoreError;
use crate::models::SessionState;
use std::{collections::BTreeMap, path::Path, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

pub const SELECTED_TEAM_KEY: &str = "selectedTeam";
pub const USER_TEAM_KEY: &str = "userTeam";
pub const USERNAME_KEY: &str = "username";
pub const USER_ID_KEY: &str = "userId";

// Both team keys are written and cleared; installs in the wild may carry either.
const ALL_KEYS: [&str; 4] = [SELECTED_TEAM_KEY, USERNAME_KEY, USER_ID_KEY, USER_TEAM_KEY];

#[derive(Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub async fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path).await;
        Self {
            path: Some(path),
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub async fn save(&self, team: &str, username: &str, user_id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        for (key, value) in [
            (SELECTED_TEAM_KEY, team),
            (USERNAME_KEY, username),
            (USER_ID_KEY, user_id),
            (USER_TEAM_KEY, team),
        ] {
            entries.insert(key.to_string(), value.to_string());
        }
        debug!(team, username, user_id, "session saved");
        self.persist(&entries).await
    }

    pub async fn load(&self) -> SessionState {
        let entries = self.entries.lock().await;
        SessionState {
            team: entries
                .get(SELECTED_TEAM_KEY)
                .or_else(|| entries.get(USER_TEAM_KEY))
                .cloned(),
            username: entries.get(USERNAME_KEY).cloned(),
            user_id: entries.get(USER_ID_KEY).cloned(),
        }
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        for key in ALL_KEYS {
            entries.remove(key);
        }
        debug!("session cleared");
        self.persist(&entries).await
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(entries)?;
        fs::write(path, payload).await?;
        Ok(())
    }

    #[cfg(test)]
    async fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse session file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read session file: {err}");
            BTreeMap::new()
        }
    }
}
