//! Counter persistence.
//!
//! The service talks to a [`CounterStore`] in plain integers. The bundled
//! [`DocumentStore`] keeps the historical document layout on disk, where
//! every counter is a numeric string:
//!
//! ```text
//! interactions/{team}                 { click, team }
//! interactions/{team}/user/{userId}   { name, personalClick, team, createdAt }
//! ```

use crate::errors::StoreError;
use crate::models::{Team, UserCounter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

/// Remote counter storage. Each call is a single read or a single write;
/// nothing here spans a read-modify-write.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// `None` when the team document or its `click` field does not exist.
    async fn team_count(&self, team: Team) -> Result<Option<u64>, StoreError>;

    async fn set_team_count(&self, team: Team, count: u64) -> Result<(), StoreError>;

    async fn user(&self, team: Team, user_id: &str) -> Result<Option<UserCounter>, StoreError>;

    /// Creates or replaces the whole user record.
    async fn put_user(&self, user: &UserCounter) -> Result<(), StoreError>;

    /// Overwrites only the personal count of an existing user record.
    async fn set_personal_count(
        &self,
        team: Team,
        user_id: &str,
        count: u64,
    ) -> Result<(), StoreError>;

    fn new_user_id(&self) -> String;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Documents {
    #[serde(default)]
    pub interactions: BTreeMap<String, TeamDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user: BTreeMap<String, UserDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub name: String,
    pub personal_click: String,
    pub team: String,
    pub created_at: String,
}

/// JSON-file backed document store. Without a path it lives only in memory.
#[derive(Clone)]
pub struct DocumentStore {
    path: Option<PathBuf>,
    docs: Arc<Mutex<Documents>>,
}

impl DocumentStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            docs: Arc::new(Mutex::new(Documents::default())),
        }
    }

    pub async fn open(path: PathBuf) -> Self {
        let docs = load_documents(&path).await;
        Self {
            path: Some(path),
            docs: Arc::new(Mutex::new(docs)),
        }
    }

    pub async fn snapshot(&self) -> Documents {
        self.docs.lock().await.clone()
    }

    async fn persist(&self, docs: &Documents) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(docs)?;
        fs::write(path, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for DocumentStore {
    async fn team_count(&self, team: Team) -> Result<Option<u64>, StoreError> {
        let docs = self.docs.lock().await;
        docs.interactions
            .get(team.as_str())
            .and_then(|doc| doc.click.as_deref())
            .map(|raw| decode_count("click", raw))
            .transpose()
    }

    async fn set_team_count(&self, team: Team, count: u64) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().await;
        let doc = docs.interactions.entry(team.as_str().to_string()).or_default();
        doc.click = Some(encode_count(count));
        doc.team.get_or_insert_with(|| team.as_str().to_string());
        debug!(%team, count, "team counter written");
        self.persist(&docs).await
    }

    async fn user(&self, team: Team, user_id: &str) -> Result<Option<UserCounter>, StoreError> {
        let docs = self.docs.lock().await;
        let Some(doc) = docs
            .interactions
            .get(team.as_str())
            .and_then(|team_doc| team_doc.user.get(user_id))
        else {
            return Ok(None);
        };

        Ok(Some(UserCounter {
            user_id: user_id.to_string(),
            display_name: doc.name.clone(),
            team,
            personal_count: decode_count("personalClick", &doc.personal_click)?,
            created_at: doc.created_at.clone(),
        }))
    }

    async fn put_user(&self, user: &UserCounter) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().await;
        docs.interactions
            .entry(user.team.as_str().to_string())
            .or_default()
            .user
            .insert(
                user.user_id.clone(),
                UserDocument {
                    name: user.display_name.clone(),
                    personal_click: encode_count(user.personal_count),
                    team: user.team.as_str().to_string(),
                    created_at: user.created_at.clone(),
                },
            );
        debug!(team = %user.team, user_id = %user.user_id, "user record written");
        self.persist(&docs).await
    }

    async fn set_personal_count(
        &self,
        team: Team,
        user_id: &str,
        count: u64,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().await;
        let doc = docs
            .interactions
            .get_mut(team.as_str())
            .and_then(|team_doc| team_doc.user.get_mut(user_id))
            .ok_or_else(|| StoreError::NotFound(format!("interactions/{team}/user/{user_id}")))?;
        doc.personal_click = encode_count(count);
        self.persist(&docs).await
    }

    fn new_user_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

fn encode_count(count: u64) -> String {
    count.to_string()
}

fn decode_count(field: &'static str, raw: &str) -> Result<u64, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| StoreError::CorruptCounter {
        field,
        value: raw.to_string(),
    })
}

async fn load_documents(path: &Path) -> Documents {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(docs) => docs,
            Err(err) => {
                error!("failed to parse document file: {err}");
                Documents::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Documents::default(),
        Err(err) => {
            error!("failed to read document file: {err}");
            Documents::default()
        }
    }
}
