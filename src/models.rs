use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::warn;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    Blue,
    Red,
}

#[derive(Debug, Error)]
#[error("unknown team {0:?}")]
pub struct UnknownTeam(pub String);

impl Team {
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Team::Blue => "#3498db",
            Team::Red => "#e74c3c",
        }
    }

    /// Lenient parse used for theming: anything unrecognized is logged and
    /// treated as blue.
    pub fn parse_or_default(raw: Option<&str>) -> Team {
        match raw.map(str::parse::<Team>) {
            Some(Ok(team)) => team,
            Some(Err(err)) => {
                warn!("{err}, falling back to {}", Team::default());
                Team::default()
            }
            None => {
                warn!("no team available, falling back to {}", Team::default());
                Team::default()
            }
        }
    }
}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "blue" => Ok(Team::Blue),
            "red" => Ok(Team::Red),
            other => Err(UnknownTeam(other.to_string())),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounter {
    pub user_id: String,
    pub display_name: String,
    pub team: Team,
    pub personal_count: u64,
    pub created_at: String,
}

impl UserCounter {
    pub fn new(team: Team, user_id: &str, display_name: &str, personal_count: u64) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            team,
            personal_count,
            created_at: now_iso(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub team: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    pub team_blue_count: u64,
    pub team_red_count: u64,
    pub personal_count: u64,
    pub resolved_username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TapResult {
    pub new_team_count: u64,
    pub new_personal_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub team: Team,
    pub username: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub team: Option<String>,
    #[serde(default)]
    pub username: String,
}

/// Parameters handed from the selection screen to the clicker screen.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickerParams {
    pub team: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickerView {
    pub team: Team,
    pub username: String,
    pub user_id: Option<String>,
    pub blue_count: u64,
    pub red_count: u64,
    pub personal_count: u64,
    pub blue_percent: f64,
    pub red_percent: f64,
    pub color: String,
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
