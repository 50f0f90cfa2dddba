//! View model behind the clicker screen.
//!
//! Failures here never reach the user: they are logged and the display
//! keeps whatever it showed before.

use crate::counter::CounterService;
use crate::models::{ClickerParams, ClickerView, Team};
use crate::session::SessionStore;
use crate::stats::team_shares;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

#[derive(Debug, Clone, Default)]
struct Display {
    username: String,
    blue: u64,
    red: u64,
    personal: u64,
}

#[derive(Clone)]
pub struct ClickerScreen {
    service: CounterService,
    team: Team,
    user_id: Option<String>,
    display: Arc<Mutex<Display>>,
}

impl ClickerScreen {
    /// Resolves identity from `params`, falling back field by field to the
    /// session cache, then loads the initial counts.
    pub async fn mount(
        service: CounterService,
        params: ClickerParams,
        session: &SessionStore,
    ) -> Self {
        let cached = session.load().await;
        let team = Team::parse_or_default(params.team.or(cached.team).as_deref());
        let user_id = params.user_id.or(cached.user_id);
        let mut display = Display {
            username: params.username.or(cached.username).unwrap_or_default(),
            ..Display::default()
        };

        match &user_id {
            Some(user_id) => {
                let fetched = service
                    .fetch_initial_state(team, user_id, &display.username)
                    .await;
                match fetched {
                    Ok(state) => {
                        display.blue = state.team_blue_count;
                        display.red = state.team_red_count;
                        display.personal = state.personal_count;
                        display.username = state.resolved_username;
                    }
                    Err(err) => error!(%team, %user_id, "error fetching click data: {err}"),
                }
            }
            None => {
                warn!(%team, "no user id available, showing team totals only");
                match service.fetch_team_totals().await {
                    Ok((blue, red)) => {
                        display.blue = blue;
                        display.red = red;
                    }
                    Err(err) => error!(%team, "error fetching click data: {err}"),
                }
            }
        }

        Self {
            service,
            team,
            user_id,
            display: Arc::new(Mutex::new(display)),
        }
    }

    /// One button press. Overlapping taps are not serialized; whichever
    /// completes last sets the displayed counts.
    pub async fn tap(&self) {
        let Some(user_id) = &self.user_id else {
            warn!(team = %self.team, "tap ignored, no user id");
            return;
        };
        let username = self.display.lock().await.username.clone();

        match self
            .service
            .increment_on_tap(self.team, user_id, &username)
            .await
        {
            Ok(result) => {
                let mut display = self.display.lock().await;
                match self.team {
                    Team::Blue => display.blue = result.new_team_count,
                    Team::Red => display.red = result.new_team_count,
                }
                display.personal = result.new_personal_count;
            }
            Err(err) => error!(team = %self.team, %user_id, "error updating document: {err}"),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub async fn view(&self) -> ClickerView {
        let display = self.display.lock().await.clone();
        let shares = team_shares(display.blue, display.red);
        ClickerView {
            team: self.team,
            username: display.username,
            user_id: self.user_id.clone(),
            blue_count: display.blue,
            red_count: display.red,
            personal_count: display.personal,
            blue_percent: shares.blue,
            red_percent: shares.red,
            color: self.team.color().to_string(),
        }
    }
}
