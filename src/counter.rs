//! Read-increment-write logic against the team and user counters.
//!
//! Every increment is a plain read followed by a plain overwrite. Two taps
//! that read the same base value both write `base + 1` and one of them is
//! lost. [`CounterService::increment_on_tap`] is the only place that pattern
//! lives, so swapping in an atomic increment or a transaction touches just
//! that method.

use crate::errors::{RegisterError, StoreError};
use crate::models::{InitialState, Registration, TapResult, Team, UserCounter};
use crate::session::SessionStore;
use crate::store::CounterStore;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CounterService {
    store: Arc<dyn CounterStore>,
}

impl CounterService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Blue and red totals, with a missing counter reading as zero.
    pub async fn fetch_team_totals(&self) -> Result<(u64, u64), StoreError> {
        let blue = self.store.team_count(Team::Blue).await?.unwrap_or(0);
        let red = self.store.team_count(Team::Red).await?.unwrap_or(0);
        Ok((blue, red))
    }

    /// Loads everything the clicker screen shows on mount. A user record
    /// that does not exist yet is created with a zero count.
    pub async fn fetch_initial_state(
        &self,
        team: Team,
        user_id: &str,
        username: &str,
    ) -> Result<InitialState, StoreError> {
        let (team_blue_count, team_red_count) = self.fetch_team_totals().await?;

        let (personal_count, resolved_username) = match self.store.user(team, user_id).await? {
            Some(user) => (user.personal_count, user.display_name),
            None => {
                info!(%team, user_id, "user record missing, creating it");
                self.store
                    .put_user(&UserCounter::new(team, user_id, username, 0))
                    .await?;
                (0, username.to_string())
            }
        };

        Ok(InitialState {
            team_blue_count,
            team_red_count,
            personal_count,
            resolved_username,
        })
    }

    pub async fn increment_on_tap(
        &self,
        team: Team,
        user_id: &str,
        username: &str,
    ) -> Result<TapResult, StoreError> {
        let new_team_count = match self.store.team_count(team).await? {
            Some(current) => current.saturating_add(1),
            None => 1,
        };
        self.store.set_team_count(team, new_team_count).await?;

        let new_personal_count = match self.store.user(team, user_id).await? {
            Some(user) => {
                let next = user.personal_count.saturating_add(1);
                self.store.set_personal_count(team, user_id, next).await?;
                next
            }
            None => {
                self.store
                    .put_user(&UserCounter::new(team, user_id, username, 1))
                    .await?;
                1
            }
        };

        debug!(%team, user_id, new_team_count, new_personal_count, "tap applied");
        Ok(TapResult {
            new_team_count,
            new_personal_count,
        })
    }

    /// Registers a fresh user and replaces the cached session with it.
    pub async fn register(
        &self,
        session: &SessionStore,
        team: Option<Team>,
        username: &str,
    ) -> Result<Registration, RegisterError> {
        let username = username.trim();
        let Some(team) = team.filter(|_| !username.is_empty()) else {
            return Err(RegisterError::MissingSelection);
        };

        session.clear().await?;

        let user_id = self.store.new_user_id();
        self.store
            .put_user(&UserCounter::new(team, &user_id, username, 0))
            .await?;

        session.save(team.as_str(), username, &user_id).await?;

        info!(%team, username, %user_id, "user registered");
        Ok(Registration {
            team,
            username: username.to_string(),
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;
    use crate::test_support::{GatedStore, OfflineStore};

    fn service_with(store: &DocumentStore) -> CounterService {
        CounterService::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn first_tap_creates_team_counter_at_one() {
        let store = DocumentStore::in_memory();
        let service = service_with(&store);

        let result = service.increment_on_tap(Team::Red, "u1", "Ann").await.unwrap();

        assert_eq!(result.new_team_count, 1);
        assert_eq!(result.new_personal_count, 1);
        assert_eq!(store.team_count(Team::Red).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn tap_on_existing_counter_adds_one() {
        let store = DocumentStore::in_memory();
        store.set_team_count(Team::Blue, 41).await.unwrap();
        let service = service_with(&store);

        let result = service.increment_on_tap(Team::Blue, "u1", "Bob").await.unwrap();

        assert_eq!(result.new_team_count, 42);
        assert_eq!(store.team_count(Team::Blue).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn tap_leaves_other_team_and_users_alone() {
        let store = DocumentStore::in_memory();
        store.set_team_count(Team::Red, 10).await.unwrap();
        store
            .put_user(&UserCounter::new(Team::Blue, "other", "Cy", 4))
            .await
            .unwrap();
        store
            .put_user(&UserCounter::new(Team::Blue, "me", "Bob", 2))
            .await
            .unwrap();
        let service = service_with(&store);

        service.increment_on_tap(Team::Blue, "me", "Bob").await.unwrap();

        assert_eq!(store.team_count(Team::Red).await.unwrap(), Some(10));
        let other = store.user(Team::Blue, "other").await.unwrap().unwrap();
        assert_eq!(other.personal_count, 4);
        let me = store.user(Team::Blue, "me").await.unwrap().unwrap();
        assert_eq!(me.personal_count, 3);
    }

    #[tokio::test]
    async fn initial_fetch_bootstraps_missing_user_once() {
        let store = DocumentStore::in_memory();
        store.set_team_count(Team::Blue, 3).await.unwrap();
        store.set_team_count(Team::Red, 5).await.unwrap();
        let service = service_with(&store);

        let first = service
            .fetch_initial_state(Team::Red, "u1", "Ann")
            .await
            .unwrap();
        assert_eq!(
            first,
            InitialState {
                team_blue_count: 3,
                team_red_count: 5,
                personal_count: 0,
                resolved_username: "Ann".to_string(),
            }
        );
        let created = store.user(Team::Red, "u1").await.unwrap().unwrap();

        service.increment_on_tap(Team::Red, "u1", "Ann").await.unwrap();
        let second = service
            .fetch_initial_state(Team::Red, "u1", "Someone Else")
            .await
            .unwrap();

        assert_eq!(second.personal_count, 1);
        assert_eq!(second.resolved_username, "Ann");
        let docs = store.snapshot().await;
        assert_eq!(docs.interactions["red"].user.len(), 1);
        let stored = store.user(Team::Red, "u1").await.unwrap().unwrap();
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn initial_fetch_treats_missing_team_counters_as_zero() {
        let store = DocumentStore::in_memory();
        let service = service_with(&store);

        let state = service
            .fetch_initial_state(Team::Blue, "u1", "Bob")
            .await
            .unwrap();

        assert_eq!(state.team_blue_count, 0);
        assert_eq!(state.team_red_count, 0);
        assert_eq!(store.team_count(Team::Blue).await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_taps_can_lose_an_update() {
        let inner = DocumentStore::in_memory();
        inner.set_team_count(Team::Blue, 5).await.unwrap();
        let service = CounterService::new(Arc::new(GatedStore::new(inner.clone(), 2)));

        let (first, second) = tokio::join!(
            service.increment_on_tap(Team::Blue, "a", "Ann"),
            service.increment_on_tap(Team::Blue, "b", "Bob"),
        );

        assert_eq!(first.unwrap().new_team_count, 6);
        assert_eq!(second.unwrap().new_team_count, 6);
        assert_eq!(inner.team_count(Team::Blue).await.unwrap(), Some(6));
    }

    #[tokio::test]
    async fn select_then_tap_end_to_end() {
        let store = DocumentStore::in_memory();
        let session = SessionStore::in_memory();
        let service = service_with(&store);

        let registration = service
            .register(&session, Some(Team::Blue), "Bob")
            .await
            .unwrap();
        let raw = store.snapshot().await;
        assert_eq!(
            raw.interactions["blue"].user[&registration.user_id].personal_click,
            "0"
        );

        let once = service
            .increment_on_tap(Team::Blue, &registration.user_id, "Bob")
            .await
            .unwrap();
        assert_eq!(once.new_team_count, 1);
        assert_eq!(once.new_personal_count, 1);

        let twice = service
            .increment_on_tap(Team::Blue, &registration.user_id, "Bob")
            .await
            .unwrap();
        assert_eq!(twice.new_team_count, 2);
        assert_eq!(twice.new_personal_count, 2);
    }

    #[tokio::test]
    async fn register_replaces_cached_session() {
        let store = DocumentStore::in_memory();
        let session = SessionStore::in_memory();
        session.save("red", "Old", "old-id").await.unwrap();
        let service = service_with(&store);

        let registration = service
            .register(&session, Some(Team::Blue), "  Bob ")
            .await
            .unwrap();

        assert_eq!(registration.username, "Bob");
        let cached = session.load().await;
        assert_eq!(cached.team.as_deref(), Some("blue"));
        assert_eq!(cached.username.as_deref(), Some("Bob"));
        assert_eq!(cached.user_id.as_deref(), Some(registration.user_id.as_str()));
    }

    #[tokio::test]
    async fn register_requires_team_and_username() {
        let store = DocumentStore::in_memory();
        let session = SessionStore::in_memory();
        let service = service_with(&store);

        let no_team = service.register(&session, None, "Bob").await;
        assert!(matches!(no_team, Err(RegisterError::MissingSelection)));
        let blank = service.register(&session, Some(Team::Red), "   ").await;
        assert!(matches!(blank, Err(RegisterError::MissingSelection)));
        assert!(store.snapshot().await.interactions.is_empty());
    }

    #[tokio::test]
    async fn register_surfaces_store_failure_after_clearing_session() {
        let session = SessionStore::in_memory();
        session.save("red", "Old", "old-id").await.unwrap();
        let service = CounterService::new(Arc::new(OfflineStore));

        let result = service.register(&session, Some(Team::Blue), "Bob").await;

        assert!(matches!(result, Err(RegisterError::Store(_))));
        assert_eq!(session.load().await, crate::models::SessionState::default());
    }
}
