use crate::counter::CounterService;
use crate::models::ClickerParams;
use crate::screen::ClickerScreen;
use crate::session::SessionStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub service: CounterService,
    pub session: SessionStore,
    screen: Arc<Mutex<Option<ClickerScreen>>>,
}

impl AppState {
    pub fn new(service: CounterService, session: SessionStore) -> Self {
        Self {
            service,
            session,
            screen: Arc::new(Mutex::new(None)),
        }
    }

    /// Mounts a fresh clicker screen, replacing any previous one.
    pub async fn mount(&self, params: ClickerParams) -> ClickerScreen {
        let screen = ClickerScreen::mount(self.service.clone(), params, &self.session).await;
        *self.screen.lock().await = Some(screen.clone());
        screen
    }

    /// The mounted screen, mounting one from the session cache on first use.
    pub async fn screen(&self) -> ClickerScreen {
        let mut slot = self.screen.lock().await;
        if let Some(screen) = slot.as_ref() {
            return screen.clone();
        }
        let screen =
            ClickerScreen::mount(self.service.clone(), ClickerParams::default(), &self.session)
                .await;
        *slot = Some(screen.clone());
        screen
    }

    pub async fn unmount(&self) {
        self.screen.lock().await.take();
    }
}
