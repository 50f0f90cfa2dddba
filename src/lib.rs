pub mod app;
pub mod config;
pub mod counter;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod screen;
pub mod session;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use app::router;
pub use config::Config;
pub use counter::CounterService;
pub use session::SessionStore;
pub use state::AppState;
pub use store::{CounterStore, DocumentStore};
