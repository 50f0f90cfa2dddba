use std::{env, path::PathBuf};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: resolve_port(),
            data_dir: resolve_data_dir(),
        }
    }

    /// Stand-in for the remote document database.
    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join("interactions.json")
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

fn resolve_port() -> u16 {
    match env::var("PORT") {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            warn!("invalid PORT {value:?} ({err}), using default: {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => {
            info!("PORT not set, using default: {DEFAULT_PORT}");
            DEFAULT_PORT
        }
    }
}

fn resolve_data_dir() -> PathBuf {
    match env::var("CLICKER_DATA_DIR") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            info!("CLICKER_DATA_DIR not set, using default: {DEFAULT_DATA_DIR}");
            PathBuf::from(DEFAULT_DATA_DIR)
        }
    }
}
