use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::store::{PostStore, SheetStore, StoreError};

pub const DEFAULT_ADDR: &str = "0.0.0.0:5050";
pub const ADDR_VAR: &str = "LINK_BOARD_ADDR";
pub const SHEET_VAR: &str = "LINK_BOARD_SHEET";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Sheet file; `None` keeps posts in memory only.
    pub sheet_path: Option<PathBuf>,
}

impl Config {
    /// Reads `LINK_BOARD_ADDR` and `LINK_BOARD_SHEET`, after loading a `.env`
    /// file if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = raw_addr
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidValue {
                field: ADDR_VAR,
                reason: format!("{:?}: {}", raw_addr, err),
            })?;

        let sheet_path = lookup(SHEET_VAR)
            .map(|path| path.trim().to_owned())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Config { addr, sheet_path })
    }

    pub fn open_store(&self) -> Result<Arc<dyn PostStore>, StoreError> {
        match &self.sheet_path {
            Some(path) => {
                info!("using sheet file {}", path.display());
                Ok(Arc::new(SheetStore::open(path)?))
            }
            None => {
                info!("using in-memory sheet");
                Ok(Arc::new(SheetStore::in_memory()))
            }
        }
    }
}
