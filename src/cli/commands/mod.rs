pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod interactive;
pub mod list;
pub mod log;
pub mod processes;

use crate::config::Config;
use crate::core::lifecycle::LifecycleEngine;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

/// Open the configured database and wrap it in the lifecycle engine.
pub(crate) fn open_engine(cfg: &Config) -> AppResult<LifecycleEngine<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    LifecycleEngine::new(store)
}
