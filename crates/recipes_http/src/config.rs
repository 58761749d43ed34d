//! Server configuration.
//!
//! Every flag has a `RECIPES_*` environment fallback so the server can be
//! configured from a container environment without a command line.

use crate::SharedStore;
use clap::{Parser, ValueEnum};
use recipes_core::{
    default_log_level, init_logging, init_stderr_logging, DuplicatePolicy, MemStore,
    SqliteRecipeStore, StoreError,
};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Storage backend behind the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Process-local map; contents are lost on exit.
    #[default]
    Memory,
    /// SQLite database file.
    Sqlite,
}

/// Routing front-end in front of the shared handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RouterKind {
    /// Router path templates with typed extractors.
    #[default]
    Framework,
    /// Hand-written regex matching over method and path.
    Regex,
}

/// Command-line mirror of `DuplicatePolicy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicateMode {
    #[default]
    Overwrite,
    Reject,
}

impl From<DuplicateMode> for DuplicatePolicy {
    fn from(value: DuplicateMode) -> Self {
        match value {
            DuplicateMode::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateMode::Reject => DuplicatePolicy::Reject,
        }
    }
}

/// Error for a configuration that cannot produce a store.
#[derive(Debug)]
pub enum ConfigError {
    /// `--backend sqlite` without `--db-path`.
    MissingDbPath,
    Store(StoreError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDbPath => write!(f, "sqlite backend requires a database path"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingDbPath => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ConfigError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "recipes-server", version, about = "Recipes CRUD HTTP server")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "RECIPES_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[arg(long, env = "RECIPES_BACKEND", value_enum, default_value_t = Backend::Memory)]
    pub backend: Backend,

    /// Database file; required with `--backend sqlite`.
    #[arg(long, env = "RECIPES_DB_PATH", required_if_eq("backend", "sqlite"))]
    pub db_path: Option<PathBuf>,

    #[arg(long, env = "RECIPES_ROUTER", value_enum, default_value_t = RouterKind::Framework)]
    pub router: RouterKind,

    /// What `POST /recipes` does when the derived id already exists.
    #[arg(
        long,
        env = "RECIPES_ON_DUPLICATE",
        value_enum,
        default_value_t = DuplicateMode::Overwrite
    )]
    pub on_duplicate: DuplicateMode,

    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "RECIPES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "RECIPES_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }

    pub fn init_logging(&self) -> Result<(), String> {
        match self.log_dir.as_deref() {
            Some(dir) => init_logging(self.log_level(), dir),
            None => init_stderr_logging(self.log_level()),
        }
    }

    /// Builds the store selected by `backend`.
    pub fn open_store(&self) -> Result<SharedStore, ConfigError> {
        let policy = DuplicatePolicy::from(self.on_duplicate);
        match self.backend {
            Backend::Memory => Ok(Arc::new(MemStore::with_policy(policy))),
            Backend::Sqlite => {
                let path = self.db_path.as_ref().ok_or(ConfigError::MissingDbPath)?;
                Ok(Arc::new(SqliteRecipeStore::open(path, policy)?))
            }
        }
    }
}
