//! Restart hooks for an external process supervisor
//!
//! `POST /restart` never restarts the process itself. It asks whatever
//! supervises the daemon to do it, in a way chosen per deployment.

use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Notify;
use tracing::info;

use crate::config::{ReloadConfig, ReloadMode};

/// Reload trigger errors
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("Failed to touch {path}: {source}")]
    Touch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Reload misconfigured: {0}")]
    Config(String),
}

/// Asks an external supervisor to restart the daemon
#[async_trait]
pub trait ReloadTrigger: Send + Sync {
    async fn trigger_reload(&self) -> Result<(), ReloadError>;

    /// Trigger name for logging
    fn name(&self) -> &'static str;
}

/// Bumps a file's modification time for file-watching supervisors
#[derive(Debug, Clone)]
pub struct TouchFileReload {
    path: PathBuf,
}

impl TouchFileReload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReloadTrigger for TouchFileReload {
    async fn trigger_reload(&self) -> Result<(), ReloadError> {
        let path = self.path.clone();
        let touched = tokio::task::spawn_blocking(move || {
            // Open for writing without truncating so the content is untouched
            File::options()
                .write(true)
                .open(&path)
                .and_then(|file| file.set_modified(SystemTime::now()))
        })
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))
        .and_then(|r| r);

        touched.map_err(|source| ReloadError::Touch {
            path: self.path.clone(),
            source,
        })?;

        info!("Touched {} to request a restart", self.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "touch"
    }
}

/// Requests a graceful shutdown, leaving the restart to the supervisor
///
/// The server's shutdown future waits on [`ShutdownReload::requested`].
#[derive(Debug, Clone, Default)]
pub struct ShutdownReload {
    notify: Arc<Notify>,
}

impl ShutdownReload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once a reload has been triggered
    ///
    /// A trigger that fires before anyone waits is not lost.
    pub async fn requested(&self) {
        self.notify.notified().await;
    }
}

#[async_trait]
impl ReloadTrigger for ShutdownReload {
    async fn trigger_reload(&self) -> Result<(), ReloadError> {
        info!("Restart requested, shutting down for the supervisor to restart us");
        self.notify.notify_one();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "shutdown"
    }
}

/// Build the configured trigger, if any, plus the shutdown hook it may need
pub fn from_config(
    config: &ReloadConfig,
) -> Result<(Option<Arc<dyn ReloadTrigger>>, Option<ShutdownReload>), ReloadError> {
    match config.mode {
        ReloadMode::Disabled => Ok((None, None)),
        ReloadMode::Touch => {
            let path = config.touch_path.clone().ok_or_else(|| {
                ReloadError::Config("reload.touch_path is required for mode = \"touch\"".into())
            })?;
            Ok((Some(Arc::new(TouchFileReload::new(path))), None))
        }
        ReloadMode::Shutdown => {
            let shutdown = ShutdownReload::new();
            Ok((Some(Arc::new(shutdown.clone())), Some(shutdown)))
        }
    }
}
