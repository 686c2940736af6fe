use std::{future::Future, path::PathBuf, sync::Mutex};

use chrono::Utc;

use crate::{
    config,
    errors::FinderError,
    types::{StoredToken, Token},
};

/// Single-slot durable storage for the session token.
///
/// Absence of a token is a valid state meaning "unauthenticated".
pub trait TokenStore: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Option<Token>, FinderError>> + Send;
    fn save(&self, token: &Token) -> impl Future<Output = Result<(), FinderError>> + Send;
    fn clear(&self) -> impl Future<Output = Result<(), FinderError>> + Send;
}

/// Token slot persisted as `{ "token": ..., "saved_at": ... }` on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        FileTokenStore { path }
    }

    /// Store at `<data_dir>/token.json`.
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("token.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Token>, FinderError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredToken = serde_json::from_str(&content)?;
        if stored.token.as_str().is_empty() {
            return Ok(None);
        }
        Ok(Some(stored.token))
    }

    async fn save(&self, token: &Token) -> Result<(), FinderError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let stored = StoredToken {
            token: token.clone(),
            saved_at: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), FinderError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token slot.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        MemoryTokenStore {
            slot: Mutex::new(Some(token)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Token>>, FinderError> {
        self.slot
            .lock()
            .map_err(|_| FinderError::Storage("token slot poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Token>, FinderError> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, token: &Token) -> Result<(), FinderError> {
        *self.lock()? = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), FinderError> {
        *self.lock()? = None;
        Ok(())
    }
}
