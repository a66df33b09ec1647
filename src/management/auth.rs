use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{config, request::AccessToken, types::StoredToken};

/// Keeps an access token on disk between runs.
///
/// Tokens are stored as they were handed over; nothing here refreshes them.
pub struct TokenStore {
    path: PathBuf,
    token: StoredToken,
}

impl TokenStore {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self::at(Self::token_path(), access_token, token_type)
    }

    /// A store backed by `path` instead of the default location.
    pub fn at(
        path: impl Into<PathBuf>,
        access_token: impl Into<String>,
        token_type: impl Into<String>,
    ) -> Self {
        TokenStore {
            path: path.into(),
            token: StoredToken {
                access_token: access_token.into(),
                token_type: token_type.into(),
                saved_at: Utc::now(),
            },
        }
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: StoredToken = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { path, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Removes the stored token. Clearing an empty store succeeds.
    pub async fn clear() -> Result<(), String> {
        Self::clear_at(&Self::token_path()).await
    }

    pub async fn clear_at(path: &Path) -> Result<(), String> {
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn current_token(&self) -> &StoredToken {
        &self.token
    }

    pub fn access_token(&self) -> AccessToken {
        AccessToken::with_type(&self.token.access_token, &self.token.token_type)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }
}
