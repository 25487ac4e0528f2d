//! File-based Session Store Adapter
//!
//! Stores each session as one YAML document on disk, named
//! `session-<id>.yaml`, under a base directory.
//!
//! Writes go through a process-local lock so the version check and the
//! write happen together. Two processes sharing a directory are not
//! protected from each other.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{SessionStore, StoreError};

const FILE_PREFIX: &str = "session-";
const FILE_EXTENSION: &str = "yaml";

/// File-based storage for sessions
#[derive(Debug)]
pub struct FileSessionStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a new file store rooted at a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the file path for a session
    fn session_file_path(&self, id: SessionId) -> PathBuf {
        self.base_path
            .join(format!("{}{}.{}", FILE_PREFIX, id, FILE_EXTENSION))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn file_exists(&self, path: &Path) -> Result<bool, StoreError> {
        fs::try_exists(path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn read_file(&self, path: &Path) -> Result<Session, StoreError> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        serde_yaml::from_str(&yaml).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write through a temporary file so readers never see half a document
    async fn write_file(&self, session: &Session) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.session_file_path(session.id());
        let tmp_path = path.with_extension("yaml.tmp");

        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(session_id = %session.id(), path = %path.display(), "Wrote session file");
        Ok(())
    }
}

/// Parses the session id out of a `session-<id>.yaml` file name.
///
/// Only the canonical spelling is accepted, so `session-012.yaml` and
/// `session-+12.yaml` are not read as session 12.
fn session_id_from_file_name(name: &str) -> Option<SessionId> {
    let text = name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXTENSION)?
        .strip_suffix('.')?;
    let id: SessionId = text.parse().ok()?;
    (id.to_string() == text).then_some(id)
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get_sessions(&self) -> Result<Vec<Session>, StoreError> {
        if !self.file_exists(&self.base_path).await? {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut sessions = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if session_id_from_file_name(name).is_none() {
                if !name.ends_with(".tmp") {
                    warn!(file = name, "Skipping unrecognised file in session directory");
                }
                continue;
            }
            sessions.push(self.read_file(&entry.path()).await?);
        }

        sessions.sort_by_key(|s| s.id());
        Ok(sessions)
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, StoreError> {
        let path = self.session_file_path(id);
        if !self.file_exists(&path).await? {
            return Err(StoreError::NotFound(id));
        }
        self.read_file(&path).await
    }

    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        if self.file_exists(&self.session_file_path(session.id())).await? {
            return Err(StoreError::AlreadyExists(session.id()));
        }
        self.write_file(session).await
    }

    async fn update_session(&self, session: &Session) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let stored = self.get_session(session.id()).await?;
        if stored.version() != session.version() {
            return Err(StoreError::Conflict {
                id: session.id(),
                expected: session.version(),
            });
        }

        let mut next = session.clone();
        next.advance_version();
        self.write_file(&next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::NewSubmission;
    use tempfile::TempDir;

    fn session(id: i64) -> Session {
        Session::new(SessionId::new(id), format!("Session {}", id)).unwrap()
    }

    #[test]
    fn test_file_name_parsing() {
        assert_eq!(
            session_id_from_file_name("session-12.yaml"),
            Some(SessionId::new(12))
        );
        assert_eq!(session_id_from_file_name("session-12.yaml.tmp"), None);
        assert_eq!(session_id_from_file_name("notes.yaml"), None);
        assert_eq!(session_id_from_file_name("session-x.yaml"), None);
        assert_eq!(session_id_from_file_name("session--3.yaml"), Some(SessionId::new(-3)));
    }

    #[test]
    fn test_file_name_parsing_requires_canonical_id() {
        assert_eq!(session_id_from_file_name("session-+12.yaml"), None);
        assert_eq!(session_id_from_file_name("session-012.yaml"), None);
        assert_eq!(session_id_from_file_name("session-0.yaml"), Some(SessionId::new(0)));
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let original = session(1);
        store.create_session(&original).await.unwrap();

        let loaded = store.get_session(SessionId::new(1)).await.unwrap();
        assert_eq!(loaded, original);
        assert!(temp_dir.path().join("session-1.yaml").exists());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let result = store.get_session(SessionId::new(999)).await;
        assert_eq!(result, Err(StoreError::NotFound(SessionId::new(999))));
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.create_session(&session(1)).await.unwrap();
        let result = store.create_session(&session(1)).await;
        assert_eq!(result, Err(StoreError::AlreadyExists(SessionId::new(1))));
    }

    #[tokio::test]
    async fn test_update_persists_embedded_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.create_session(&session(1)).await.unwrap();

        let mut loaded = store.get_session(SessionId::new(1)).await.unwrap();
        let id = loaded.add_submission(NewSubmission::titled(UserId::new(3), "Track"));
        store.update_session(&loaded).await.unwrap();

        let reloaded = store.get_session(SessionId::new(1)).await.unwrap();
        assert_eq!(reloaded.version(), 1);
        assert_eq!(reloaded.submission(&id).unwrap().title, "Track");
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.create_session(&session(1)).await.unwrap();

        let first = store.get_session(SessionId::new(1)).await.unwrap();
        let second = first.clone();
        store.update_session(&first).await.unwrap();

        assert!(matches!(
            store.update_session(&second).await,
            Err(StoreError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_and_skips_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        for id in [10, 2] {
            store.create_session(&session(id)).await.unwrap();
        }
        std::fs::write(temp_dir.path().join("README.txt"), "not a session").unwrap();
        std::fs::copy(
            temp_dir.path().join("session-2.yaml"),
            temp_dir.path().join("session-002.yaml"),
        )
        .unwrap();

        let ids: Vec<i64> = store
            .get_sessions()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id().as_i64())
            .collect();
        assert_eq!(ids, vec![2, 10]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("not-yet"));
        assert!(store.get_sessions().await.unwrap().is_empty());
    }
}
