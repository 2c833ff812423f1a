//! JSON-file session storage

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::SessionStorage;
use crate::domain::Identity;
use crate::shared::ClientResult;

/// Keeps the identity in a single JSON file, written atomically.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

/// Write `body` to a freshly created file readable by the owner only.
async fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.sync_all().await
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> ClientResult<Option<Identity>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    async fn save(&self, identity: &Identity) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let staging = self.staging_path();
        let body = serde_json::to_vec_pretty(identity)?;
        let written = match write_private(&staging, &body).await {
            Ok(()) => fs::rename(&staging, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("esociety-storage-{}-{}", std::process::id(), line!()))
            .join("session.json")
    }

    fn identity() -> Identity {
        Identity {
            id: "65f0c0ffee0000000000abcd".into(),
            role: Role::Admin,
            email: Some("admin@example.com".into()),
            name: Some("Admin".into()),
            phone: None,
            address: None,
            token: "tok-1".into(),
        }
    }

    #[tokio::test]
    async fn save_load_clear() {
        let storage = FileSessionStorage::new(scratch_path());
        assert_eq!(storage.load().await.unwrap(), None);

        storage.save(&identity()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(identity()));

        storage.clear().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
        // clearing twice is fine
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let path = std::env::temp_dir()
            .join(format!("esociety-storage-corrupt-{}", std::process::id()))
            .join("session.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{not json").unwrap();

        let err = FileSessionStorage::new(&path).load().await.unwrap_err();
        assert!(matches!(err, crate::shared::ClientError::Serialization(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir()
            .join(format!("esociety-storage-perm-{}", std::process::id()))
            .join("session.json");
        let storage = FileSessionStorage::new(&path);
        storage.save(&identity()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        storage.clear().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_save_leaves_no_staging_file() {
        let dir = std::env::temp_dir()
            .join(format!("esociety-storage-blocked-{}", std::process::id()));
        let path = dir.join("session.json");
        // a non-empty directory in the way fails the rename
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(storage.save(&identity()).await.is_err());
        assert!(!storage.staging_path().exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
