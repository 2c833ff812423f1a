//! In-memory session storage

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SessionStorage;
use crate::domain::Identity;
use crate::shared::ClientResult;

/// Session storage that lives as long as the process.
///
/// Clones share the same slot, which lets tests play "reload" by building a
/// second store over a clone.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    slot: Arc<Mutex<Option<Identity>>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(identity))),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn load(&self) -> ClientResult<Option<Identity>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, identity: &Identity) -> ClientResult<()> {
        *self.slot.lock().await = Some(identity.clone());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}
