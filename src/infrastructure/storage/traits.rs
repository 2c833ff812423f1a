//! Session storage trait

use async_trait::async_trait;

use crate::domain::Identity;
use crate::shared::ClientResult;

/// Durable home of the one persisted identity record.
///
/// Writes replace the record wholesale; `clear` removes it. Clearing an
/// empty store is not an error.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self) -> ClientResult<Option<Identity>>;
    async fn save(&self, identity: &Identity) -> ClientResult<()>;
    async fn clear(&self) -> ClientResult<()>;
}
