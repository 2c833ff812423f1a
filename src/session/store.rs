//! Session store
//!
//! Owns the one authenticated identity. Views only ever borrow it.

use tracing::{info, warn};

use super::Authenticator;
use crate::api::dto::LoginForm;
use crate::api::SocietyApi;
use crate::domain::{Identity, Role};
use crate::infrastructure::SessionStorage;
use crate::routing::GuardState;
use crate::shared::ClientResult;

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    identity: Option<Identity>,
    hydrated: bool,
}

impl SessionStore {
    /// A store that has not hydrated yet; the guard reports `Loading`.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            identity: None,
            hydrated: false,
        }
    }

    /// Build and hydrate in one go.
    pub async fn open(storage: impl SessionStorage + 'static) -> Self {
        let mut store = Self::new(storage);
        store.hydrate().await;
        store
    }

    /// Restore the persisted identity. An unreadable record counts as no
    /// identity.
    pub async fn hydrate(&mut self) {
        self.identity = match self.storage.load().await {
            Ok(identity) => identity.filter(|i| !i.token.is_empty()),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session record");
                None
            }
        };
        self.hydrated = true;
    }

    pub fn state(&self) -> GuardState {
        match (&self.identity, self.hydrated) {
            (_, false) => GuardState::Loading,
            (Some(identity), true) => GuardState::Authenticated(identity.role),
            (None, true) => GuardState::Unauthenticated,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    /// Authenticate, persist, then publish the identity.
    ///
    /// Nothing changes on failure, including when persisting fails.
    pub async fn login(
        &mut self,
        api: &dyn SocietyApi,
        form: &LoginForm,
    ) -> ClientResult<&Identity> {
        let identity = Authenticator::new(api).authenticate(form).await?;
        self.storage.save(&identity).await?;
        self.hydrated = true;
        Ok(self.identity.insert(identity))
    }

    /// Drop the identity from memory, then from storage.
    pub async fn logout(&mut self) -> ClientResult<()> {
        if let Some(identity) = self.identity.take() {
            info!(user_id = %identity.id, "logged out");
        }
        self.hydrated = true;
        self.storage.clear().await
    }

    /// The server stopped accepting the token. Same effect as logout.
    pub async fn invalidate(&mut self) -> ClientResult<()> {
        warn!("session token rejected by server");
        self.logout().await
    }
}
