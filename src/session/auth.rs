//! Credential exchange

use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::LoginForm;
use crate::api::SocietyApi;
use crate::domain::Identity;
use crate::shared::{ClientError, ClientResult};

pub const MISSING_CREDENTIALS: &str = "Please fill in all fields";

/// Trades credentials for a token, then asks `/me` who the token belongs to.
pub struct Authenticator<'a> {
    api: &'a dyn SocietyApi,
}

impl<'a> Authenticator<'a> {
    pub fn new(api: &'a dyn SocietyApi) -> Self {
        Self { api }
    }

    /// Returns the full identity with the bearer token merged in.
    ///
    /// Empty fields are rejected without a request. Server rejections come
    /// back as `ClientError::Api` carrying the server's detail text.
    pub async fn authenticate(&self, form: &LoginForm) -> ClientResult<Identity> {
        if form.validate().is_err() {
            return Err(ClientError::Validation(MISSING_CREDENTIALS.into()));
        }

        let token = match self.api.login(form).await {
            Ok(token) => token,
            Err(e) => {
                warn!(username = %form.username, error = %e, "login rejected");
                return Err(e);
            }
        };

        let identity = self
            .api
            .me(&token.access_token)
            .await?
            .with_token(token.access_token);

        info!(user_id = %identity.id, role = %identity.role, "authenticated");
        Ok(identity)
    }
}
