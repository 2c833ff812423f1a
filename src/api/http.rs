//! `reqwest` implementation of [`SocietyApi`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::SocietyApi;
use super::dto::{
    FacilityPayload, LoginForm, NewBooking, NewComplaint, NewVisitor, RegisterRequest,
    TokenResponse,
};
use super::error::extract_message;
use crate::config::ApiConfig;
use crate::domain::{Booking, Complaint, Decision, Facility, GateStatus, Identity, Visitor};
use crate::shared::{ClientError, ClientResult};

/// HTTP client bound to one API base address. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    /// Join path segments onto the base; ids are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(method = %method, url = %url, "api request");
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = extract_message(&body);
        debug!(status = status.as_u16(), message = ?message, "api request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let body = Self::dispatch(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn execute(request: RequestBuilder) -> ClientResult<()> {
        Self::dispatch(request).await.map(|_| ())
    }
}

#[async_trait]
impl SocietyApi for HttpApi {
    async fn login(&self, form: &LoginForm) -> ClientResult<TokenResponse> {
        Self::fetch(self.request(Method::POST, &["login"], None).form(form)).await
    }

    async fn me(&self, token: &str) -> ClientResult<Identity> {
        Self::fetch(self.request(Method::GET, &["me"], Some(token))).await
    }

    async fn register_user(&self, token: &str, request: &RegisterRequest) -> ClientResult<()> {
        Self::execute(self.request(Method::POST, &["register"], Some(token)).json(request)).await
    }

    async fn list_facilities(&self, token: &str) -> ClientResult<Vec<Facility>> {
        Self::fetch(self.request(Method::GET, &["api", "facilities"], Some(token))).await
    }

    async fn create_facility(&self, token: &str, payload: &FacilityPayload) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "admin", "facilities"], Some(token));
        Self::execute(req.json(payload)).await
    }

    async fn update_facility(
        &self,
        token: &str,
        id: &str,
        payload: &FacilityPayload,
    ) -> ClientResult<()> {
        let req = self.request(Method::PUT, &["api", "admin", "facilities", id], Some(token));
        Self::execute(req.json(payload)).await
    }

    async fn delete_facility(&self, token: &str, id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &["api", "admin", "facilities", id], Some(token));
        Self::execute(req).await
    }

    async fn list_bookings(&self, token: &str) -> ClientResult<Vec<Booking>> {
        Self::fetch(self.request(Method::GET, &["api", "bookings"], Some(token))).await
    }

    async fn create_booking(&self, token: &str, booking: &NewBooking) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "bookings"], Some(token));
        Self::execute(req.json(booking)).await
    }

    async fn list_all_bookings(&self, token: &str) -> ClientResult<Vec<Booking>> {
        Self::fetch(self.request(Method::GET, &["api", "admin", "bookings"], Some(token))).await
    }

    async fn cancel_booking(&self, token: &str, id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &["api", "admin", "bookings", id], Some(token));
        Self::execute(req).await
    }

    async fn list_complaints(&self, token: &str) -> ClientResult<Vec<Complaint>> {
        Self::fetch(self.request(Method::GET, &["api", "complaints"], Some(token))).await
    }

    async fn create_complaint(&self, token: &str, complaint: &NewComplaint) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "complaints"], Some(token));
        Self::execute(req.json(complaint)).await
    }

    async fn list_all_complaints(&self, token: &str) -> ClientResult<Vec<Complaint>> {
        Self::fetch(self.request(Method::GET, &["api", "admin", "complaints"], Some(token))).await
    }

    async fn resolve_complaint(&self, token: &str, id: &str) -> ClientResult<()> {
        let segments = ["api", "admin", "complaints", id, "resolve"];
        let req = self.request(Method::POST, &segments, Some(token));
        Self::execute(req.json(&serde_json::json!({}))).await
    }

    async fn list_pending_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>> {
        Self::fetch(self.request(Method::GET, &["api", "visitors", "pending"], Some(token))).await
    }

    async fn decide_visitor(&self, token: &str, id: &str, decision: Decision) -> ClientResult<()> {
        let segments = ["api", "visitors", id, decision.as_str()];
        let req = self.request(Method::POST, &segments, Some(token));
        Self::execute(req.json(&serde_json::json!({}))).await
    }

    async fn list_all_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>> {
        Self::fetch(self.request(Method::GET, &["api", "admin", "visitors"], Some(token))).await
    }

    async fn admin_decide_visitor(
        &self,
        token: &str,
        id: &str,
        decision: Decision,
    ) -> ClientResult<()> {
        let segments = ["api", "admin", "visitors", id, decision.as_str()];
        let req = self.request(Method::POST, &segments, Some(token));
        Self::execute(req.json(&serde_json::json!({}))).await
    }

    async fn list_gate_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>> {
        Self::fetch(self.request(Method::GET, &["api", "security", "visitors"], Some(token))).await
    }

    async fn register_visitor(&self, token: &str, visitor: &NewVisitor) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "security", "visitors"], Some(token));
        Self::execute(req.json(visitor)).await
    }

    async fn update_gate_status(
        &self,
        token: &str,
        id: &str,
        status: GateStatus,
    ) -> ClientResult<()> {
        let segments = ["api", "security", "visitors", id, "update-status"];
        let req = self.request(Method::POST, &segments, Some(token));
        Self::execute(req.query(&[("status", status.as_str())])).await
    }
}
