//! The society API as seen by the client

use async_trait::async_trait;

use super::dto::{
    FacilityPayload, LoginForm, NewBooking, NewComplaint, NewVisitor, RegisterRequest,
    TokenResponse,
};
use crate::domain::{Booking, Complaint, Decision, Facility, GateStatus, Identity, Visitor};
use crate::shared::ClientResult;

/// One method per endpoint. Role scoping is enforced by the server; the
/// method names only say which collection is addressed.
///
/// Write methods discard the response body: views re-fetch after every
/// successful write.
#[async_trait]
pub trait SocietyApi: Send + Sync {
    // Authentication
    async fn login(&self, form: &LoginForm) -> ClientResult<TokenResponse>;
    async fn me(&self, token: &str) -> ClientResult<Identity>;
    async fn register_user(&self, token: &str, request: &RegisterRequest) -> ClientResult<()>;

    // Facilities
    async fn list_facilities(&self, token: &str) -> ClientResult<Vec<Facility>>;
    async fn create_facility(&self, token: &str, payload: &FacilityPayload) -> ClientResult<()>;
    async fn update_facility(
        &self,
        token: &str,
        id: &str,
        payload: &FacilityPayload,
    ) -> ClientResult<()>;
    async fn delete_facility(&self, token: &str, id: &str) -> ClientResult<()>;

    // Bookings
    async fn list_bookings(&self, token: &str) -> ClientResult<Vec<Booking>>;
    async fn create_booking(&self, token: &str, booking: &NewBooking) -> ClientResult<()>;
    async fn list_all_bookings(&self, token: &str) -> ClientResult<Vec<Booking>>;
    async fn cancel_booking(&self, token: &str, id: &str) -> ClientResult<()>;

    // Complaints
    async fn list_complaints(&self, token: &str) -> ClientResult<Vec<Complaint>>;
    async fn create_complaint(&self, token: &str, complaint: &NewComplaint) -> ClientResult<()>;
    async fn list_all_complaints(&self, token: &str) -> ClientResult<Vec<Complaint>>;
    async fn resolve_complaint(&self, token: &str, id: &str) -> ClientResult<()>;

    // Visitors
    async fn list_pending_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>>;
    async fn decide_visitor(&self, token: &str, id: &str, decision: Decision) -> ClientResult<()>;
    async fn list_all_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>>;
    async fn admin_decide_visitor(
        &self,
        token: &str,
        id: &str,
        decision: Decision,
    ) -> ClientResult<()>;
    async fn list_gate_visitors(&self, token: &str) -> ClientResult<Vec<Visitor>>;
    async fn register_visitor(&self, token: &str, visitor: &NewVisitor) -> ClientResult<()>;
    async fn update_gate_status(&self, token: &str, id: &str, status: GateStatus)
        -> ClientResult<()>;
}
