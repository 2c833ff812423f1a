//! In-process stand-in for the society backend.
//!
//! Mirrors the routes, role checks and error bodies of the real service,
//! keeps everything in memory and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use esociety::api::dto::LoginForm;
use esociety::config::ApiConfig;
use esociety::{HttpApi, InMemorySessionStorage, SessionStore, SocietyApi};

pub const RESIDENT: (&str, &str) = ("asha@example.com", "resident123");
pub const ADMIN: (&str, &str) = ("admin@example.com", "admin1234");
pub const SECURITY: (&str, &str) = ("guard@example.com", "guard1234");

pub const GYM: &str = "000000000000000000000f01";
pub const PENDING_COMPLAINT: &str = "000000000000000000000c01";
pub const PENDING_VISITOR: &str = "000000000000000000000a01";
pub const ENTERED_VISITOR: &str = "000000000000000000000a02";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
}

struct User {
    id: String,
    email: String,
    password: String,
    role: String,
    name: String,
}

impl User {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "email": self.email,
            "hashed_password": "$2b$12$not-a-real-hash",
            "role": self.role,
            "name": self.name,
            "phone": "555-0100",
            "address": "Block B",
        })
    }
}

#[derive(Default)]
struct Backend {
    users: Vec<User>,
    tokens: HashMap<String, String>,
    facilities: Vec<Value>,
    bookings: Vec<Value>,
    complaints: Vec<Value>,
    visitors: Vec<Value>,
    requests: Vec<Recorded>,
    next_id: u64,
    failing_reads: bool,
}

impl Backend {
    fn seeded() -> Self {
        let mut backend = Self {
            next_id: 0x100,
            ..Self::default()
        };
        for (n, ((email, password), role, name)) in [
            (RESIDENT, "resident", "Asha"),
            (ADMIN, "admin", "Admin"),
            (SECURITY, "security", "Guard"),
        ]
        .into_iter()
        .enumerate()
        {
            backend.users.push(User {
                id: format!("{:024x}", n + 1),
                email: email.into(),
                password: password.into(),
                role: role.into(),
                name: name.into(),
            });
        }
        backend.facilities.push(json!({
            "_id": GYM,
            "name": "Gym",
            "available_slots": ["06:00-07:00", "07:00-08:00"],
        }));
        backend.complaints.push(json!({
            "_id": PENDING_COMPLAINT,
            "title": "Maintenance",
            "description": "Lift stuck on 3rd floor",
            "status": "pending",
            "resident_id": format!("{:024x}", 1),
            "created_at": "2024-05-01T10:00:00.000000",
        }));
        backend.visitors.push(json!({
            "_id": PENDING_VISITOR,
            "name": "Ravi",
            "purpose": "Delivery",
            "status": "pending",
            "created_at": "2024-05-01T09:00:00",
        }));
        backend.visitors.push(json!({
            "_id": ENTERED_VISITOR,
            "name": "Meera",
            "purpose": "Guest",
            "status": "entered",
            "created_at": "2024-05-01T08:00:00",
            "updated_at": "2024-05-01T08:05:00",
        }));
        backend
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:024x}", self.next_id)
    }

    fn caller(&self, headers: &HeaderMap) -> Result<&User, Rejection> {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|token| self.tokens.get(token))
            .and_then(|id| self.users.iter().find(|u| &u.id == id))
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }

    fn require(&self, headers: &HeaderMap, role: &str, detail: &str) -> Result<String, Rejection> {
        let user = self.caller(headers)?;
        if user.role != role {
            return Err(reject(StatusCode::FORBIDDEN, detail));
        }
        Ok(user.id.clone())
    }
}

type Rejection = (StatusCode, Json<Value>);
type Reply = Result<Json<Value>, Rejection>;

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (status, Json(json!({ "detail": detail })))
}

fn now() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn find<'a>(items: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    items.iter_mut().find(|item| item["_id"] == id)
}

/// Handle to the running stub.
#[derive(Clone)]
pub struct Stub {
    inner: Arc<Mutex<Backend>>,
}

impl Stub {
    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.inner.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests to `path` with `method`.
    pub fn hits(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Answer every later `GET /api/...` with a bare 503. Writes still go through.
    pub fn fail_reads(&self) {
        self.lock().failing_reads = true;
    }

    /// Forget every issued token, as if they all expired.
    pub fn revoke_tokens(&self) {
        self.lock().tokens.clear();
    }

    pub fn facility_slots(&self, id: &str) -> Vec<String> {
        let backend = self.lock();
        backend
            .facilities
            .iter()
            .find(|f| f["_id"] == id)
            .and_then(|f| f["available_slots"].as_array())
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|s| s.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn add_facility(&self, name: &str, slots: &[&str]) -> String {
        let mut backend = self.lock();
        let id = backend.fresh_id();
        backend
            .facilities
            .push(json!({ "_id": id, "name": name, "available_slots": slots }));
        id
    }
}

pub struct TestServer {
    pub base_url: String,
    pub stub: Stub,
}

impl TestServer {
    pub fn api(&self) -> Arc<dyn SocietyApi> {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: Some(5),
            use_system_proxy: false,
        };
        Arc::new(HttpApi::new(&config).unwrap())
    }

    /// A hydrated session signed in with `credentials`, over in-memory
    /// storage the caller can inspect.
    pub async fn session(
        &self,
        credentials: (&str, &str),
    ) -> (SessionStore, InMemorySessionStorage) {
        let storage = InMemorySessionStorage::new();
        let mut session = SessionStore::open(storage.clone()).await;
        let form = LoginForm::new(credentials.0, credentials.1);
        session.login(self.api().as_ref(), &form).await.unwrap();
        (session, storage)
    }
}

pub async fn spawn() -> TestServer {
    let stub = Stub {
        inner: Arc::new(Mutex::new(Backend::seeded())),
    };

    let app = Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/register", post(register))
        .route("/api/facilities", get(list_facilities))
        .route("/api/admin/facilities", post(create_facility))
        .route(
            "/api/admin/facilities/{id}",
            put(update_facility).delete(delete_facility),
        )
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/admin/bookings", get(list_all_bookings))
        .route("/api/admin/bookings/{id}", axum::routing::delete(cancel_booking))
        .route("/api/complaints", get(list_complaints).post(create_complaint))
        .route("/api/admin/complaints", get(list_all_complaints))
        .route("/api/admin/complaints/{id}/resolve", post(resolve_complaint))
        .route("/api/visitors/pending", get(pending_visitors))
        .route("/api/visitors/{id}/{decision}", post(resident_decision))
        .route("/api/admin/visitors", get(all_visitors))
        .route("/api/admin/visitors/{id}/{decision}", post(admin_decision))
        .route("/api/security/visitors", get(gate_visitors).post(add_visitor))
        .route("/api/security/visitors/{id}/update-status", post(update_status))
        .layer(middleware::from_fn_with_state(stub.clone(), record))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        stub,
    }
}

async fn record(State(stub): State<Stub>, req: Request, next: Next) -> Response {
    let failing = {
        let mut backend = stub.lock();
        backend.requests.push(Recorded {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(String::from),
        });
        backend.failing_reads
            && req.method() == Method::GET
            && req.uri().path().starts_with("/api/")
    };
    if failing {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    next.run(req).await
}

// ── Auth ───────────────────────────────────────────────────────

async fn login(State(stub): State<Stub>, Form(form): Form<Credentials>) -> Reply {
    let mut backend = stub.lock();
    let id = backend
        .users
        .iter()
        .find(|u| u.email == form.username && u.password == form.password)
        .map(|u| u.id.clone())
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    let token = format!("token-{id}-{}", backend.tokens.len());
    backend.tokens.insert(token.clone(), id);
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    Ok(Json(backend.caller(&headers)?.to_json()))
}

async fn register(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can register new users")?;
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if backend.users.iter().any(|u| u.email == email) {
        return Err(reject(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = backend.fresh_id();
    backend.users.push(User {
        id: id.clone(),
        email,
        password: body["password"].as_str().unwrap_or_default().into(),
        role: body["role"].as_str().unwrap_or_default().into(),
        name: body["name"].as_str().unwrap_or_default().into(),
    });
    Ok(Json(json!({ "user_id": id })))
}

// ── Facilities ─────────────────────────────────────────────────

async fn list_facilities(State(stub): State<Stub>) -> Reply {
    Ok(Json(Value::from(stub.lock().facilities.clone())))
}

async fn create_facility(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can add facilities")?;
    let id = backend.fresh_id();
    backend.facilities.push(json!({
        "_id": id,
        "name": body["name"],
        "available_slots": body["available_slots"],
    }));
    Ok(Json(json!({ "facility_id": id })))
}

async fn update_facility(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can update facilities")?;
    let facility = find(&mut backend.facilities, &id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Facility not found"))?;
    facility["name"] = body["name"].clone();
    facility["available_slots"] = body["available_slots"].clone();
    Ok(Json(json!({ "message": "Facility updated" })))
}

async fn delete_facility(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can delete facilities")?;
    let before = backend.facilities.len();
    backend.facilities.retain(|f| f["_id"] != id.as_str());
    if backend.facilities.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Facility not found"));
    }
    Ok(Json(json!({ "message": "Facility deleted" })))
}

// ── Bookings ───────────────────────────────────────────────────

async fn list_bookings(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    let me = backend.require(&headers, "resident", "Only residents can view their bookings")?;
    let mine: Vec<Value> = backend
        .bookings
        .iter()
        .filter(|b| b["resident_id"] == me.as_str())
        .cloned()
        .collect();
    Ok(Json(Value::from(mine)))
}

async fn create_booking(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = stub.lock();
    let me = backend.require(&headers, "resident", "Only residents can create bookings")?;
    let facility_id = body["facility_id"].as_str().unwrap_or_default().to_string();
    let slot = body["slot"].clone();
    let facility = find(&mut backend.facilities, &facility_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Facility not found"))?;
    let slots = facility["available_slots"]
        .as_array_mut()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Slot not available"))?;
    let Some(pos) = slots.iter().position(|s| *s == slot) else {
        return Err(reject(StatusCode::BAD_REQUEST, "Slot not available"));
    };
    slots.remove(pos);
    let facility_name = facility["name"].clone();

    let id = backend.fresh_id();
    backend.bookings.push(json!({
        "_id": id,
        "facility_id": facility_id,
        "facility_name": facility_name,
        "slot": slot,
        "resident_id": me,
        "booked_at": chrono::Utc::now().date_naive().to_string(),
    }));
    Ok(Json(json!({ "booking_id": id })))
}

async fn list_all_bookings(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can view all bookings")?;
    Ok(Json(Value::from(backend.bookings.clone())))
}

async fn cancel_booking(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can cancel bookings")?;
    let pos = backend
        .bookings
        .iter()
        .position(|b| b["_id"] == id.as_str())
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Booking not found"))?;
    let booking = backend.bookings.remove(pos);
    let facility_id = booking["facility_id"].as_str().unwrap_or_default().to_string();
    if let Some(slots) = find(&mut backend.facilities, &facility_id)
        .and_then(|f| f["available_slots"].as_array_mut())
    {
        slots.push(booking["slot"].clone());
    }
    Ok(Json(json!({ "message": "Booking canceled" })))
}

// ── Complaints ─────────────────────────────────────────────────

async fn list_complaints(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    let me = backend.require(&headers, "resident", "Only residents can view their complaints")?;
    let mine: Vec<Value> = backend
        .complaints
        .iter()
        .filter(|c| c["resident_id"] == me.as_str())
        .cloned()
        .collect();
    Ok(Json(Value::from(mine)))
}

async fn create_complaint(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = stub.lock();
    let me = backend.require(&headers, "resident", "Only residents can create complaints")?;
    let id = backend.fresh_id();
    backend.complaints.push(json!({
        "_id": id,
        "title": body["title"],
        "description": body["description"],
        "status": "pending",
        "resident_id": me,
        "created_at": now(),
    }));
    Ok(Json(json!({ "complaint_id": id })))
}

async fn list_all_complaints(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can view all complaints")?;
    Ok(Json(Value::from(backend.complaints.clone())))
}

async fn resolve_complaint(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can resolve complaints")?;
    let complaint = find(&mut backend.complaints, &id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Complaint not found"))?;
    complaint["status"] = json!("resolved");
    complaint["resolved_at"] = json!(now());
    Ok(Json(json!({ "message": "Complaint resolved" })))
}

// ── Visitors ───────────────────────────────────────────────────

async fn pending_visitors(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    backend.require(&headers, "resident", "Only residents can view pending visitors")?;
    let pending: Vec<Value> = backend
        .visitors
        .iter()
        .filter(|v| v["status"] == "pending")
        .cloned()
        .collect();
    Ok(Json(Value::from(pending)))
}

fn decide(backend: &mut Backend, id: &str, decision: &str) -> Reply {
    if decision != "approve" && decision != "deny" {
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid decision"));
    }
    let visitor = find(&mut backend.visitors, id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Visitor not found"))?;
    visitor["status"] = json!(decision);
    visitor["handled_at"] = json!(now());
    Ok(Json(json!({ "message": format!("Visitor {decision}ed") })))
}

async fn resident_decision(
    State(stub): State<Stub>,
    Path((id, decision)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "resident", "Only residents can handle visitors")?;
    decide(&mut backend, &id, &decision)
}

async fn all_visitors(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can view all visitors")?;
    Ok(Json(Value::from(backend.visitors.clone())))
}

async fn admin_decision(
    State(stub): State<Stub>,
    Path((id, decision)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "admin", "Only admins can handle visitors")?;
    decide(&mut backend, &id, &decision)
}

async fn gate_visitors(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    let backend = stub.lock();
    backend.require(&headers, "security", "Only security personnel can view visitors")?;
    Ok(Json(Value::from(backend.visitors.clone())))
}

async fn add_visitor(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(&headers, "security", "Only security personnel can add visitors")?;
    let id = backend.fresh_id();
    backend.visitors.push(json!({
        "_id": id,
        "name": body["name"],
        "purpose": body["purpose"],
        "status": "pending",
        "created_at": now(),
    }));
    Ok(Json(json!({ "visitor_id": id })))
}

#[derive(Deserialize)]
struct StatusQuery {
    status: String,
}

async fn update_status(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = stub.lock();
    backend.require(
        &headers,
        "security",
        "Only security personnel can update visitor status",
    )?;
    if query.status != "entered" && query.status != "exited" {
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid status"));
    }
    let visitor = find(&mut backend.visitors, &id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Visitor not found"))?;
    visitor["status"] = json!(query.status);
    visitor["updated_at"] = json!(now());
    Ok(Json(json!({ "message": format!("Visitor status updated to {}", query.status) })))
}
