//! Shared test helpers for integration tests.
//!
//! An axum router stands in for the reservation backend on an ephemeral
//! port; the real reqwest client talks to it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use alquiler_auth::TokenSession;
use alquiler_booking::{BookingSession, ReservationListState, ReservationSubmitter};
use alquiler_client::{ApiClient, AuthApi, HttpReservationGateway};
use alquiler_core::config::AppConfig;

/// Password the stand-in accepts for any email.
pub const PASSWORD: &str = "secret";

/// Behaviour switches and recorded traffic of the stand-in backend.
#[derive(Debug, Default)]
pub struct BackendState {
    /// Reservations served by `GET /reservas`.
    pub reservations: Mutex<Vec<Value>>,
    /// Bodies received by `POST /reservas`.
    pub created: Mutex<Vec<Value>>,
    /// `Authorization` header of every request, in arrival order.
    pub authorization: Mutex<Vec<Option<String>>>,
    /// Number of `GET /reservas` calls.
    pub list_all_calls: AtomicUsize,
    /// Status forced on `POST /reservas`.
    pub create_status: Mutex<Option<u16>>,
    /// Answer `POST /reservas` with 201 and no body.
    pub create_empty: Mutex<bool>,
    /// Status forced on `GET /reservas`.
    pub list_status: Mutex<Option<u16>>,
    /// Raw 200 body served by `GET /reservas` instead of the seeded list.
    pub list_raw_body: Mutex<Option<String>>,
    /// Status forced on `DELETE /reservas/{id}`.
    pub delete_status: Mutex<Option<u16>>,
    /// Delay before answering `GET /reservas/habitacion/{id}`.
    pub room_delay: Mutex<Option<Duration>>,
    /// Token returned by `POST /auth/login`.
    pub login_token: Mutex<String>,
    /// `rol` returned by `POST /auth/login`.
    pub login_role: Mutex<Option<String>>,
}

impl BackendState {
    pub fn list_all_calls(&self) -> usize {
        self.list_all_calls.load(Ordering::SeqCst)
    }

    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorization.lock().expect("lock").push(value);
    }
}

/// A running stand-in backend.
pub struct MockBackend {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// Shared state, for scripting and assertions.
    pub state: Arc<BackendState>,
}

impl MockBackend {
    /// Start a backend on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let app = Router::new()
            .route("/reservas", get(list_all).post(create))
            .route("/reservas/habitacion/{id}", get(by_room))
            .route("/reservas/usuario/{id}", get(by_student))
            .route("/reservas/{id}", put(update).delete(remove))
            .route("/auth/login", post(login))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Seed the reservations the backend serves.
    pub fn seed(&self, reservations: Vec<Value>) {
        *self.state.reservations.lock().expect("lock") = reservations;
    }

    /// Client configuration pointing at this backend.
    pub fn config(&self) -> AppConfig {
        config_for(&self.base_url)
    }
}

/// Client configuration for `base_url` with short timeouts.
pub fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.request_timeout_seconds = 1;
    config.api.connect_timeout_seconds = 1;
    config
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Sign a token the client can read but not verify.
pub fn jwt(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-signing-key"),
    )
    .expect("encode token")
}

/// Identity holding `token`, if any.
pub fn identity(config: &AppConfig, token: Option<&str>) -> Arc<TokenSession> {
    let session = Arc::new(TokenSession::new(&config.auth));
    if let Some(token) = token {
        session.set_token(token);
    }
    session
}

/// The full client stack over HTTP.
pub fn booking_session(config: &AppConfig, token: Option<&str>) -> BookingSession {
    let identity = identity(config, token);
    let api = ApiClient::new(&config.api, identity.clone()).expect("api client");
    let gateway = Arc::new(HttpReservationGateway::new(api));
    let list = Arc::new(ReservationListState::new(gateway.clone(), &config.booking));
    let submitter = Arc::new(ReservationSubmitter::new(gateway, identity, &config.booking));
    BookingSession::new(list, submitter, &config.booking)
}

/// Login API over HTTP.
pub fn auth_api(config: &AppConfig, identity: Arc<TokenSession>) -> AuthApi {
    AuthApi::new(ApiClient::new(&config.api, identity).expect("api client"))
}

/// Backend representation of a reservation.
pub fn reservation_json(id: &str, room: &str, student: &str) -> Value {
    json!({
        "id": id,
        "habitacionId": room,
        "alumnoId": student,
        "alumnoEmail": format!("{student}@example.org"),
        "propietarioId": null,
        "propietarioEmail": null,
        "fechaInicio": "2025-06-01",
        "fechaFin": "2025-06-05",
        "estadoReserva": "PENDIENTE"
    })
}

/// The narrow answer of create and update calls.
fn receipt(reservation: &Value) -> Value {
    json!({
        "id": reservation["id"],
        "fechaInicio": reservation["fechaInicio"],
        "fechaFin": reservation["fechaFin"],
        "estadoReserva": reservation["estadoReserva"]
    })
}

fn forced(status: &Mutex<Option<u16>>) -> Option<StatusCode> {
    let code = *status.lock().expect("lock");
    code.and_then(|code| StatusCode::from_u16(code).ok())
}

async fn list_all(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record_auth(&headers);
    state.list_all_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = forced(&state.list_status) {
        return status.into_response();
    }
    let raw = state.list_raw_body.lock().expect("lock").clone();
    if let Some(raw) = raw {
        return ([(header::CONTENT_TYPE, "application/json")], raw).into_response();
    }
    let all = state.reservations.lock().expect("lock").clone();
    Json(all).into_response()
}

async fn create(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_auth(&headers);
    state.created.lock().expect("lock").push(body.clone());

    if let Some(status) = forced(&state.create_status) {
        return (status, Json(json!({ "error": "conflicting dates" }))).into_response();
    }
    if *state.create_empty.lock().expect("lock") {
        return StatusCode::CREATED.into_response();
    }

    let mut reservations = state.reservations.lock().expect("lock");
    let id = format!("res-{}", reservations.len() + 1);
    let created = json!({
        "id": id,
        "habitacionId": body["habitacion"]["id"],
        "alumnoId": body["alumno"]["id"].as_str().unwrap_or("alumno-from-token"),
        "fechaInicio": body["fechaInicio"],
        "fechaFin": body["fechaFin"],
        "estadoReserva": body["estadoReserva"]
    });
    reservations.push(created.clone());
    (StatusCode::CREATED, Json(receipt(&created))).into_response()
}

async fn by_room(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Json<Vec<Value>> {
    let delay = *state.room_delay.lock().expect("lock");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let all = state.reservations.lock().expect("lock").clone();
    Json(all.into_iter().filter(|r| r["habitacionId"] == id.as_str()).collect())
}

async fn by_student(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Json<Vec<Value>> {
    let all = state.reservations.lock().expect("lock").clone();
    Json(all.into_iter().filter(|r| r["alumnoId"] == id.as_str()).collect())
}

async fn update(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut reservations = state.reservations.lock().expect("lock");
    match reservations.iter_mut().find(|r| r["id"] == id.as_str()) {
        Some(existing) => {
            *existing = body.clone();
            Json(receipt(&body)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(state): State<Arc<BackendState>>, Path(id): Path<String>) -> StatusCode {
    if let Some(status) = forced(&state.delete_status) {
        return status;
    }
    let mut reservations = state.reservations.lock().expect("lock");
    let before = reservations.len();
    reservations.retain(|r| r["id"] != id.as_str());
    if reservations.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let token = state.login_token.lock().expect("lock").clone();
    let role = state.login_role.lock().expect("lock").clone();
    let mut response = json!({ "token": token });
    if let Some(role) = role {
        response["rol"] = Value::String(role);
    }
    Json(response).into_response()
}
