//! Scripted in-memory collaborators for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use alquiler_core::error::{AppError, ErrorKind};
use alquiler_core::result::AppResult;
use alquiler_core::traits::IdentityProvider;
use alquiler_core::types::{ApiResponse, ReservationId, RoomId, UserId};
use alquiler_entity::reservation::{
    Reservation, ReservationReceipt, ReservationRequest, ReservationStatus,
};

use crate::gateway::ReservationGateway;

pub(crate) type Reply<T> = AppResult<ApiResponse<T>>;

/// A reply that arrives after `delay`.
pub(crate) struct Scripted<T> {
    pub delay: Duration,
    pub reply: Reply<T>,
}

pub(crate) fn ok<T>(body: T) -> Reply<T> {
    Ok(ApiResponse::new(200, Some(body)))
}

pub(crate) fn status<T>(code: u16) -> Reply<T> {
    Ok(ApiResponse::new(code, None))
}

pub(crate) fn timeout<T>() -> Reply<T> {
    Err(AppError::network("timeout"))
}

/// A 2xx answer whose body could not be read.
pub(crate) fn unreadable<T>(code: u16) -> Reply<T> {
    Err(AppError::new(
        ErrorKind::Serialization,
        format!("unreadable response (HTTP {code}): invalid type: null"),
    ))
}

pub(crate) fn receipt(id: &str) -> ReservationReceipt {
    ReservationReceipt {
        id: ReservationId::new(id).expect("id"),
        entry_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        exit_date: NaiveDate::from_ymd_opt(2025, 6, 5).expect("date"),
        status: ReservationStatus::Pending,
    }
}

pub(crate) fn reservation(id: &str, room: &str) -> Reservation {
    Reservation {
        id: ReservationId::new(id).expect("id"),
        room_id: RoomId::new(room).expect("room"),
        student_id: None,
        student_email: None,
        owner_id: None,
        owner_email: None,
        entry_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        exit_date: NaiveDate::from_ymd_opt(2025, 6, 5).expect("date"),
        status: ReservationStatus::Pending,
    }
}

/// Gateway whose replies are set per endpoint.
///
/// `list_all` pops scripted replies first and falls back to
/// `all_default` once the script is exhausted.
#[derive(Debug)]
pub(crate) struct FakeGateway {
    pub create_reply: Mutex<Reply<ReservationReceipt>>,
    pub all_script: Mutex<VecDeque<(Duration, Reply<Vec<Reservation>>)>>,
    pub all_default: Mutex<Reply<Vec<Reservation>>>,
    pub room_reply: Mutex<Reply<Vec<Reservation>>>,
    pub student_reply: Mutex<Reply<Vec<Reservation>>>,
    pub update_reply: Mutex<Reply<ReservationReceipt>>,
    pub delete_reply: Mutex<Reply<()>>,
    pub created: Mutex<Vec<ReservationRequest>>,
    pub list_all_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            create_reply: Mutex::new(ok(receipt("res-1"))),
            all_script: Mutex::new(VecDeque::new()),
            all_default: Mutex::new(ok(Vec::new())),
            room_reply: Mutex::new(ok(Vec::new())),
            student_reply: Mutex::new(ok(Vec::new())),
            update_reply: Mutex::new(ok(receipt("res-1"))),
            delete_reply: Mutex::new(Ok(ApiResponse::new(204, None))),
            created: Mutex::new(Vec::new()),
            list_all_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeGateway {
    pub fn script_all(&self, scripted: Scripted<Vec<Reservation>>) {
        self.all_script
            .lock()
            .expect("lock")
            .push_back((scripted.delay, scripted.reply));
    }

    pub fn list_all_calls(&self) -> usize {
        self.list_all_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReservationGateway for FakeGateway {
    async fn create(
        &self,
        request: &ReservationRequest,
    ) -> AppResult<ApiResponse<ReservationReceipt>> {
        self.created.lock().expect("lock").push(request.clone());
        self.create_reply.lock().expect("lock").clone()
    }

    async fn list_all(&self) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.list_all_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.all_script.lock().expect("lock").pop_front();
        match scripted {
            Some((delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => self.all_default.lock().expect("lock").clone(),
        }
    }

    async fn list_by_room(&self, _room_id: &RoomId) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.room_reply.lock().expect("lock").clone()
    }

    async fn list_by_student(
        &self,
        _student_id: &UserId,
    ) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.student_reply.lock().expect("lock").clone()
    }

    async fn update(
        &self,
        _id: &ReservationId,
        _reservation: &Reservation,
    ) -> AppResult<ApiResponse<ReservationReceipt>> {
        self.update_reply.lock().expect("lock").clone()
    }

    async fn delete(&self, _id: &ReservationId) -> AppResult<ApiResponse<()>> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_reply.lock().expect("lock").clone()
    }
}

/// Identity with a fixed subject.
#[derive(Debug, Default)]
pub(crate) struct StaticIdentity {
    pub subject: Option<String>,
}

impl IdentityProvider for StaticIdentity {
    fn bearer_token(&self) -> Option<String> {
        self.subject.as_ref().map(|s| format!("token-for-{s}"))
    }

    fn subject(&self) -> Option<String> {
        self.subject.clone()
    }
}
