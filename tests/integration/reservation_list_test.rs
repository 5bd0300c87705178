//! Integration tests for per-scope reservation lists over HTTP.

mod helpers;

use std::time::Duration;

use alquiler_booking::{Scope, ScopePhase};
use alquiler_core::types::{ReservationId, RoomId, UserId};
use alquiler_entity::reservation::ReservationStatus;

fn id(raw: &str) -> ReservationId {
    ReservationId::new(raw).expect("reservation id")
}

#[tokio::test]
async fn test_load_all_parses_backend_reservations() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![
        helpers::reservation_json("res-1", "room-42", "alumno-1"),
        helpers::reservation_json("res-2", "room-7", "alumno-2"),
    ]);
    let session = helpers::booking_session(&backend.config(), Some("token"));

    session.list().load_all().await;

    let all = session.list().scope(&Scope::All);
    assert_eq!(all.phase, ScopePhase::Loaded);
    assert_eq!(all.reservations.len(), 2);
    let second = session.list().find(&id("res-2")).expect("res-2");
    assert_eq!(second.student_email.as_deref(), Some("alumno-2@example.org"));
    assert_eq!(second.status, ReservationStatus::Pending);
}

#[tokio::test]
async fn test_load_all_failure_keeps_previous_snapshot() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![helpers::reservation_json("res-1", "room-42", "alumno-1")]);
    let session = helpers::booking_session(&backend.config(), Some("token"));
    session.list().load_all().await;

    *backend.state.list_status.lock().expect("lock") = Some(503);
    session.list().load_all().await;

    assert_eq!(session.list().reservations(&Scope::All).len(), 1);
    assert_eq!(
        session.list().error(&Scope::All).as_deref(),
        Some("Error al cargar reservas: 503")
    );
}

#[tokio::test]
async fn test_unreadable_list_keeps_previous_snapshot() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![helpers::reservation_json("res-1", "room-42", "alumno-1")]);
    let session = helpers::booking_session(&backend.config(), Some("token"));
    session.list().load_all().await;

    *backend.state.list_raw_body.lock().expect("lock") = Some(
        r#"[{"id":"res-2","habitacionId":"room-7","fechaInicio":null,"fechaFin":"2025-06-05"}]"#
            .to_string(),
    );
    session.list().load_all().await;

    let all = session.list().scope(&Scope::All);
    assert_eq!(all.phase, ScopePhase::Error);
    assert_eq!(all.reservations.len(), 1);
    assert_eq!(all.reservations[0].id, id("res-1"));
    let message = all.error.expect("error message");
    assert!(message.starts_with("Error al cargar reservas: unreadable response (HTTP 200)"));
}

#[tokio::test]
async fn test_room_timeout_empties_room_scope() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![helpers::reservation_json("res-1", "room-42", "alumno-1")]);
    let session = helpers::booking_session(&backend.config(), Some("token"));
    let room = RoomId::new("room-42").expect("room id");

    session.list().load_by_room(&room).await;
    assert_eq!(session.list().reservations(&Scope::Room(room.clone())).len(), 1);

    *backend.state.room_delay.lock().expect("lock") = Some(Duration::from_secs(3));
    session.list().load_by_room(&room).await;

    let scoped = session.list().scope(&Scope::Room(room));
    assert!(scoped.reservations.is_empty());
    assert_eq!(scoped.phase, ScopePhase::Error);
    assert!(
        scoped
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Error al cargar reservas: "))
    );
}

#[tokio::test]
async fn test_load_by_student_filters_server_side() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![
        helpers::reservation_json("res-1", "room-42", "alumno-1"),
        helpers::reservation_json("res-2", "room-7", "alumno-2"),
    ]);
    let session = helpers::booking_session(&backend.config(), Some("token"));
    let student = UserId::new("alumno-2").expect("user id");

    session.list().load_by_student(&student).await;

    let mine = session.list().reservations(&Scope::Student(student));
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, id("res-2"));
}

#[tokio::test]
async fn test_delete_reloads_all() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![
        helpers::reservation_json("res-1", "room-42", "alumno-1"),
        helpers::reservation_json("res-7", "room-42", "alumno-1"),
    ]);
    let session = helpers::booking_session(&backend.config(), Some("token"));

    assert!(session.delete(id("res-7")).await);

    assert_eq!(backend.state.list_all_calls(), 1);
    let all = session.list().reservations(&Scope::All);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id("res-1"));
}

#[tokio::test]
async fn test_failed_delete_reports_and_reloads_once() {
    let backend = helpers::MockBackend::start().await;
    *backend.state.delete_status.lock().expect("lock") = Some(500);
    let session = helpers::booking_session(&backend.config(), Some("token"));

    assert!(!session.delete(id("res-7")).await);

    assert_eq!(backend.state.list_all_calls(), 1);
    assert_eq!(
        session.list().error(&Scope::All).as_deref(),
        Some("Error al eliminar: HTTP 500")
    );
}

#[tokio::test]
async fn test_status_update_round_trip() {
    let backend = helpers::MockBackend::start().await;
    backend.seed(vec![helpers::reservation_json("res-1", "room-42", "alumno-1")]);
    let session = helpers::booking_session(&backend.config(), Some("token"));
    session.list().load_all().await;

    let current = session.list().find(&id("res-1")).expect("res-1");
    assert!(
        session
            .update(id("res-1"), current.with_status(ReservationStatus::Confirmed))
            .await
    );

    let reloaded = session.list().find(&id("res-1")).expect("res-1");
    assert_eq!(reloaded.status, ReservationStatus::Confirmed);
    assert_eq!(
        backend.state.reservations.lock().expect("lock")[0]["estadoReserva"],
        "CONFIRMADA"
    );
}

#[tokio::test]
async fn test_update_of_missing_reservation_reports() {
    let backend = helpers::MockBackend::start().await;
    let session = helpers::booking_session(&backend.config(), Some("token"));
    let ghost = alquiler_entity::reservation::Reservation {
        id: id("res-404"),
        room_id: RoomId::new("room-1").expect("room id"),
        student_id: None,
        student_email: None,
        owner_id: None,
        owner_email: None,
        entry_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        exit_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 2).expect("date"),
        status: ReservationStatus::Cancelled,
    };

    assert!(!session.update(id("res-404"), ghost).await);
    assert_eq!(
        session.list().error(&Scope::All).as_deref(),
        Some("Error al actualizar: HTTP 404")
    );
}
