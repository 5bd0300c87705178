//! Reservation listing and management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use alquiler_booking::{BookingSession, Scope};
use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;
use alquiler_core::traits::IdentityProvider;
use alquiler_core::types::{ReservationId, RoomId, UserId};
use alquiler_entity::reservation::{Reservation, ReservationReceipt, ReservationStatus};

use crate::context::ClientContext;
use crate::output::{self, OutputFormat};

/// Arguments for reservation commands
#[derive(Debug, Args)]
pub struct ReservationsArgs {
    /// Reservation subcommand
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

/// Reservation subcommands
#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List every reservation visible to the current user
    List,
    /// List reservations of one room
    Room {
        /// Room ID
        room_id: RoomId,
    },
    /// List reservations of one student (defaults to the logged-in user)
    Student {
        /// Student ID
        student_id: Option<UserId>,
    },
    /// Show one reservation
    Show {
        /// Reservation ID
        id: ReservationId,
    },
    /// Delete a reservation
    Delete {
        /// Reservation ID
        id: ReservationId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Change the status of a reservation
    Status {
        /// Reservation ID
        id: ReservationId,
        /// New status (PENDIENTE, CONFIRMADA, CANCELADA, RECHAZADA)
        status: String,
    },
}

/// Reservation display row for table output
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct ReservationRow {
    /// Reservation ID
    id: String,
    /// Room ID
    room: String,
    /// Student
    student: String,
    /// Entry date
    entry: String,
    /// Exit date
    exit: String,
    /// Status
    status: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            room: r.room_id.to_string(),
            student: r
                .student_email
                .clone()
                .or_else(|| r.student_id.as_ref().map(ToString::to_string))
                .unwrap_or_else(|| "-".to_string()),
            entry: r.entry_date.to_string(),
            exit: r.exit_date.to_string(),
            status: r.status.to_string(),
        }
    }
}

impl ReservationRow {
    /// Row for a freshly created reservation; the receipt does not name
    /// the student.
    pub(crate) fn from_receipt(receipt: &ReservationReceipt, room_id: &RoomId) -> Self {
        Self {
            id: receipt.id.to_string(),
            room: room_id.to_string(),
            student: "-".to_string(),
            entry: receipt.entry_date.to_string(),
            exit: receipt.exit_date.to_string(),
            status: receipt.status.to_string(),
        }
    }
}

/// Execute reservation commands
pub async fn execute(
    args: &ReservationsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = ClientContext::new(config).await?;
    ctx.require_login()?;
    let session = ctx.booking_session();

    match &args.command {
        ReservationsCommand::List => {
            session.list().load_all().await;
            print_scope(&session, &Scope::All, format)?;
        }
        ReservationsCommand::Room { room_id } => {
            session.list().load_by_room(room_id).await;
            print_scope(&session, &Scope::Room(room_id.clone()), format)?;
        }
        ReservationsCommand::Student { student_id } => {
            let student_id = match student_id {
                Some(id) => id.clone(),
                None => ctx
                    .identity
                    .subject()
                    .map(UserId::new)
                    .transpose()?
                    .ok_or_else(|| {
                        AppError::validation("No student id given and the token has no subject")
                    })?,
            };
            session.list().load_by_student(&student_id).await;
            print_scope(&session, &Scope::Student(student_id), format)?;
        }
        ReservationsCommand::Show { id } => {
            let reservation = find(&session, id).await?;
            output::print_item(&reservation, format);
        }
        ReservationsCommand::Delete { id, yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete reservation '{id}'?"))
                    .default(false)
                    .interact()
                    .map_err(super::input_error)?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            if !session.delete(id.clone()).await {
                return Err(scope_error(&session, &Scope::All));
            }
            output::print_success(&format!("Reservation '{id}' deleted"));
        }
        ReservationsCommand::Status { id, status } => {
            let status = ReservationStatus::from(status.clone());
            if let ReservationStatus::Other(raw) = &status {
                output::print_warning(&format!("'{raw}' is not a known status; sending as is"));
            }

            let current = find(&session, id).await?;
            ensure_mutable(&current)?;
            if !session.update(id.clone(), current.with_status(status.clone())).await {
                return Err(scope_error(&session, &Scope::All));
            }
            output::print_success(&format!("Reservation '{id}' is now {status}"));
        }
    }

    Ok(())
}

/// Print a scope's snapshot, or fail with its error.
fn print_scope(session: &BookingSession, scope: &Scope, format: OutputFormat) -> Result<(), AppError> {
    let state = session.list().scope(scope);
    if state.error.is_some() {
        return Err(scope_error(session, scope));
    }
    let rows: Vec<ReservationRow> = state.reservations.iter().map(ReservationRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Load "all" and look a reservation up in it.
async fn find(session: &BookingSession, id: &ReservationId) -> Result<Reservation, AppError> {
    session.list().load_all().await;
    if let Some(message) = session.list().error(&Scope::All) {
        return Err(AppError::service_unavailable(message));
    }
    session
        .list()
        .find(id)
        .ok_or_else(|| AppError::not_found(format!("Reservation '{id}' not found")))
}

/// Refuse status changes on cancelled or rejected reservations.
fn ensure_mutable(reservation: &Reservation) -> Result<(), AppError> {
    if reservation.status.is_terminal() {
        return Err(AppError::conflict(format!(
            "Reservation '{}' is {} and can no longer change",
            reservation.id, reservation.status
        )));
    }
    Ok(())
}

fn scope_error(session: &BookingSession, scope: &Scope) -> AppError {
    let message = session
        .list()
        .error(scope)
        .unwrap_or_else(|| format!("Operation on {scope} failed"));
    AppError::service_unavailable(message)
}
