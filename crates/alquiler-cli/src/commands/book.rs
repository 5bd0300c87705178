//! Booking a room from the terminal.

use chrono::NaiveDate;
use clap::Args;

use alquiler_booking::{SelectionState, SubmitOutcome};
use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;
use alquiler_core::traits::{DatePicker, SystemDatePicker};
use alquiler_core::types::RoomId;

use super::reservations::ReservationRow;
use crate::context::ClientContext;
use crate::output::{self, OutputFormat};

/// Arguments for `book`
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Room ID
    #[arg(short, long)]
    pub room: RoomId,

    /// Entry date, YYYY-MM-DD (will prompt if not provided)
    #[arg(long)]
    pub entry: Option<NaiveDate>,

    /// Exit date, YYYY-MM-DD (will prompt if not provided)
    #[arg(long)]
    pub exit: Option<NaiveDate>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the booking flow
pub async fn execute(
    args: &BookArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = ClientContext::new(config).await?;
    ctx.require_login()?;
    let picker = SystemDatePicker;
    let session = ctx.booking_session();

    let entry = pick(&picker, args.entry, "Entry date (YYYY-MM-DD)")?;
    session.select_date(entry);
    let exit = pick(&picker, args.exit, "Exit date (YYYY-MM-DD)")?;

    let range = match session.select_date(exit) {
        SelectionState::Ready { range } => range,
        state => {
            let message = state.error().unwrap_or("select both the entry and the exit date");
            output::print_error(message);
            return Err(AppError::validation(message));
        }
    };

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Book room '{}' from {} to {} ({} nights)?",
                args.room,
                range.entry(),
                range.exit(),
                range.nights()
            ))
            .default(true)
            .interact()
            .map_err(super::input_error)?;

        if !confirm {
            session.clear_selection();
            println!("Cancelled.");
            return Ok(());
        }
    }

    match session.confirm_selection(args.room.clone()).await? {
        SubmitOutcome::Success(receipt) => {
            output::print_success(&format!("Reservation '{}' created", receipt.id));
            output::print_list(&[ReservationRow::from_receipt(&receipt, &args.room)], format);
            Ok(())
        }
        failed => {
            let message = failed.error_message().unwrap_or_default();
            output::print_error(&message);
            Err(outcome_error(&failed, message))
        }
    }
}

/// Take a date from the arguments or prompt for it, then check it with
/// the date picker.
fn pick(
    picker: &dyn DatePicker,
    given: Option<NaiveDate>,
    prompt: &str,
) -> Result<NaiveDate, AppError> {
    let date = match given {
        Some(date) => date,
        None => dialoguer::Input::<NaiveDate>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(super::input_error)?,
    };

    if !picker.is_selectable(date) {
        return Err(AppError::validation(format!(
            "{date} is in the past; pick {} or later",
            picker.today()
        )));
    }
    Ok(date)
}

/// Error kind for a failed submission.
fn outcome_error(outcome: &SubmitOutcome, message: String) -> AppError {
    match outcome {
        SubmitOutcome::ServerRejected(409) => AppError::conflict(message),
        SubmitOutcome::ServerRejected(401) => AppError::authentication(message),
        SubmitOutcome::ServerRejected(403) => AppError::authorization(message),
        SubmitOutcome::ServerRejected(400 | 422) => AppError::validation(message),
        SubmitOutcome::NetworkError(_) => AppError::network(message),
        _ => AppError::service_unavailable(message),
    }
}
