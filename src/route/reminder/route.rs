use std::sync::Arc;

use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path},
	openapi::tag,
	route::model::Saved,
	schedule::Scheduler,
	Database,
};

use super::{model, Error, RouteError};

/// Set reminder
/// Stores a daily skincare reminder and starts sending it to the given email
/// every day at `time`, interpreted in the server's reminder timezone.
#[route(tag = tag::REMINDER)]
pub async fn set_reminder(
	State(database): State<Database>,
	State(scheduler): State<Arc<Scheduler>>,
	Json(input): Json<model::CreateReminder>,
) -> Result<Json<Saved>, RouteError> {
	let time = input.reminder_time()?;
	let reminder = database.insert_reminder(&input).await?;

	scheduler.schedule(reminder.id, reminder.email, time).await;

	Ok(Json(Saved::new("Reminder saved and scheduled!", reminder.id)))
}

/// List reminders
/// Returns every scheduled reminder, soonest first.
#[route(tag = tag::REMINDER)]
pub async fn list_reminders(
	State(scheduler): State<Arc<Scheduler>>,
) -> Json<Vec<model::ScheduledReminder>> {
	Json(scheduler.list().await)
}

/// Cancel reminder
/// Stops a reminder and deletes it by its unique id.
#[route(tag = tag::REMINDER)]
pub async fn cancel_reminder(
	State(database): State<Database>,
	State(scheduler): State<Arc<Scheduler>>,
	Path(reminder_id): Path<Uuid>,
) -> Result<(), RouteError> {
	// The trigger keeps running if the document cannot be deleted
	let deleted = database.delete_reminder(reminder_id).await?;
	let cancelled = scheduler.cancel(reminder_id).await;

	if !cancelled && !deleted {
		return Err(Error::UnknownReminder(reminder_id).into());
	}

	Ok(())
}
