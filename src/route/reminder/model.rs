use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

pub use crate::schedule::ScheduledReminder;
use crate::schedule::ReminderTime;

fn parse_time(time: &str) -> Result<ReminderTime, ValidationError> {
	time.parse().map_err(|e: crate::schedule::ParseTimeError| {
		let mut error = ValidationError::new("time");
		error.message = Some(e.to_string().into());
		error
	})
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
	parse_time(time).map(|_| ())
}

/// A daily email reminder.
///
/// Reminders are never deduplicated: submitting the same email and time
/// twice stores two reminders, each with its own trigger.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct Reminder {
	/// The unique identifier of the reminder.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The address the reminder is sent to.
	#[validate(email(message = "a valid email is required"))]
	pub email: String,
	/// The local time of day the reminder is sent at, formatted as `HH:MM`.
	#[validate(custom(function = "validate_time"))]
	pub time: String,
	/// The creation time of the reminder.
	#[serde(skip_deserializing)]
	pub created_at: DateTime<Utc>,
}

impl CreateReminder {
	/// The parsed time of day.
	pub fn reminder_time(&self) -> Result<ReminderTime, ValidationErrors> {
		parse_time(&self.time).map_err(|error| {
			let mut errors = ValidationErrors::new();
			errors.add("time", error);
			errors
		})
	}
}
