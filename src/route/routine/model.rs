use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub use crate::routine::DayLog;

/// A product used as part of the skincare routine on a given day.
#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Routine {
	/// The unique identifier of the entry.
	pub id: Uuid,
	/// The day the routine was performed.
	pub date: NaiveDate,
	/// The product used, such as "Cleanser" or a custom product name.
	pub routine: String,
	/// Optional notes, such as how the skin felt.
	pub note: String,
	/// The creation time of the entry.
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateRoutineInput {
	/// The product used.
	#[validate(length(min = 1, max = 128, message = "please select or enter a product"))]
	pub routine: String,
	/// Optional notes.
	#[serde(default)]
	#[validate(length(max = 2048))]
	pub note: String,
	/// The day the routine was performed. Defaults to today.
	pub date: Option<NaiveDate>,
}

/// A routine entry ready to be stored.
#[derive(Debug, Clone)]
pub struct NewRoutine {
	pub date: NaiveDate,
	pub routine: String,
	pub note: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UpdateRoutineInput {
	/// The product used.
	#[validate(length(min = 1, max = 128, message = "please select or enter a product"))]
	pub routine: Option<String>,
	/// Notes about the routine.
	#[validate(length(max = 2048))]
	pub note: Option<String>,
}
