use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::route::routine::model::Routine;

/// A single routine entry within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RoutineEntry {
	pub id: Uuid,
	pub routine: String,
	pub note: String,
}

/// Every routine entry logged on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DayLog {
	pub date: NaiveDate,
	pub entries: Vec<RoutineEntry>,
}

/// Groups routines by day, oldest day first. Entries keep their
/// relative order within a day.
pub fn group_by_date(mut routines: Vec<Routine>) -> Vec<DayLog> {
	routines.sort_by_key(|routine| routine.date);

	let mut days: Vec<DayLog> = Vec::new();

	for routine in routines {
		let entry = RoutineEntry {
			id: routine.id,
			routine: routine.routine,
			note: routine.note,
		};

		match days.last_mut() {
			Some(day) if day.date == routine.date => day.entries.push(entry),
			_ => days.push(DayLog {
				date: routine.date,
				entries: vec![entry],
			}),
		}
	}

	days
}
