use axum::extract::State;
use chrono::Utc;
use chrono_tz::Tz;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path},
	openapi::tag,
	routine, Database,
};

use super::{model, Error, RouteError};

/// Get routines
/// Returns the routine log grouped by day, oldest day first.
#[route(tag = tag::ROUTINE)]
pub async fn list_routines(
	State(database): State<Database>,
) -> Result<Json<Vec<model::DayLog>>, RouteError> {
	let routines = database.list_routines().await?;

	Ok(Json(routine::group_by_date(routines)))
}

/// Log routine
/// Records a product used on a given day, today by default.
#[route(tag = tag::ROUTINE)]
pub async fn create_routine(
	State(database): State<Database>,
	State(timezone): State<Tz>,
	Json(input): Json<model::CreateRoutineInput>,
) -> Result<Json<model::Routine>, RouteError> {
	let date = input
		.date
		.unwrap_or_else(|| Utc::now().with_timezone(&timezone).date_naive());

	let routine = database
		.insert_routine(&model::NewRoutine {
			date,
			routine: input.routine,
			note: input.note,
		})
		.await?;

	Ok(Json(routine))
}

/// Update routine
/// Updates the product or note of an existing routine entry.
#[route(tag = tag::ROUTINE)]
pub async fn update_routine(
	State(database): State<Database>,
	Path(routine_id): Path<Uuid>,
	Json(input): Json<model::UpdateRoutineInput>,
) -> Result<Json<model::Routine>, RouteError> {
	let routine = database.update_routine(routine_id, &input).await?;

	Ok(Json(routine.ok_or(Error::UnknownRoutine(routine_id))?))
}

/// Delete routine
/// Deletes a routine entry by its unique id.
#[route(tag = tag::ROUTINE)]
pub async fn delete_routine(
	State(database): State<Database>,
	Path(routine_id): Path<Uuid>,
) -> Result<(), RouteError> {
	if !database.delete_routine(routine_id).await? {
		return Err(Error::UnknownRoutine(routine_id).into());
	}

	Ok(())
}

#[cfg(test)]
mod test {
	use chrono::Utc;

	use crate::test::{prelude::*, TIMEZONE};

	async fn log(harness: &Harness, body: Value) -> Value {
		harness.server.post("/routines").json(&body).await.json::<Value>()
	}

	#[tokio::test]
	async fn test_routines_are_grouped_by_day() {
		let harness = Harness::new();

		log(&harness, json!({ "routine": "Sunscreen", "date": "2024-03-02" })).await;
		log(&harness, json!({ "routine": "Cleanser", "date": "2024-03-01", "note": "gentle" })).await;
		log(&harness, json!({ "routine": "Toner", "date": "2024-03-01" })).await;

		let days = harness.server.get("/routines").await.json::<Value>();

		assert_eq!(days[0]["date"], "2024-03-01");
		assert_eq!(days[0]["entries"][0]["routine"], "Cleanser");
		assert_eq!(days[0]["entries"][0]["note"], "gentle");
		assert_eq!(days[0]["entries"][1]["routine"], "Toner");
		assert_eq!(days[1]["date"], "2024-03-02");
		assert_eq!(days.as_array().map(Vec::len), Some(2));
	}

	#[tokio::test]
	async fn test_routine_defaults_to_today() {
		let harness = Harness::new();
		let today = Utc::now().with_timezone(&TIMEZONE).date_naive();

		let routine = log(&harness, json!({ "routine": "Moisturizer" })).await;

		assert_eq!(routine["date"], today.to_string());
		assert_eq!(routine["note"], "");
	}

	#[tokio::test]
	async fn test_routine_requires_product() {
		let harness = Harness::new();

		let response = harness
			.server
			.post("/routines")
			.json(&json!({ "routine": "" }))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_update_and_delete_routine() {
		let harness = Harness::new();
		let routine = log(&harness, json!({ "routine": "Serum", "date": "2024-03-01" })).await;
		let path = format!("/routines/{}", routine["id"].as_str().unwrap());

		let updated = harness
			.server
			.put(&path)
			.json(&json!({ "note": "vitamin C" }))
			.await
			.json::<Value>();

		assert_eq!(updated["routine"], "Serum");
		assert_eq!(updated["note"], "vitamin C");

		assert_eq!(harness.server.delete(&path).await.status_code(), StatusCode::OK);
		assert_eq!(
			harness.server.delete(&path).await.status_code(),
			StatusCode::NOT_FOUND
		);
		assert_eq!(
			harness
				.server
				.put(&path)
				.json(&json!({ "routine": "Toner" }))
				.await
				.status_code(),
			StatusCode::NOT_FOUND
		);
	}
}
