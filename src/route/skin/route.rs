use axum::extract::State;
use chrono_tz::Tz;
use macros::route;

use crate::{extract::Json, openapi::tag, route::model::Saved, trend, Database};

use super::{model, RouteError};

/// Save skin condition
/// Stores a description of the skin's condition along with a rating.
/// The rating is stored exactly as submitted.
#[route(tag = tag::SKIN)]
pub async fn save_skin_condition(
	State(database): State<Database>,
	Json(input): Json<model::CreateSkinCondition>,
) -> Result<Json<Saved>, RouteError> {
	let condition = database.insert_skin_condition(&input).await?;

	tracing::debug!(entry = %condition.id, rating = %condition.rating, "skin condition saved");

	Ok(Json(Saved::new("Skin condition saved!", condition.id)))
}

/// Get skin conditions
/// Returns every stored skin condition, oldest first.
#[route(tag = tag::SKIN)]
pub async fn list_skin_conditions(
	State(database): State<Database>,
) -> Result<Json<Vec<model::SkinCondition>>, RouteError> {
	Ok(Json(database.list_skin_conditions().await?))
}

/// Get rating chart
/// Returns one point per stored skin condition, oldest first, dated in the
/// server's reminder timezone.
#[route(tag = tag::SKIN)]
pub async fn get_insights(
	State(database): State<Database>,
	State(timezone): State<Tz>,
) -> Result<Json<Vec<model::Insight>>, RouteError> {
	let insights = database
		.list_skin_conditions()
		.await?
		.iter()
		.map(|entry| model::Insight::new(entry, timezone))
		.collect();

	Ok(Json(insights))
}

/// Get trend
/// Compares the two most recent numeric ratings.
#[route(tag = tag::SKIN)]
pub async fn get_trend(
	State(database): State<Database>,
) -> Result<Json<model::TrendReport>, RouteError> {
	let entries = database.list_skin_conditions().await?;

	Ok(Json(trend::analyze(&entries).into()))
}

#[cfg(test)]
mod test {
	use chrono::{TimeZone, Utc};
	use uuid::Uuid;

	use crate::{route::skin::model::SkinCondition, test::prelude::*};

	async fn save(harness: &Harness, description: &str, rating: Value) -> Value {
		harness
			.server
			.post("/save-skin-condition")
			.json(&json!({ "description": description, "rating": rating }))
			.await
			.json::<Value>()
	}

	#[tokio::test]
	async fn test_save_skin_condition() {
		let harness = Harness::new();

		let body = save(&harness, "slightly dry", json!(6)).await;
		let stored = harness.store.skin_conditions.read().await.clone();

		assert_eq!(body["success"], true);
		assert_eq!(body["message"], "Skin condition saved!");
		assert_eq!(body["id"], stored[0].id.to_string());
		assert_eq!(stored[0].description, "slightly dry");
		assert_eq!(stored[0].rating, json!(6));
	}

	#[tokio::test]
	async fn test_non_numeric_rating_is_stored_verbatim() {
		let harness = Harness::new();

		let body = save(&harness, "glowing", json!("great")).await;

		assert_eq!(body["success"], true);
		assert_eq!(
			harness.store.skin_conditions.read().await[0].rating,
			json!("great")
		);
	}

	#[tokio::test]
	async fn test_save_skin_condition_rejects_missing_fields() {
		let harness = Harness::new();

		for body in [
			json!({ "rating": 5 }),
			json!({ "description": "", "rating": 5 }),
			json!({ "description": "calm" }),
			json!({ "description": "calm", "rating": null }),
			json!({ "description": "calm", "rating": 0 }),
			json!({ "description": "calm", "rating": "" }),
		] {
			let response = harness.server.post("/save-skin-condition").json(&body).await;

			assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
		}

		assert!(harness.store.skin_conditions.read().await.is_empty());
	}

	#[tokio::test]
	async fn test_save_skin_condition_storage_failure() {
		let harness = Harness::builder().broken_store().build();

		let response = harness
			.server
			.post("/save-skin-condition")
			.json(&json!({ "description": "calm", "rating": 5 }))
			.await;

		assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(response.json::<Value>()["success"], false);
	}

	#[tokio::test]
	async fn test_trend_follows_latest_ratings() {
		let harness = Harness::new();

		let trend = harness.server.get("/skin-conditions/trend").await.json::<Value>();

		assert_eq!(trend["trend"], "not_enough_data");
		assert_eq!(trend["message"], "Not enough data to analyze trends.");

		save(&harness, "breakout", json!(4)).await;

		let trend = harness.server.get("/skin-conditions/trend").await.json::<Value>();

		assert_eq!(trend["trend"], "not_enough_data");

		save(&harness, "better", json!("7")).await;

		let trend = harness.server.get("/skin-conditions/trend").await.json::<Value>();

		assert_eq!(trend["trend"], "improving");
		assert_eq!(trend["message"], "Your skin condition is improving!");

		save(&harness, "unsure", json!("meh")).await;

		let trend = harness.server.get("/skin-conditions/trend").await.json::<Value>();

		assert_eq!(trend["trend"], "unchanged");
		assert_eq!(trend["message"], "No significant change in skin condition.");
	}

	#[tokio::test]
	async fn test_insights_are_dated_locally() {
		let harness = Harness::new();

		// 20:00 UTC is already the next day in Kolkata
		harness.store.skin_conditions.write().await.push(SkinCondition {
			id: Uuid::new_v4(),
			description: "calm".into(),
			rating: json!(8),
			created_at: Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap(),
		});

		let insights = harness
			.server
			.get("/skin-conditions/insights")
			.await
			.json::<Value>();

		assert_eq!(
			insights,
			json!([{ "date": "2024-03-02", "description": "calm", "rating": 8 }])
		);
	}

	#[tokio::test]
	async fn test_list_skin_conditions_oldest_first() {
		let harness = Harness::new();

		save(&harness, "first", json!(3)).await;
		save(&harness, "second", json!(5)).await;

		let list = harness.server.get("/skin-conditions").await.json::<Value>();

		assert_eq!(list[0]["description"], "first");
		assert_eq!(list[1]["description"], "second");
	}
}
