use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub use crate::trend::{Insight, TrendReport};

/// Rejects ratings that are absent in substance: `null`, `false`, `0` and `""`.
///
/// Any other value is accepted as-is, including non-numeric strings.
fn validate_rating(rating: &Value) -> Result<(), ValidationError> {
	let missing = match rating {
		Value::Null | Value::Bool(false) => true,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty(),
		_ => false,
	};

	if missing {
		let mut error = ValidationError::new("required");
		error.message = Some("rating is required".into());
		return Err(error);
	}

	Ok(())
}

/// A self-assessment of the skin's condition.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct SkinCondition {
	/// The unique identifier of the entry.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// A free-text description of the skin's condition.
	#[validate(length(min = 1, message = "description is required"))]
	pub description: String,
	/// The rating, intended to be between 1 and 10. Stored exactly as submitted.
	#[validate(custom(function = "validate_rating"))]
	pub rating: Value,
	/// The creation time of the entry.
	#[serde(skip_deserializing)]
	pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
	use serde_json::json;
	use validator::Validate;

	use super::CreateSkinCondition;

	fn input(description: &str, rating: serde_json::Value) -> CreateSkinCondition {
		CreateSkinCondition {
			description: description.into(),
			rating,
		}
	}

	#[test]
	fn test_rating_accepts_any_present_value() {
		for rating in [json!(7), json!(11), json!(-3), json!("7"), json!("great"), json!(true)] {
			assert!(input("calm", rating.clone()).validate().is_ok(), "{rating}");
		}
	}

	#[test]
	fn test_rating_rejects_empty_values() {
		for rating in [json!(null), json!(0), json!(0.0), json!(""), json!(false)] {
			let errors = input("calm", rating.clone()).validate().unwrap_err();

			assert!(errors.field_errors().contains_key("rating"), "{rating}");
		}
	}

	#[test]
	fn test_description_required() {
		let errors = input("", json!(5)).validate().unwrap_err();

		assert!(errors.field_errors().contains_key("description"));
	}
}
