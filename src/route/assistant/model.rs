use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_concern(concern: &str) -> Result<(), ValidationError> {
	if concern.trim().is_empty() {
		let mut error = ValidationError::new("required");
		error.message = Some("Please provide a skin concern.".into());
		return Err(error);
	}

	Ok(())
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct AdviceInput {
	/// A free-text description of the skin concern.
	#[validate(custom(function = "validate_concern"))]
	pub concern: String,
}

/// The assistant's recommendation, formatted as Markdown.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Advice {
	pub message: String,
}
