use std::borrow::Cow;

use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

/// Confirms that a document was stored.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Saved {
	pub success: bool,
	/// A human-readable confirmation.
	pub message: Cow<'static, str>,
	/// The id of the stored document.
	pub id: Uuid,
}

impl Saved {
	pub fn new(message: impl Into<Cow<'static, str>>, id: Uuid) -> Self {
		Self {
			success: true,
			message: message.into(),
			id,
		}
	}
}
