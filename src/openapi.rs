use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

pub mod tag {
	pub const REMINDER: &str = "Reminder";
	pub const SKIN: &str = "Skin condition";
	pub const ASSISTANT: &str = "Assistant";
	pub const ROUTINE: &str = "Routine";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Skincare Tracker")
		.summary("Reminders, skin condition tracking and an AI skincare assistant")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::REMINDER.into(),
			description: Some("Daily email reminders".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::SKIN.into(),
			description: Some("Skin condition log and trend".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::ASSISTANT.into(),
			description: Some("AI skincare recommendations".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::ROUTINE.into(),
			description: Some("Daily routine log".into()),
			..Default::default()
		})
		.default_response_with::<Json<error::ErrorResponse>, _>(|res| {
			res.example(error::ErrorResponse {
				success: false,
				message: "a valid email is required".into(),
				errors: error::Message::new("a valid email is required")
					.field("email")
					.into_vec(),
			})
		})
}
