use axum::extract::State;
use macros::route;

use crate::{extract::Json, openapi::tag, Assistant};

use super::{model, Error, RouteError};

/// Ask the assistant
/// Returns a skincare recommendation for a free-text concern, formatted as
/// Markdown with headings and bullet points.
#[route(tag = tag::ASSISTANT)]
pub async fn ask_assistant(
	State(assistant): State<Assistant>,
	Json(input): Json<model::AdviceInput>,
) -> Result<Json<model::Advice>, RouteError> {
	let message = assistant
		.advise(&input.concern)
		.await
		.map_err(Error::Upstream)?;

	Ok(Json(model::Advice { message }))
}
