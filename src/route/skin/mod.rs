use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};

use crate::{error, AppState};

pub mod model;
pub mod route;

/// Skin condition routes only fail with shared errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/save-skin-condition",
			post_with(save_skin_condition, save_skin_condition_docs),
		)
		.api_route(
			"/skin-conditions",
			get_with(list_skin_conditions, list_skin_conditions_docs),
		)
		.api_route(
			"/skin-conditions/insights",
			get_with(get_insights, get_insights_docs),
		)
		.api_route("/skin-conditions/trend", get_with(get_trend, get_trend_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> axum::http::StatusCode {
		match *self {}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match *self {}
	}
}
