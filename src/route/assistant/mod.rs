use aide::axum::{routing::post_with, ApiRouter};
use axum::http::StatusCode;

use crate::{assistant, error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Upstream(#[from] assistant::Error),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	ApiRouter::new().api_route(
		"/ai-assistant",
		post_with(route::ask_assistant, route::ask_assistant_docs),
	)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::Upstream(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::Upstream(error) => {
				tracing::error!(%error, "assistant request failed");

				error::Message::new("Failed to fetch AI response").into_vec()
			}
		}
	}
}
