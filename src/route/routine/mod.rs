use aide::axum::{
	routing::{get_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown routine {0}")]
	UnknownRoutine(Uuid),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/routines",
			get_with(list_routines, list_routines_docs).post_with(create_routine, create_routine_docs),
		)
		.api_route(
			"/routines/:id",
			put_with(update_routine, update_routine_docs)
				.delete_with(delete_routine, delete_routine_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownRoutine(..) => StatusCode::NOT_FOUND,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownRoutine(routine) => error::Message::new("unknown routine")
				.detail("routine", routine.to_string())
				.into_vec(),
		}
	}
}
