use aide::axum::{
	routing::{delete_with, get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown reminder {0}")]
	UnknownReminder(Uuid),
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
		.api_route("/set-reminder", post_with(set_reminder, set_reminder_docs))
		.api_route("/reminders", get_with(list_reminders, list_reminders_docs))
		.api_route(
			"/reminders/:id",
			delete_with(cancel_reminder, cancel_reminder_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownReminder(..) => StatusCode::NOT_FOUND,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownReminder(reminder) => error::Message::new("unknown reminder")
				.detail("reminder", reminder.to_string())
				.into_vec(),
		}
	}
}
