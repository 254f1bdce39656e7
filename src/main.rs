#![warn(clippy::pedantic)]

mod assistant;
mod config;
mod error;
mod extract;
mod mail;
mod openapi;
mod route;
mod routine;
mod schedule;
mod store;
mod trace;
mod trend;

use std::{fmt::Display, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{extract::FromRef, Extension, Router};
use chrono_tz::Tz;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
	config::Config,
	mail::{Retry, SmtpMailer},
	schedule::{Scheduler, SystemClock},
	store::PgStore,
};

pub type Database = Arc<dyn store::Store>;
pub type Assistant = Arc<dyn assistant::Assistant>;
pub type AppState = State;

/// The shared application state.
///
/// Reminder delivery does not live here: the scheduler only enqueues jobs,
/// which the mail worker spawned at startup consumes.
#[derive(Clone, FromRef)]
pub struct State {
	pub database: Database,
	pub scheduler: Arc<Scheduler>,
	pub assistant: Assistant,
	/// Timezone in which reminder times and chart dates are expressed.
	pub timezone: Tz,
}

/// Builds the application router, including the API documentation.
pub fn app(state: State) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.merge(route::reminder::routes())
		.merge(route::skin::routes())
		.merge(route::assistant::routes())
		.merge(route::routine::routes())
		.merge(route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive())
				.layer(Extension(Arc::new(api))),
		)
		.with_state(state)
}

/// Logs a startup failure and exits.
fn fatal(context: &str, error: impl Display) -> ! {
	tracing::error!(%error, "{context}");
	std::process::exit(1);
}

#[tokio::main]
async fn main() {
	trace::init_tracing_subscriber();
	dotenvy::dotenv().ok();

	let config = Config::from_env().unwrap_or_else(|e| fatal("invalid configuration", e));

	let store = PgStore::connect(config.database.clone())
		.await
		.unwrap_or_else(|e| fatal("failed to connect to the document store", e));

	store
		.migrate()
		.await
		.unwrap_or_else(|e| fatal("failed to migrate the document store", e));

	let mailer = SmtpMailer::new(&config.mail)
		.unwrap_or_else(|e| fatal("failed to configure the mail relay", e));

	let assistant = assistant::GeminiClient::new(&config.assistant)
		.unwrap_or_else(|e| fatal("failed to configure the assistant", e));

	let (scheduler, jobs) = Scheduler::new(SystemClock, config.timezone);

	tokio::spawn(mail::worker(
		jobs,
		Arc::new(mailer),
		Retry::new(config.mail.max_retries),
	));

	let state = State {
		database: Arc::new(store),
		scheduler: Arc::new(scheduler),
		assistant: Arc::new(assistant),
		timezone: config.timezone,
	};

	let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
		.await
		.unwrap_or_else(|e| fatal("failed to bind to port", e));

	tracing::info!(
		host = %config.host,
		port = config.port,
		timezone = %config.timezone,
		"listening"
	);

	if let Err(error) = axum::serve(listener, app(state)).await {
		fatal("server stopped", error);
	}
}
