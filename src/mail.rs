use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use lettre::{
	address::AddressError,
	message::{header::ContentType, Mailbox},
	transport::smtp::authentication::Credentials,
	AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::{sync::mpsc, task::JoinSet};

use crate::{config, schedule::ReminderJob};

pub const REMINDER_SUBJECT: &str = "🌿 Skincare Routine Reminder 🧴";
pub const REMINDER_BODY: &str = "\
Hope you're having a great day! 💖 This is your gentle reminder to take a few \
minutes for your skincare routine – because your skin deserves the best care! 🌿✨
Here’s your quick self-care checklist:
✅ Cleanse away the stress of the day 🫧
✅ Apply your favorite moisturizer for that glow ✨
✅ Don’t forget sunscreen if you’re heading out! ☀️
✅ Hydrate – because great skin starts from within! 💧

Consistency is key, and you’re doing amazing! Keep up the glow! 💕

Stay radiant,
Taru
DermaLog Team 🌸";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid address {address:?}: {source}")]
	Address {
		address: String,
		source: AddressError,
	},
	#[error("failed to build message: {0}")]
	Message(#[from] lettre::error::Error),
	#[error("smtp relay error: {reason}")]
	Relay { permanent: bool, reason: String },
}

impl From<lettre::transport::smtp::Error> for Error {
	fn from(error: lettre::transport::smtp::Error) -> Self {
		Self::Relay {
			permanent: error.is_permanent(),
			reason: error.to_string(),
		}
	}
}

impl Error {
	/// Returns true if sending the same mail again might succeed.
	pub fn should_retry(&self) -> bool {
		match self {
			Self::Address { .. } | Self::Message(..) => false,
			Self::Relay { permanent, .. } => !permanent,
		}
	}
}

/// A plain-text email ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
	pub to: String,
	pub subject: String,
	pub body: String,
}

/// The fixed reminder sent each time a trigger fires.
pub fn reminder_mail(to: &str) -> Mail {
	Mail {
		to: to.to_owned(),
		subject: REMINDER_SUBJECT.to_owned(),
		body: REMINDER_BODY.to_owned(),
	}
}

#[async_trait]
pub trait Mailer: Send + Sync {
	async fn send(&self, mail: &Mail) -> Result<(), Error>;
}

fn mailbox(address: &str) -> Result<Mailbox, Error> {
	address.parse().map_err(|source| Error::Address {
		address: address.to_owned(),
		source,
	})
}

/// Sends mail through an authenticated SMTP relay, from the relay account.
pub struct SmtpMailer {
	transport: AsyncSmtpTransport<Tokio1Executor>,
	from: Mailbox,
}

impl SmtpMailer {
	pub fn new(config: &config::Mail) -> Result<Self, Error> {
		let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
			.credentials(Credentials::new(
				config.username.clone(),
				config.password.clone(),
			))
			.build();

		Ok(Self {
			transport,
			from: mailbox(&config.username)?,
		})
	}
}

#[async_trait]
impl Mailer for SmtpMailer {
	async fn send(&self, mail: &Mail) -> Result<(), Error> {
		let message = Message::builder()
			.from(self.from.clone())
			.to(mailbox(&mail.to)?)
			.subject(mail.subject.as_str())
			.header(ContentType::TEXT_PLAIN)
			.body(mail.body.clone())?;

		let response = self.transport.send(message).await?;

		tracing::debug!(to = %mail.to, code = %response.code(), "smtp relay accepted mail");

		Ok(())
	}
}

/// Bounded exponential backoff applied to each reminder delivery.
#[derive(Debug, Clone, Copy)]
pub struct Retry {
	pub max_times: usize,
	pub min_delay: Duration,
	pub max_delay: Duration,
}

impl Retry {
	pub fn new(max_times: usize) -> Self {
		Self {
			max_times,
			min_delay: Duration::from_secs(1),
			max_delay: Duration::from_secs(60),
		}
	}

	fn backoff(self) -> ExponentialBuilder {
		ExponentialBuilder::default()
			.with_min_delay(self.min_delay)
			.with_max_delay(self.max_delay)
			.with_max_times(self.max_times)
	}
}

/// Consumes reminder jobs until the queue closes, delivering each one
/// concurrently. Returns once every in-flight delivery has finished.
pub async fn worker(mut jobs: mpsc::Receiver<ReminderJob>, mailer: Arc<dyn Mailer>, retry: Retry) {
	let mut deliveries = JoinSet::new();

	loop {
		tokio::select! {
			job = jobs.recv() => match job {
				Some(job) => {
					deliveries.spawn(deliver(job, Arc::clone(&mailer), retry));
				}
				None => break,
			},
			Some(_) = deliveries.join_next(), if !deliveries.is_empty() => {}
		}
	}

	while deliveries.join_next().await.is_some() {}

	tracing::debug!("reminder worker stopped");
}

/// Sends a single reminder. Failures are logged and dropped; the trigger
/// that produced the job stays registered and fires again tomorrow.
async fn deliver(job: ReminderJob, mailer: Arc<dyn Mailer>, retry: Retry) {
	let mail = reminder_mail(&job.email);

	tracing::info!(reminder = %job.reminder_id, email = %job.email, time = %job.time, "sending reminder");

	let result = (|| async { mailer.send(&mail).await })
		.retry(retry.backoff())
		.when(Error::should_retry)
		.notify(|error, delay| {
			tracing::warn!(
				reminder = %job.reminder_id,
				%error,
				"failed to send reminder, retrying after {:.2}s",
				delay.as_secs_f64()
			);
		})
		.await;

	match result {
		Ok(()) => tracing::info!(reminder = %job.reminder_id, email = %job.email, "reminder sent"),
		Err(error) => tracing::error!(
			reminder = %job.reminder_id,
			email = %job.email,
			%error,
			"giving up on reminder"
		),
	}
}
