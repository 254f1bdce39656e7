mod clock;
mod trigger;

#[cfg(test)]
pub use clock::VirtualClock;
pub use clock::{Clock, SystemClock};
pub use trigger::{DailyTrigger, ParseTimeError, ReminderTime};

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::{
	sync::{mpsc, RwLock},
	task::JoinHandle,
};
use uuid::Uuid;

/// Capacity of the queue between triggers and the mail worker.
const JOB_QUEUE_CAPACITY: usize = 64;

/// A request to send a reminder, produced each time a trigger fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderJob {
	pub reminder_id: Uuid,
	pub email: String,
	pub time: ReminderTime,
	pub fire_at: DateTime<Utc>,
}

/// A reminder registered with the scheduler.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ScheduledReminder {
	/// The id of the stored reminder.
	pub id: Uuid,
	/// The address the reminder is sent to.
	pub email: String,
	/// The local time of day the reminder fires at.
	pub time: String,
	/// The timezone `time` is interpreted in.
	pub timezone: String,
	/// The next instant the reminder fires at.
	pub next_fire_at: DateTime<Utc>,
}

struct Trigger {
	email: String,
	trigger: DailyTrigger,
	handle: JoinHandle<()>,
}

/// Owns every registered reminder trigger.
///
/// Each trigger is a task that sleeps until its next occurrence and then
/// enqueues a [`ReminderJob`]. Delivery happens elsewhere, so a failing
/// mail relay never unregisters a trigger.
pub struct Scheduler {
	triggers: RwLock<HashMap<Uuid, Trigger>>,
	jobs: mpsc::Sender<ReminderJob>,
	clock: Arc<dyn Clock>,
	timezone: Tz,
}

impl Scheduler {
	/// Creates a scheduler along with the receiving end of its job queue.
	pub fn new(clock: impl Clock, timezone: Tz) -> (Self, mpsc::Receiver<ReminderJob>) {
		let (jobs, receiver) = mpsc::channel(JOB_QUEUE_CAPACITY);

		let scheduler = Self {
			triggers: RwLock::default(),
			jobs,
			clock: Arc::new(clock),
			timezone,
		};

		(scheduler, receiver)
	}

	/// Registers a daily trigger for the reminder.
	///
	/// Registering an id that is already scheduled replaces its trigger.
	pub async fn schedule(&self, id: Uuid, email: String, time: ReminderTime) -> ScheduledReminder {
		let trigger = DailyTrigger::new(time, self.timezone);
		let handle = tokio::spawn(run_trigger(
			id,
			email.clone(),
			trigger,
			Arc::clone(&self.clock),
			self.jobs.clone(),
		));

		let entry = Trigger {
			email,
			trigger,
			handle,
		};
		let scheduled = self.describe(id, &entry);

		if let Some(previous) = self.triggers.write().await.insert(id, entry) {
			previous.handle.abort();
		}

		tracing::info!(
			reminder = %id,
			email = %scheduled.email,
			%time,
			next = %scheduled.next_fire_at,
			"reminder scheduled daily"
		);

		scheduled
	}

	/// Stops and removes the trigger, returning `false` if none was registered.
	pub async fn cancel(&self, id: Uuid) -> bool {
		let Some(entry) = self.triggers.write().await.remove(&id) else {
			return false;
		};

		entry.handle.abort();
		tracing::info!(reminder = %id, "reminder cancelled");

		true
	}

	/// Lists every registered trigger, soonest first.
	pub async fn list(&self) -> Vec<ScheduledReminder> {
		let mut reminders = self
			.triggers
			.read()
			.await
			.iter()
			.map(|(id, entry)| self.describe(*id, entry))
			.collect::<Vec<_>>();

		reminders.sort_by(|a, b| a.next_fire_at.cmp(&b.next_fire_at).then(a.id.cmp(&b.id)));
		reminders
	}

	fn describe(&self, id: Uuid, entry: &Trigger) -> ScheduledReminder {
		ScheduledReminder {
			id,
			email: entry.email.clone(),
			time: entry.trigger.time.to_string(),
			timezone: entry.trigger.timezone.name().to_owned(),
			next_fire_at: entry.trigger.next_after(self.clock.now()),
		}
	}
}

impl Drop for Scheduler {
	fn drop(&mut self) {
		for entry in self.triggers.get_mut().values() {
			entry.handle.abort();
		}
	}
}

async fn run_trigger(
	id: Uuid,
	email: String,
	trigger: DailyTrigger,
	clock: Arc<dyn Clock>,
	jobs: mpsc::Sender<ReminderJob>,
) {
	let mut after = clock.now();

	loop {
		let fire_at = trigger.next_after(after);
		let wait = (fire_at - clock.now()).to_std().unwrap_or(Duration::ZERO);

		tokio::time::sleep(wait).await;

		tracing::debug!(reminder = %id, %email, "reminder trigger fired");

		let job = ReminderJob {
			reminder_id: id,
			email: email.clone(),
			time: trigger.time,
			fire_at,
		};

		if jobs.send(job).await.is_err() {
			tracing::warn!(reminder = %id, "reminder queue closed, stopping trigger");
			return;
		}

		// Occurrences missed while the process was suspended are skipped
		after = fire_at.max(clock.now());
	}
}
