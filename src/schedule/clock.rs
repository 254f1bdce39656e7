use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync + 'static {
	fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// A clock that starts at a fixed instant and advances with tokio's
/// (possibly paused) time, so triggers can be driven without waiting.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
	origin: DateTime<Utc>,
	start: tokio::time::Instant,
}

#[cfg(test)]
impl VirtualClock {
	pub fn starting_at(origin: DateTime<Utc>) -> Self {
		Self {
			origin,
			start: tokio::time::Instant::now(),
		}
	}
}

#[cfg(test)]
impl Clock for VirtualClock {
	fn now(&self) -> DateTime<Utc> {
		let elapsed = chrono::Duration::from_std(self.start.elapsed()).unwrap();

		self.origin + elapsed
	}
}
