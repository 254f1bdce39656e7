use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A time of day at which a reminder is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReminderTime {
	hour: u32,
	minute: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimeError {
	#[error("time must be formatted as HH:MM")]
	Format,
	#[error("hour must be between 0 and 23")]
	Hour,
	#[error("minute must be between 0 and 59")]
	Minute,
}

impl ReminderTime {
	pub fn new(hour: u32, minute: u32) -> Result<Self, ParseTimeError> {
		if hour > 23 {
			return Err(ParseTimeError::Hour);
		}

		if minute > 59 {
			return Err(ParseTimeError::Minute);
		}

		Ok(Self { hour, minute })
	}

	fn as_naive(self) -> NaiveTime {
		NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
	}
}

fn digits(part: &str, max_len: usize) -> Result<u32, ParseTimeError> {
	if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
		return Err(ParseTimeError::Format);
	}

	part.parse().map_err(|_| ParseTimeError::Format)
}

/// Parses `H:MM` or `HH:MM`. Browsers may append seconds (`HH:MM:SS`),
/// which are accepted and ignored.
impl FromStr for ReminderTime {
	type Err = ParseTimeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s.trim().split(':');

		let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
			return Err(ParseTimeError::Format);
		};

		if let Some(seconds) = parts.next() {
			if digits(seconds, 2).is_err() || parts.next().is_some() {
				return Err(ParseTimeError::Format);
			}
		}

		if minute.len() != 2 {
			return Err(ParseTimeError::Format);
		}

		Self::new(digits(hour, 2)?, digits(minute, 2)?)
	}
}

impl fmt::Display for ReminderTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}:{:02}", self.hour, self.minute)
	}
}

/// Fires once a day at a fixed wall-clock time in a fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
	pub time: ReminderTime,
	pub timezone: Tz,
}

impl DailyTrigger {
	pub fn new(time: ReminderTime, timezone: Tz) -> Self {
		Self { time, timezone }
	}

	/// Returns the first instant strictly after `now` at which the trigger fires.
	///
	/// Local times that do not exist (daylight saving gaps) are skipped,
	/// and ambiguous ones resolve to the earlier instant.
	pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
		let time = self.time.as_naive();
		let mut date = now.with_timezone(&self.timezone).date_naive();

		loop {
			if let Some(at) = self
				.timezone
				.from_local_datetime(&date.and_time(time))
				.earliest()
			{
				let at = at.with_timezone(&Utc);

				if at > now {
					return at;
				}
			}

			let Some(next) = date.succ_opt() else {
				return now + chrono::Duration::days(1);
			};

			date = next;
		}
	}
}
