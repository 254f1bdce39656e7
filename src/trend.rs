//! Direction of change between the two most recent skin ratings.

use chrono_tz::Tz;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::route::skin::model::SkinCondition;

/// Something with a numeric rating.
pub trait Rated {
	/// The numeric rating, or `None` if it is not a number.
	fn rating(&self) -> Option<f64>;
}

/// Interprets a stored rating as a number. Numeric strings count.
pub fn numeric_rating(rating: &Value) -> Option<f64> {
	match rating {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
		_ => None,
	}
}

impl Rated for SkinCondition {
	fn rating(&self) -> Option<f64> {
		numeric_rating(&self.rating)
	}
}

#[cfg(test)]
impl Rated for f64 {
	fn rating(&self) -> Option<f64> {
		Some(*self)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
	Improving,
	Worsening,
	Unchanged,
	NotEnoughData,
}

impl Trend {
	pub fn message(self) -> &'static str {
		match self {
			Self::Improving => "Your skin condition is improving!",
			Self::Worsening => {
				"Your skin condition has worsened. Stay consistent with your routine."
			}
			Self::Unchanged => "No significant change in skin condition.",
			Self::NotEnoughData => "Not enough data to analyze trends.",
		}
	}
}

/// Compares the ratings of the two most recent entries.
///
/// `entries` must be ordered oldest first. If either rating is not a number
/// the two cannot be ordered and the trend is [`Trend::Unchanged`].
pub fn analyze<R: Rated>(entries: &[R]) -> Trend {
	let [.., previous, latest] = entries else {
		return Trend::NotEnoughData;
	};

	match (latest.rating(), previous.rating()) {
		(Some(latest), Some(previous)) if latest > previous => Trend::Improving,
		(Some(latest), Some(previous)) if latest < previous => Trend::Worsening,
		_ => Trend::Unchanged,
	}
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TrendReport {
	pub trend: Trend,
	pub message: &'static str,
}

impl From<Trend> for TrendReport {
	fn from(trend: Trend) -> Self {
		Self {
			trend,
			message: trend.message(),
		}
	}
}

/// A single point of the rating chart.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Insight {
	/// The local calendar date of the entry, formatted as `YYYY-MM-DD`.
	pub date: String,
	pub description: String,
	pub rating: Value,
}

impl Insight {
	pub fn new(entry: &SkinCondition, timezone: Tz) -> Self {
		Self {
			date: entry
				.created_at
				.with_timezone(&timezone)
				.date_naive()
				.to_string(),
			description: entry.description.clone(),
			rating: entry.rating.clone(),
		}
	}
}

#[cfg(test)]
mod test {
	use chrono::{TimeZone, Utc};
	use serde_json::json;
	use uuid::Uuid;

	use super::*;

	fn entry(rating: Value) -> SkinCondition {
		SkinCondition {
			id: Uuid::new_v4(),
			description: "calm".into(),
			rating,
			created_at: Utc::now(),
		}
	}

	#[test]
	fn test_improving() {
		assert_eq!(analyze(&[5.0, 7.0]), Trend::Improving);
	}

	#[test]
	fn test_worsening() {
		assert_eq!(analyze(&[7.0, 5.0]), Trend::Worsening);
	}

	#[test]
	fn test_unchanged() {
		assert_eq!(analyze(&[5.0, 5.0]), Trend::Unchanged);
	}

	#[test]
	fn test_not_enough_data() {
		assert_eq!(analyze::<f64>(&[]), Trend::NotEnoughData);
		assert_eq!(analyze(&[5.0]), Trend::NotEnoughData);
	}

	#[test]
	fn test_only_last_two_count() {
		assert_eq!(analyze(&[1.0, 9.0, 4.0]), Trend::Worsening);
		assert_eq!(analyze(&[9.0, 1.0, 4.0]), Trend::Improving);
	}

	#[test]
	fn test_stored_ratings() {
		let entries = [entry(json!("5")), entry(json!(7))];

		assert_eq!(analyze(&entries), Trend::Improving);
	}

	#[test]
	fn test_non_numeric_rating_is_unchanged() {
		let entries = [entry(json!(8)), entry(json!("great"))];

		assert_eq!(analyze(&entries), Trend::Unchanged);

		let entries = [entry(json!(8)), entry(json!(6)), entry(json!("great"))];

		assert_eq!(analyze(&entries), Trend::Unchanged);

		let entries = [entry(json!("great")), entry(json!(3)), entry(json!(5))];

		assert_eq!(analyze(&entries), Trend::Improving);
	}

	#[test]
	fn test_numeric_rating() {
		assert_eq!(numeric_rating(&json!(4)), Some(4.0));
		assert_eq!(numeric_rating(&json!(" 6.5 ")), Some(6.5));
		assert_eq!(numeric_rating(&json!("NaN")), None);
		assert_eq!(numeric_rating(&json!("great")), None);
		assert_eq!(numeric_rating(&json!(null)), None);
	}

	#[test]
	fn test_report_serializes() {
		let report = serde_json::to_value(TrendReport::from(Trend::NotEnoughData)).unwrap();

		assert_eq!(report["trend"], "not_enough_data");
		assert_eq!(report["message"], "Not enough data to analyze trends.");
	}

	#[test]
	fn test_insight_uses_local_date() {
		let mut condition = entry(json!(6));
		// 20:00 UTC is already the next day in Kolkata
		condition.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();

		let insight = Insight::new(&condition, chrono_tz::Asia::Kolkata);

		assert_eq!(insight.date, "2024-03-02");
		assert_eq!(insight.rating, json!(6));
	}
}
