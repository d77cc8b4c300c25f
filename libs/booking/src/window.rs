use chrono::{NaiveDateTime, TimeDelta};
use primitive_table::PrimitiveTableWindow;
use serde::{Deserialize, Serialize};

use crate::RESERVATION_WINDOW_MINUTES;

/// An occupied interval `[start, end]` on a table
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
	pub start: NaiveDateTime,
	pub end:   NaiveDateTime,
}

impl TimeWindow {
	/// The window a reservation starting at `start` occupies
	#[must_use]
	pub fn starting_at(start: NaiveDateTime) -> Self {
		let end = start + TimeDelta::minutes(RESERVATION_WINDOW_MINUTES);

		Self { start, end }
	}

	/// Check whether `at` falls inside this window, both bounds included
	///
	/// Only the requested instant is tested, not the interval a new
	/// reservation would occupy: a request at 11:30 does not clash with a
	/// window starting at 12:00.
	#[must_use]
	pub fn contains(&self, at: NaiveDateTime) -> bool {
		self.start <= at && at <= self.end
	}
}

impl From<&PrimitiveTableWindow> for TimeWindow {
	fn from(value: &PrimitiveTableWindow) -> Self {
		Self { start: value.start_time, end: value.end_time }
	}
}

/// Check whether any of the given windows covers `at`
pub fn conflicts_at<I>(windows: I, at: NaiveDateTime) -> bool
where
	I: IntoIterator<Item = TimeWindow>,
{
	windows.into_iter().any(|w| w.contains(at))
}
