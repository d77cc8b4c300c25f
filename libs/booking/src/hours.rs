use chrono::{NaiveDateTime, NaiveTime, Timelike};
use common::{BookingError, Error};
use primitive_restaurant::PrimitiveRestaurant;

/// The daily wall-clock bounds a restaurant accepts reservations in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatingHours {
	opening: NaiveTime,
	closing: NaiveTime,
}

impl OperatingHours {
	/// Build operating hours, restaurants only operate within a single day
	///
	/// # Errors
	/// Returns [`Error::InvalidRestaurant`] if `opening` is not before
	/// `closing`
	pub fn new(opening: NaiveTime, closing: NaiveTime) -> Result<Self, Error> {
		if opening >= closing {
			return Err(Error::InvalidRestaurant(format!(
				"opening hour {opening} must be before closing hour {closing}"
			)));
		}

		Ok(Self { opening, closing })
	}

	#[must_use]
	pub fn of(restaurant: &PrimitiveRestaurant) -> Self {
		Self { opening: restaurant.opening_hour, closing: restaurant.closing_hour }
	}

	#[must_use]
	pub fn opening(&self) -> NaiveTime { self.opening }

	#[must_use]
	pub fn closing(&self) -> NaiveTime { self.closing }

	/// Check whether a reservation may start at `at`
	///
	/// The check works on the hour of day first and only looks at minutes in
	/// two places:
	/// - in the opening hour, minutes before the opening minute are refused
	/// - in the last hour before closing, minutes past the closing minute are
	///   refused
	///
	/// Everything from the closing hour onwards is refused. With a closing
	/// time of 22:30 this means 22:10 is refused while 21:30 is not.
	#[must_use]
	pub fn admits(&self, at: NaiveDateTime) -> bool {
		let (hour, minute) = (at.hour(), at.minute());

		if hour >= self.closing.hour() || hour < self.opening.hour() {
			return false;
		}

		if hour == self.opening.hour() && minute < self.opening.minute() {
			return false;
		}

		if hour + 1 == self.closing.hour() && minute > self.closing.minute() {
			return false;
		}

		true
	}
}

/// Refuse `at` if it lies outside the opening hours of `restaurant`
///
/// # Errors
/// Returns [`BookingError::OutOfHours`] if the hours do not admit `at`
pub fn check_operating_hours(
	restaurant: &PrimitiveRestaurant,
	at: NaiveDateTime,
) -> Result<(), Error> {
	let hours = OperatingHours::of(restaurant);

	if !hours.admits(at) {
		return Err(BookingError::OutOfHours {
			opening: hours.opening(),
			closing: hours.closing(),
			phone:   restaurant.phone.clone(),
		}
		.into());
	}

	Ok(())
}
