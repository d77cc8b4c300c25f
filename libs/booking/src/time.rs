use chrono::{DateTime, NaiveDateTime, NaiveTime};
use common::Error;

const DATE_TIME_FORMATS: [&str; 4] = [
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parse a single instant, offsets are dropped in favour of the wall-clock
/// time they were written in
///
/// # Errors
/// Returns [`Error::InvalidTimeFormat`] if no known format matches
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, Error> {
	let value = value.trim();

	if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
		return Ok(dt.naive_local());
	}

	DATE_TIME_FORMATS
		.iter()
		.find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
		.ok_or_else(|| Error::InvalidTimeFormat(value.to_string()))
}

/// Parse a separate date and time of day into one instant
///
/// # Errors
/// Returns [`Error::InvalidTimeFormat`] if the combination does not parse
pub fn parse_date_time(date: &str, time: &str) -> Result<NaiveDateTime, Error> {
	parse_instant(&format!("{}T{}", date.trim(), time.trim()))
}

/// Parse a wall-clock time such as `09:00` or `21:30:00`
///
/// # Errors
/// Returns [`Error::InvalidTimeFormat`] if no known format matches
pub fn parse_wall_clock(value: &str) -> Result<NaiveTime, Error> {
	let value = value.trim();

	TIME_FORMATS
		.iter()
		.find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
		.ok_or_else(|| Error::InvalidTimeFormat(value.to_string()))
}
