//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDateTime, NaiveTime};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// A date or time could not be parsed
	#[error("invalid date or time format - {0}")]
	InvalidTimeFormat(String),
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to finding a table or making a reservation
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// A reservation failed validation
	#[error("invalid reservation - {0}")]
	InvalidReservation(String),
	/// A restaurant failed validation
	#[error("invalid restaurant - {0}")]
	InvalidRestaurant(String),
	/// A table failed validation
	#[error("invalid table - {0}")]
	InvalidTable(String),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes are part of the API, once assigned a code is never reused for a
	/// different error
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::InternalServerError => 2,
			Self::InvalidTimeFormat(_) => 3,
			Self::NotFound(_) => 4,
			Self::BookingError(e) => {
				match e {
					BookingError::OutOfHours { .. } => 5,
					BookingError::SeatsExceeded { .. } => 6,
					BookingError::NoTableAvailable => 7,
					BookingError::AlreadyReserved { .. } => 8,
				}
			},
			Self::InvalidReservation(_) => 9,
			Self::InvalidRestaurant(_) => 10,
			Self::InvalidTable(_) => 11,
			Self::ValidationError(_) => 12,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::InvalidTimeFormat(m)
			| Self::NotFound(m)
			| Self::InvalidReservation(m)
			| Self::InvalidRestaurant(m)
			| Self::InvalidTable(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::OutOfHours { opening, closing, phone } => {
						Some(
							serde_json::json!({
								"openingHour": opening,
								"closingHour": closing,
								"phone": phone,
							})
							.to_string(),
						)
					},
					BookingError::SeatsExceeded { limit, phone } => {
						Some(
							serde_json::json!({"limit": limit, "phone": phone})
								.to_string(),
						)
					},
					BookingError::AlreadyReserved { table_number, at } => {
						Some(
							serde_json::json!({
								"tableNumber": table_number,
								"at": at,
							})
							.to_string(),
						)
					},
					BookingError::NoTableAvailable => None,
				}
			},
			Self::InternalServerError => None,
		}
	}

	/// Wrap validation errors for a reservation
	#[must_use]
	pub fn invalid_reservation(err: &validator::ValidationErrors) -> Self {
		Self::InvalidReservation(validation_message(err))
	}

	/// Wrap validation errors for a restaurant
	#[must_use]
	pub fn invalid_restaurant(err: &validator::ValidationErrors) -> Self {
		Self::InvalidRestaurant(validation_message(err))
	}

	/// Wrap validation errors for a table
	#[must_use]
	pub fn invalid_table(err: &validator::ValidationErrors) -> Self {
		Self::InvalidTable(validation_message(err))
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		match self {
			Self::InternalServerError => error!("{self:?}"),
			_ => debug!("{self:?}"),
		}

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::BookingError(BookingError::AlreadyReserved { .. }) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::InvalidTimeFormat(_)
			| Self::BookingError(
				BookingError::OutOfHours { .. }
				| BookingError::SeatsExceeded { .. },
			) => StatusCode::BAD_REQUEST,
			Self::NotFound(_)
			| Self::BookingError(BookingError::NoTableAvailable) => {
				StatusCode::NOT_FOUND
			},
			Self::InvalidReservation(_)
			| Self::InvalidRestaurant(_)
			| Self::InvalidTable(_)
			| Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to finding a table or committing a reservation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
	/// The requested time lies outside the opening hours of the restaurant
	#[error(
		"the requested time is outside the opening hours of the restaurant, \
		 please contact us on {phone}"
	)]
	OutOfHours { opening: NaiveTime, closing: NaiveTime, phone: String },
	/// The party is larger than the restaurant or the table allows
	#[error(
		"more seats than the limited amount of seats, please contact us on \
		 {phone}"
	)]
	SeatsExceeded { limit: i32, phone: String },
	/// No table is free and large enough
	#[error("no available table with sufficient capacity found")]
	NoTableAvailable,
	/// The table already holds a window covering the requested time
	#[error("table {table_number} is already reserved at {at}")]
	AlreadyReserved { table_number: i32, at: NaiveDateTime },
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// The store lost a write it had just acknowledged
	#[error("inconsistent store -- {0}")]
	InconsistentStore(String),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Flatten a set of validation errors into a single message
fn validation_message(err: &validator::ValidationErrors) -> String {
	let errs = err.field_errors();

	let mut fields: Vec<_> = errs.into_iter().collect();
	fields.sort_by(|a, b| a.0.cmp(&b.0));

	fields
		.into_iter()
		.map(|(_, v)| {
			v.iter().map(ToString::to_string).collect::<Vec<String>>().join("\n")
		})
		.collect::<Vec<String>>()
		.join("\n")
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		Self::ValidationError(validation_message(&err))
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("restaurant_email_key", "email"),
			("dining_table_restaurant_id_table_number_key", "table number"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let Some(constraint_name) = info.constraint_name() else {
					return InternalServerError::DatabaseError(err).into();
				};

				match CONSTRAINT_TO_COLUMN.get(constraint_name) {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => {
						InternalServerError::ConstraintError(
							constraint_name.to_string(),
						)
						.into()
					},
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
