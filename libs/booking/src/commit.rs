use common::{BookingError, Error, InternalServerError};
use primitive_reservation::{NewReservation, PrimitiveReservation};
use primitive_table::WindowInsert;
use serde::Deserialize;
use validator::Validate;
use validator_derive::Validate;

use crate::{BookingStore, TimeWindow, check_operating_hours, parse_instant};

/// A request to reserve a specific table
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
	#[validate(length(min = 1, max = 99))]
	pub customer_name:    String,
	#[validate(length(min = 5, max = 20))]
	pub phone:            String,
	#[validate(range(min = 1))]
	pub seats:            i32,
	pub reservation_time: String,
}

/// Reserve `table_id` of `restaurant_id` for the given request
///
/// All checks run before anything is written. The window is then appended
/// with a single conditional write, so two requests racing for the same
/// table and instant cannot both succeed. If the reservation itself cannot
/// be recorded the window is released again.
///
/// # Errors
/// - [`Error::NotFound`] if the restaurant or the table does not exist, or
///   the table disappears while the reservation is being recorded
/// - [`Error::InvalidTimeFormat`] if the reservation time does not parse
/// - [`Error::InvalidReservation`] if the request fails validation
/// - [`BookingError::OutOfHours`] if the restaurant is closed at that time
/// - [`BookingError::SeatsExceeded`] if the party does not fit the table
/// - [`BookingError::AlreadyReserved`] if the table is taken at that time
#[instrument(skip(store))]
pub async fn make_reservation(
	store: &dyn BookingStore,
	restaurant_id: i32,
	table_id: i32,
	request: ReservationRequest,
) -> Result<PrimitiveReservation, Error> {
	let restaurant = store.restaurant(restaurant_id).await?.ok_or_else(|| {
		Error::NotFound(format!("restaurant with id {restaurant_id}"))
	})?;

	let table = store
		.table(table_id)
		.await?
		.filter(|t| t.primitive.restaurant_id == restaurant_id)
		.ok_or_else(|| {
			Error::NotFound(format!(
				"table with id {table_id} in restaurant {restaurant_id}"
			))
		})?;

	let at = parse_instant(&request.reservation_time)?;

	request.validate().map_err(|e| Error::invalid_reservation(&e))?;

	check_operating_hours(&restaurant, at)?;

	if request.seats > table.primitive.capacity {
		return Err(BookingError::SeatsExceeded {
			limit: table.primitive.capacity,
			phone: restaurant.phone,
		}
		.into());
	}

	let window = match store
		.append_window(table_id, TimeWindow::starting_at(at))
		.await?
	{
		WindowInsert::Inserted(window) => window,
		WindowInsert::Conflict => {
			return Err(BookingError::AlreadyReserved {
				table_number: table.primitive.table_number,
				at,
			}
			.into());
		},
		WindowInsert::MissingTable => {
			return Err(Error::NotFound(format!("table with id {table_id}")));
		},
	};

	let new_reservation = NewReservation {
		restaurant_id,
		table_id,
		window_id: window.id,
		customer_name: request.customer_name,
		phone: request.phone,
		seats: request.seats,
		reservation_time: at,
	};

	match store.insert_reservation(new_reservation).await {
		Ok(reservation) => {
			info!(
				"reserved table {} of restaurant {restaurant_id} at {at}",
				table.primitive.table_number
			);

			Ok(reservation)
		},
		Err(err) => {
			warn!("releasing window {} after failed reservation", window.id);

			match store.remove_window(window.id).await {
				Ok(true) => Err(err),
				// The table went away and took its windows with it
				Ok(false) => {
					Err(Error::NotFound(format!("table with id {table_id}")))
				},
				Err(undo) => {
					Err(InternalServerError::InconsistentStore(format!(
						"window {} left behind on table {table_id} -- {undo}",
						window.id
					))
					.into())
				},
			}
		},
	}
}
