#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::{reservation, table_window};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:               i32,
	pub restaurant_id:    i32,
	pub table_id:         i32,
	pub window_id:        i32,
	pub customer_name:    String,
	pub phone:            String,
	pub seats:            i32,
	pub reservation_time: NaiveDateTime,
	pub created_at:       NaiveDateTime,
}

impl PrimitiveReservation {
	/// Get a [`PrimitiveReservation`] by its id, scoped to a restaurant
	#[instrument(skip(conn))]
	pub async fn get_for_restaurant_by_id(
		r_id: i32,
		res_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(id.eq(res_id))
					.filter(restaurant_id.eq(r_id))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(reservation)
	}

	/// Get all the reservations of a restaurant ordered by time
	#[instrument(skip(conn))]
	pub async fn get_for_restaurant(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(restaurant_id.eq(r_id))
					.order((reservation_time.asc(), id.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Delete a reservation of a restaurant together with the table window it
	/// holds
	///
	/// Returns `false` if no such reservation existed
	#[instrument(skip(conn))]
	pub async fn delete_for_restaurant(
		r_id: i32,
		res_id: i32,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let deleted = conn
			.interact(move |conn| {
				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					let held: Option<i32> = reservation::table
						.filter(reservation::id.eq(res_id))
						.filter(reservation::restaurant_id.eq(r_id))
						.select(reservation::window_id)
						.for_update()
						.get_result(conn)
						.optional()?;

					let Some(held) = held else {
						return Ok(false);
					};

					// Removing the window cascades to the reservation
					diesel::delete(table_window::table.find(held))
						.execute(conn)?;

					Ok(true)
				})
			})
			.await??;

		if deleted {
			info!("deleted reservation with id {res_id}");
		}

		Ok(deleted)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub restaurant_id:    i32,
	pub table_id:         i32,
	pub window_id:        i32,
	pub customer_name:    String,
	pub phone:            String,
	pub seats:            i32,
	pub reservation_time: NaiveDateTime,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveReservation, Error> {
		let reservation = conn
			.interact(|conn| {
				use self::reservation::dsl::*;

				diesel::insert_into(reservation)
					.values(self)
					.returning(PrimitiveReservation::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"recorded reservation {} for {} at {}",
			reservation.id, reservation.customer_name, reservation.reservation_time
		);

		Ok(reservation)
	}
}
