use chrono::NaiveDateTime;
use primitive_reservation::PrimitiveReservation;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:               i32,
	pub restaurant_id:    i32,
	pub table_id:         i32,
	pub customer_name:    String,
	pub phone:            String,
	pub seats:            i32,
	pub reservation_time: NaiveDateTime,
	pub created_at:       NaiveDateTime,
}

impl From<PrimitiveReservation> for ReservationResponse {
	fn from(value: PrimitiveReservation) -> Self {
		Self {
			id:               value.id,
			restaurant_id:    value.restaurant_id,
			table_id:         value.table_id,
			customer_name:    value.customer_name,
			phone:            value.phone,
			seats:            value.seats,
			reservation_time: value.reservation_time,
			created_at:       value.created_at,
		}
	}
}
