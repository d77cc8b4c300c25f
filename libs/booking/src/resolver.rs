use chrono::NaiveDateTime;
use common::{BookingError, Error};

use crate::{BookingStore, Table, check_operating_hours, parse_date_time};

/// Pick the smallest table that seats `seats` and is free at `at`
///
/// Ties on capacity go to the lowest table number.
#[must_use]
pub fn pick_best_fit(
	tables: &[Table],
	at: NaiveDateTime,
	seats: i32,
) -> Option<&Table> {
	tables
		.iter()
		.filter(|t| t.primitive.capacity >= seats)
		.filter(|t| t.is_available_at(at))
		.min_by_key(|t| (t.primitive.capacity, t.primitive.table_number))
}

/// Find the best fitting free table of a restaurant for a party of `seats`
/// at the given date and time
///
/// # Errors
/// - [`Error::InvalidTimeFormat`] if `date` and `time` do not parse
/// - [`Error::ValidationError`] if `seats` is not positive
/// - [`Error::NotFound`] if the restaurant does not exist
/// - [`BookingError::OutOfHours`] if the restaurant is closed at that time
/// - [`BookingError::SeatsExceeded`] if the party is larger than the
///   restaurant accepts
/// - [`BookingError::NoTableAvailable`] if no table fits
#[instrument(skip(store))]
pub async fn find_available_table(
	store: &dyn BookingStore,
	restaurant_id: i32,
	date: &str,
	time: &str,
	seats: i32,
) -> Result<Table, Error> {
	let at = parse_date_time(date, time)?;

	if seats < 1 {
		return Err(Error::ValidationError(
			"seats must be at least 1".to_string(),
		));
	}

	let restaurant = store.restaurant(restaurant_id).await?.ok_or_else(|| {
		Error::NotFound(format!("restaurant with id {restaurant_id}"))
	})?;

	check_operating_hours(&restaurant, at)?;

	if seats > restaurant.limited_seats {
		return Err(BookingError::SeatsExceeded {
			limit: restaurant.limited_seats,
			phone: restaurant.phone,
		}
		.into());
	}

	let tables = store.tables_for_restaurant(restaurant_id).await?;

	let Some(table) = pick_best_fit(&tables, at, seats) else {
		debug!("no table for {seats} at {at} in restaurant {restaurant_id}");

		return Err(BookingError::NoTableAvailable.into());
	};

	Ok(table.clone())
}

#[cfg(test)]
mod tests {
	use chrono::NaiveTime;
	use primitive_restaurant::NewRestaurant;
	use primitive_table::{NewTable, PrimitiveTable};

	use super::*;
	use crate::{MemoryStore, TimeWindow};

	fn at(s: &str) -> NaiveDateTime { s.parse().unwrap() }

	fn table(id: i32, capacity: i32, windows: &[&str]) -> Table {
		Table {
			primitive: PrimitiveTable {
				id,
				restaurant_id: 1,
				table_number: id,
				capacity,
				created_at: at("2024-01-01T00:00:00"),
			},
			windows:   windows
				.iter()
				.map(|s| TimeWindow::starting_at(at(s)))
				.collect(),
		}
	}

	async fn restaurant(store: &MemoryStore, limited_seats: i32) -> i32 {
		store
			.insert_restaurant(NewRestaurant {
				name: "Chez Test".to_string(),
				email: format!("owner{limited_seats}@example.com"),
				address: "Korenmarkt 1".to_string(),
				phone: "+32 9 123 45 67".to_string(),
				image_url: None,
				limited_seats,
				opening_hour: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
				closing_hour: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
			})
			.await
			.unwrap()
			.id
	}

	#[test]
	fn best_fit_prefers_smallest_sufficient_table() {
		let tables = [table(1, 6, &[]), table(2, 2, &[]), table(3, 4, &[])];

		let picked = pick_best_fit(&tables, at("2024-01-01T12:00:00"), 2);

		assert_eq!(picked.unwrap().primitive.capacity, 2);
	}

	#[test]
	fn best_fit_never_picks_a_table_that_is_too_small() {
		let tables = [table(1, 2, &[]), table(2, 3, &[])];

		assert!(pick_best_fit(&tables, at("2024-01-01T12:00:00"), 4).is_none());
	}

	#[test]
	fn best_fit_skips_occupied_tables() {
		let tables = [
			table(1, 2, &["2024-01-01T12:00:00"]),
			table(2, 4, &[]),
		];

		let busy = pick_best_fit(&tables, at("2024-01-01T12:30:00"), 2);
		let free = pick_best_fit(&tables, at("2024-01-01T13:01:00"), 2);

		assert_eq!(busy.unwrap().primitive.id, 2);
		assert_eq!(free.unwrap().primitive.id, 1);
	}

	#[test]
	fn best_fit_breaks_ties_on_table_number() {
		let tables = [table(7, 4, &[]), table(3, 4, &[])];

		let picked = pick_best_fit(&tables, at("2024-01-01T12:00:00"), 4);

		assert_eq!(picked.unwrap().primitive.table_number, 3);
	}

	#[tokio::test]
	async fn resolves_the_smallest_free_table() {
		let store = MemoryStore::new();
		let r_id = restaurant(&store, 20).await;

		for capacity in [6, 2] {
			store
				.insert_table(NewTable { restaurant_id: r_id, capacity })
				.await
				.unwrap();
		}

		let found = find_available_table(&store, r_id, "2024-01-01", "12:00", 2)
			.await
			.unwrap();

		assert_eq!(found.primitive.capacity, 2);
		assert_eq!(found.primitive.table_number, 2);

		let again = find_available_table(&store, r_id, "2024-01-01", "12:00", 2)
			.await
			.unwrap();

		assert_eq!(again.primitive.id, found.primitive.id);
	}

	#[tokio::test]
	async fn refuses_parties_above_the_restaurant_limit() {
		let store = MemoryStore::new();
		let r_id = restaurant(&store, 4).await;

		store
			.insert_table(NewTable { restaurant_id: r_id, capacity: 10 })
			.await
			.unwrap();

		let err = find_available_table(&store, r_id, "2024-01-01", "12:00", 5)
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			Error::BookingError(BookingError::SeatsExceeded { limit: 4, .. })
		));
	}

	#[tokio::test]
	async fn refuses_times_outside_operating_hours() {
		let store = MemoryStore::new();
		let r_id = restaurant(&store, 20).await;

		store
			.insert_table(NewTable { restaurant_id: r_id, capacity: 4 })
			.await
			.unwrap();

		for time in ["08:59", "21:01", "22:00"] {
			let err = find_available_table(&store, r_id, "2024-01-01", time, 2)
				.await
				.unwrap_err();

			assert!(
				matches!(
					err,
					Error::BookingError(BookingError::OutOfHours { .. })
				),
				"{time} should be out of hours"
			);
		}

		for time in ["09:00", "21:00"] {
			assert!(
				find_available_table(&store, r_id, "2024-01-01", time, 2)
					.await
					.is_ok(),
				"{time} should be bookable"
			);
		}
	}

	#[tokio::test]
	async fn reports_missing_restaurants_and_bad_input() {
		let store = MemoryStore::new();
		let r_id = restaurant(&store, 20).await;

		assert!(matches!(
			find_available_table(&store, r_id + 1, "2024-01-01", "12:00", 2)
				.await,
			Err(Error::NotFound(_))
		));
		assert!(matches!(
			find_available_table(&store, r_id, "not a date", "12:00", 2).await,
			Err(Error::InvalidTimeFormat(_))
		));
		assert!(matches!(
			find_available_table(&store, r_id, "2024-01-01", "12:00", 0).await,
			Err(Error::ValidationError(_))
		));
	}

	#[tokio::test]
	async fn reports_when_every_table_is_taken() {
		let store = MemoryStore::new();
		let r_id = restaurant(&store, 20).await;

		let table = store
			.insert_table(NewTable { restaurant_id: r_id, capacity: 4 })
			.await
			.unwrap();

		store
			.append_window(
				table.id,
				TimeWindow::starting_at(at("2024-01-01T12:00:00")),
			)
			.await
			.unwrap();

		let err = find_available_table(&store, r_id, "2024-01-01", "12:00", 2)
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			Error::BookingError(BookingError::NoTableAvailable)
		));
	}
}
