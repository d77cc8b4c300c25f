use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use common::Error;
use parking_lot::Mutex;
use primitive_reservation::{NewReservation, PrimitiveReservation};
use primitive_restaurant::{
	NewRestaurant,
	PrimitiveRestaurant,
	RestaurantUpdate,
};
use primitive_table::{
	NewTable,
	PrimitiveTable,
	PrimitiveTableWindow,
	WindowInsert,
};

use crate::{BookingStore, Table, TimeWindow, conflicts_at};

#[derive(Debug, Default)]
struct State {
	next_id:      i32,
	restaurants:  BTreeMap<i32, PrimitiveRestaurant>,
	tables:       BTreeMap<i32, PrimitiveTable>,
	windows:      BTreeMap<i32, PrimitiveTableWindow>,
	reservations: BTreeMap<i32, PrimitiveReservation>,
}

impl State {
	fn next_id(&mut self) -> i32 {
		self.next_id += 1;
		self.next_id
	}

	fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
		self.restaurants
			.values()
			.any(|r| r.email == email && Some(r.id) != except)
	}

	fn table_with_windows(&self, table: &PrimitiveTable) -> Table {
		let mut windows: Vec<TimeWindow> = self
			.windows
			.values()
			.filter(|w| w.table_id == table.id)
			.map(Into::into)
			.collect();

		windows.sort_by_key(|w| w.start);

		Table { primitive: table.clone(), windows }
	}

	fn drop_window(&mut self, window_id: i32) -> bool {
		let existed = self.windows.remove(&window_id).is_some();

		self.reservations.retain(|_, r| r.window_id != window_id);

		existed
	}

	fn drop_table(&mut self, table_id: i32) -> Option<PrimitiveTable> {
		let table = self.tables.remove(&table_id)?;

		self.windows.retain(|_, w| w.table_id != table_id);
		self.reservations.retain(|_, r| r.table_id != table_id);

		Some(table)
	}
}

fn now() -> NaiveDateTime { Utc::now().naive_utc() }

/// A [`BookingStore`] kept entirely in memory
///
/// All state sits behind one lock, every trait method takes it exactly once
/// which makes each of them atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
	state: Mutex<State>,
}

impl MemoryStore {
	#[must_use]
	pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl BookingStore for MemoryStore {
	async fn ping(&self) -> Result<(), Error> { Ok(()) }

	async fn insert_restaurant(
		&self,
		restaurant: NewRestaurant,
	) -> Result<PrimitiveRestaurant, Error> {
		let mut state = self.state.lock();

		if state.email_taken(&restaurant.email, None) {
			return Err(Error::Duplicate("email is already in use".to_string()));
		}

		let now = now();
		let id = state.next_id();

		let restaurant = PrimitiveRestaurant {
			id,
			name: restaurant.name,
			email: restaurant.email,
			address: restaurant.address,
			phone: restaurant.phone,
			image_url: restaurant.image_url,
			limited_seats: restaurant.limited_seats,
			opening_hour: restaurant.opening_hour,
			closing_hour: restaurant.closing_hour,
			created_at: now,
			updated_at: now,
		};

		state.restaurants.insert(id, restaurant.clone());

		Ok(restaurant)
	}

	async fn restaurants(&self) -> Result<Vec<PrimitiveRestaurant>, Error> {
		let state = self.state.lock();

		let mut restaurants: Vec<_> =
			state.restaurants.values().cloned().collect();

		restaurants.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));

		Ok(restaurants)
	}

	async fn restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Option<PrimitiveRestaurant>, Error> {
		Ok(self.state.lock().restaurants.get(&restaurant_id).cloned())
	}

	async fn update_restaurant(
		&self,
		restaurant_id: i32,
		update: RestaurantUpdate,
	) -> Result<Option<PrimitiveRestaurant>, Error> {
		let mut state = self.state.lock();

		let Some(current) = state.restaurants.get(&restaurant_id).cloned() else {
			return Ok(None);
		};

		if let Some(email) = &update.email {
			if state.email_taken(email, Some(restaurant_id)) {
				return Err(Error::Duplicate("email is already in use".to_string()));
			}
		}

		let updated = update.merged_into(current);

		state.restaurants.insert(restaurant_id, updated.clone());

		Ok(Some(updated))
	}

	async fn delete_restaurant(&self, restaurant_id: i32) -> Result<bool, Error> {
		let mut state = self.state.lock();

		if state.restaurants.remove(&restaurant_id).is_none() {
			return Ok(false);
		}

		let table_ids: Vec<i32> = state
			.tables
			.values()
			.filter(|t| t.restaurant_id == restaurant_id)
			.map(|t| t.id)
			.collect();

		for table_id in table_ids {
			state.drop_table(table_id);
		}

		Ok(true)
	}

	async fn insert_table(&self, table: NewTable) -> Result<PrimitiveTable, Error> {
		let mut state = self.state.lock();

		if !state.restaurants.contains_key(&table.restaurant_id) {
			return Err(Error::NotFound(format!(
				"restaurant with id {}",
				table.restaurant_id
			)));
		}

		let highest = state
			.tables
			.values()
			.filter(|t| t.restaurant_id == table.restaurant_id)
			.map(|t| t.table_number)
			.max()
			.unwrap_or(0);

		let id = state.next_id();

		let table = PrimitiveTable {
			id,
			restaurant_id: table.restaurant_id,
			table_number: highest + 1,
			capacity: table.capacity,
			created_at: now(),
		};

		state.tables.insert(id, table.clone());

		Ok(table)
	}

	async fn table(&self, table_id: i32) -> Result<Option<Table>, Error> {
		let state = self.state.lock();

		Ok(state.tables.get(&table_id).map(|t| state.table_with_windows(t)))
	}

	async fn tables_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<Table>, Error> {
		let state = self.state.lock();

		let mut tables: Vec<Table> = state
			.tables
			.values()
			.filter(|t| t.restaurant_id == restaurant_id)
			.map(|t| state.table_with_windows(t))
			.collect();

		tables.sort_by_key(|t| t.primitive.table_number);

		Ok(tables)
	}

	async fn delete_table(
		&self,
		restaurant_id: i32,
		table_id: i32,
	) -> Result<Option<PrimitiveTable>, Error> {
		let mut state = self.state.lock();

		let owned = state
			.tables
			.get(&table_id)
			.is_some_and(|t| t.restaurant_id == restaurant_id);

		if !owned {
			return Ok(None);
		}

		Ok(state.drop_table(table_id))
	}

	async fn append_window(
		&self,
		table_id: i32,
		window: TimeWindow,
	) -> Result<WindowInsert, Error> {
		let mut state = self.state.lock();

		if !state.tables.contains_key(&table_id) {
			return Ok(WindowInsert::MissingTable);
		}

		let held = state
			.windows
			.values()
			.filter(|w| w.table_id == table_id)
			.map(TimeWindow::from);

		if conflicts_at(held, window.start) {
			return Ok(WindowInsert::Conflict);
		}

		let id = state.next_id();

		let window = PrimitiveTableWindow {
			id,
			table_id,
			start_time: window.start,
			end_time: window.end,
		};

		state.windows.insert(id, window.clone());

		Ok(WindowInsert::Inserted(window))
	}

	async fn remove_window(&self, window_id: i32) -> Result<bool, Error> {
		Ok(self.state.lock().drop_window(window_id))
	}

	async fn insert_reservation(
		&self,
		reservation: NewReservation,
	) -> Result<PrimitiveReservation, Error> {
		let mut state = self.state.lock();

		let window_held = state
			.windows
			.get(&reservation.window_id)
			.is_some_and(|w| w.table_id == reservation.table_id);
		let table_owned = state
			.tables
			.get(&reservation.table_id)
			.is_some_and(|t| t.restaurant_id == reservation.restaurant_id);

		if !window_held || !table_owned {
			return Err(Error::ValidationError(
				"reservation refers to an unknown restaurant, table or window"
					.to_string(),
			));
		}

		let id = state.next_id();

		let reservation = PrimitiveReservation {
			id,
			restaurant_id: reservation.restaurant_id,
			table_id: reservation.table_id,
			window_id: reservation.window_id,
			customer_name: reservation.customer_name,
			phone: reservation.phone,
			seats: reservation.seats,
			reservation_time: reservation.reservation_time,
			created_at: now(),
		};

		state.reservations.insert(id, reservation.clone());

		Ok(reservation)
	}

	async fn reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<Option<PrimitiveReservation>, Error> {
		let state = self.state.lock();

		Ok(state
			.reservations
			.get(&reservation_id)
			.filter(|r| r.restaurant_id == restaurant_id)
			.cloned())
	}

	async fn reservations_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<PrimitiveReservation>, Error> {
		let state = self.state.lock();

		let mut reservations: Vec<_> = state
			.reservations
			.values()
			.filter(|r| r.restaurant_id == restaurant_id)
			.cloned()
			.collect();

		reservations.sort_by_key(|r| (r.reservation_time, r.id));

		Ok(reservations)
	}

	async fn delete_reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<bool, Error> {
		let mut state = self.state.lock();

		let Some(window_id) = state
			.reservations
			.get(&reservation_id)
			.filter(|r| r.restaurant_id == restaurant_id)
			.map(|r| r.window_id)
		else {
			return Ok(false);
		};

		state.drop_window(window_id);

		Ok(true)
	}
}
