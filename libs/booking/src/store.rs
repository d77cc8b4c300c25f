use async_trait::async_trait;
use common::Error;
use primitive_reservation::{NewReservation, PrimitiveReservation};
use primitive_restaurant::{
	NewRestaurant,
	PrimitiveRestaurant,
	RestaurantUpdate,
};
use primitive_table::{NewTable, PrimitiveTable, WindowInsert};

use crate::{Table, TimeWindow};

/// Persistence collaborator for restaurants, tables, windows and
/// reservations
///
/// Children are looked up by the id of their owner, no implementation keeps
/// lists of child ids on the owner itself.
#[async_trait]
pub trait BookingStore: Send + Sync {
	/// Check that the store is reachable
	async fn ping(&self) -> Result<(), Error>;

	async fn insert_restaurant(
		&self,
		restaurant: NewRestaurant,
	) -> Result<PrimitiveRestaurant, Error>;

	async fn restaurants(&self) -> Result<Vec<PrimitiveRestaurant>, Error>;

	async fn restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Option<PrimitiveRestaurant>, Error>;

	async fn update_restaurant(
		&self,
		restaurant_id: i32,
		update: RestaurantUpdate,
	) -> Result<Option<PrimitiveRestaurant>, Error>;

	/// Delete a restaurant with all of its tables, windows and reservations
	async fn delete_restaurant(&self, restaurant_id: i32) -> Result<bool, Error>;

	/// Insert a table numbered one past the highest number in its restaurant
	async fn insert_table(&self, table: NewTable) -> Result<PrimitiveTable, Error>;

	async fn table(&self, table_id: i32) -> Result<Option<Table>, Error>;

	async fn tables_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<Table>, Error>;

	/// Delete a table of a restaurant with its windows and reservations
	async fn delete_table(
		&self,
		restaurant_id: i32,
		table_id: i32,
	) -> Result<Option<PrimitiveTable>, Error>;

	/// Append `window` to the table unless one of its windows already covers
	/// `window.start`
	///
	/// The check and the append form a single atomic step: of two concurrent
	/// calls for the same table and instant at most one sees
	/// [`WindowInsert::Inserted`].
	async fn append_window(
		&self,
		table_id: i32,
		window: TimeWindow,
	) -> Result<WindowInsert, Error>;

	/// Release a window, used to undo an append whose reservation could not
	/// be recorded
	async fn remove_window(&self, window_id: i32) -> Result<bool, Error>;

	async fn insert_reservation(
		&self,
		reservation: NewReservation,
	) -> Result<PrimitiveReservation, Error>;

	async fn reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<Option<PrimitiveReservation>, Error>;

	async fn reservations_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<PrimitiveReservation>, Error>;

	/// Delete a reservation and free the window it holds
	async fn delete_reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<bool, Error>;
}
