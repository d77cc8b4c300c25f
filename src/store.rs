use async_trait::async_trait;
use booking::{BookingStore, Table, TimeWindow, conflicts_at};
use common::{DbPool, Error};
use diesel::{RunQueryDsl, sql_query};
use primitive_reservation::{NewReservation, PrimitiveReservation};
use primitive_restaurant::{
	NewRestaurant,
	PrimitiveRestaurant,
	RestaurantUpdate,
};
use primitive_table::{
	NewTable,
	NewTableWindow,
	PrimitiveTable,
	PrimitiveTableWindow,
	WindowInsert,
};

/// A [`BookingStore`] backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
	pool: DbPool,
}

impl PgStore {
	#[must_use]
	pub fn new(pool: DbPool) -> Self { Self { pool } }
}

#[async_trait]
impl BookingStore for PgStore {
	async fn ping(&self) -> Result<(), Error> {
		let conn = self.pool.get().await?;

		conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

		Ok(())
	}

	async fn insert_restaurant(
		&self,
		restaurant: NewRestaurant,
	) -> Result<PrimitiveRestaurant, Error> {
		let conn = self.pool.get().await?;

		restaurant.insert(&conn).await
	}

	async fn restaurants(&self) -> Result<Vec<PrimitiveRestaurant>, Error> {
		let conn = self.pool.get().await?;

		PrimitiveRestaurant::get_all(&conn).await
	}

	async fn restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Option<PrimitiveRestaurant>, Error> {
		let conn = self.pool.get().await?;

		PrimitiveRestaurant::get_by_id(restaurant_id, &conn).await
	}

	async fn update_restaurant(
		&self,
		restaurant_id: i32,
		update: RestaurantUpdate,
	) -> Result<Option<PrimitiveRestaurant>, Error> {
		let conn = self.pool.get().await?;

		update.apply_to(restaurant_id, &conn).await
	}

	async fn delete_restaurant(&self, restaurant_id: i32) -> Result<bool, Error> {
		let conn = self.pool.get().await?;

		PrimitiveRestaurant::delete_by_id(restaurant_id, &conn).await
	}

	async fn insert_table(&self, table: NewTable) -> Result<PrimitiveTable, Error> {
		let conn = self.pool.get().await?;

		table.insert(&conn).await.map_err(|e| {
			match e {
				Error::NotFound(_) => {
					Error::NotFound(format!(
						"restaurant with id {}",
						table.restaurant_id
					))
				},
				e => e,
			}
		})
	}

	async fn table(&self, table_id: i32) -> Result<Option<Table>, Error> {
		let conn = self.pool.get().await?;

		let Some(table) = PrimitiveTable::get_by_id(table_id, &conn).await? else {
			return Ok(None);
		};

		let table = PrimitiveTableWindow::get_for_tables(vec![table], &conn)
			.await?
			.into_iter()
			.next()
			.map(Table::from);

		Ok(table)
	}

	async fn tables_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<Table>, Error> {
		let conn = self.pool.get().await?;

		let tables = PrimitiveTable::get_for_restaurant(restaurant_id, &conn).await?;

		let tables = PrimitiveTableWindow::get_for_tables(tables, &conn)
			.await?
			.into_iter()
			.map(Table::from)
			.collect();

		Ok(tables)
	}

	async fn delete_table(
		&self,
		restaurant_id: i32,
		table_id: i32,
	) -> Result<Option<PrimitiveTable>, Error> {
		let conn = self.pool.get().await?;

		PrimitiveTable::delete_for_restaurant(restaurant_id, table_id, &conn).await
	}

	async fn append_window(
		&self,
		table_id: i32,
		window: TimeWindow,
	) -> Result<WindowInsert, Error> {
		let conn = self.pool.get().await?;

		let new_window = NewTableWindow {
			table_id,
			start_time: window.start,
			end_time: window.end,
		};

		new_window
			.insert_unless(
				move |held| {
					conflicts_at(held.iter().map(TimeWindow::from), window.start)
				},
				&conn,
			)
			.await
	}

	async fn remove_window(&self, window_id: i32) -> Result<bool, Error> {
		let conn = self.pool.get().await?;

		PrimitiveTableWindow::delete_by_id(window_id, &conn).await
	}

	async fn insert_reservation(
		&self,
		reservation: NewReservation,
	) -> Result<PrimitiveReservation, Error> {
		let conn = self.pool.get().await?;

		reservation.insert(&conn).await
	}

	async fn reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<Option<PrimitiveReservation>, Error> {
		let conn = self.pool.get().await?;

		PrimitiveReservation::get_for_restaurant_by_id(
			restaurant_id,
			reservation_id,
			&conn,
		)
		.await
	}

	async fn reservations_for_restaurant(
		&self,
		restaurant_id: i32,
	) -> Result<Vec<PrimitiveReservation>, Error> {
		let conn = self.pool.get().await?;

		PrimitiveReservation::get_for_restaurant(restaurant_id, &conn).await
	}

	async fn delete_reservation(
		&self,
		restaurant_id: i32,
		reservation_id: i32,
	) -> Result<bool, Error> {
		let conn = self.pool.get().await?;

		PrimitiveReservation::delete_for_restaurant(
			restaurant_id,
			reservation_id,
			&conn,
		)
		.await
	}
}
