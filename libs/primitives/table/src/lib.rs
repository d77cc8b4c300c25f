#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::{dining_table, restaurant, table_window};
use diesel::dsl::max;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = dining_table)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveTable {
	pub id:            i32,
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub capacity:      i32,
	pub created_at:    NaiveDateTime,
}

impl PrimitiveTable {
	/// Get a [`PrimitiveTable`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		t_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.find(t_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(table)
	}

	/// Get all the [`PrimitiveTable`]s of a restaurant ordered by table number
	#[instrument(skip(conn))]
	pub async fn get_for_restaurant(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let tables = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.filter(restaurant_id.eq(r_id))
					.order(table_number.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(tables)
	}

	/// Delete a [`PrimitiveTable`] belonging to the given restaurant, its
	/// windows and reservations are removed with it
	///
	/// Returns the deleted table, if any
	#[instrument(skip(conn))]
	pub async fn delete_for_restaurant(
		r_id: i32,
		t_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				diesel::delete(
					dining_table.filter(id.eq(t_id)).filter(restaurant_id.eq(r_id)),
				)
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		if let Some(table) = &table {
			info!(
				"deleted table {} of restaurant {}",
				table.table_number, table.restaurant_id
			);
		}

		Ok(table)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct NewTable {
	pub restaurant_id: i32,
	pub capacity:      i32,
}

impl NewTable {
	/// Insert this [`NewTable`] numbered one past the highest table number of
	/// its restaurant
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveTable, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					// Serialise numbering per restaurant
					restaurant::table
						.find(self.restaurant_id)
						.select(restaurant::id)
						.for_update()
						.get_result::<i32>(conn)?;

					let highest: Option<i32> = dining_table
						.filter(restaurant_id.eq(self.restaurant_id))
						.select(max(table_number))
						.get_result(conn)?;

					diesel::insert_into(dining_table)
						.values((
							restaurant_id.eq(self.restaurant_id),
							table_number.eq(highest.unwrap_or(0) + 1),
							capacity.eq(self.capacity),
						))
						.returning(PrimitiveTable::as_returning())
						.get_result(conn)
				})
			})
			.await??;

		info!(
			"added table {} with capacity {} to restaurant {}",
			table.table_number, table.capacity, table.restaurant_id
		);

		Ok(table)
	}
}

#[derive(
	Associations,
	Clone,
	Debug,
	Deserialize,
	Identifiable,
	Queryable,
	Selectable,
	Serialize,
)]
#[diesel(belongs_to(PrimitiveTable, foreign_key = table_id))]
#[diesel(table_name = table_window)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveTableWindow {
	pub id:         i32,
	pub table_id:   i32,
	pub start_time: NaiveDateTime,
	pub end_time:   NaiveDateTime,
}

impl PrimitiveTableWindow {
	/// Get the windows of a set of tables grouped per table, in the same order
	/// as the given tables
	#[instrument(skip(tables, conn))]
	pub async fn get_for_tables(
		tables: Vec<PrimitiveTable>,
		conn: &DbConn,
	) -> Result<Vec<(PrimitiveTable, Vec<Self>)>, Error> {
		let grouped = conn
			.interact(move |conn| {
				let windows = Self::belonging_to(&tables)
					.order(table_window::start_time.asc())
					.select(Self::as_select())
					.load(conn)?;

				let grouped = windows
					.grouped_by(&tables)
					.into_iter()
					.zip(tables)
					.map(|(w, t)| (t, w))
					.collect::<Vec<_>>();

				Ok::<_, diesel::result::Error>(grouped)
			})
			.await??;

		Ok(grouped)
	}

	/// Delete a window by its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(w_id: i32, conn: &DbConn) -> Result<bool, Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::table_window::dsl::*;

				diesel::delete(table_window.find(w_id)).execute(conn)
			})
			.await??;

		Ok(deleted > 0)
	}
}

/// Outcome of a conditional window insert
#[derive(Clone, Debug)]
pub enum WindowInsert {
	/// The window was stored
	Inserted(PrimitiveTableWindow),
	/// An existing window clashes with the new one, nothing was written
	Conflict,
	/// The table does not exist
	MissingTable,
}

#[derive(Clone, Copy, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = table_window)]
#[diesel(check_for_backend(Pg))]
pub struct NewTableWindow {
	pub table_id:   i32,
	pub start_time: NaiveDateTime,
	pub end_time:   NaiveDateTime,
}

impl NewTableWindow {
	/// Insert this window unless `conflicts` reports a clash with one of the
	/// windows already held by the table
	///
	/// The table row is locked for the duration of the check and the insert,
	/// so concurrent callers targeting the same table are serialised.
	#[instrument(skip(conflicts, conn))]
	pub async fn insert_unless<F>(
		self,
		conflicts: F,
		conn: &DbConn,
	) -> Result<WindowInsert, Error>
	where
		F: FnOnce(&[PrimitiveTableWindow]) -> bool + Send + 'static,
	{
		let outcome = conn
			.interact(move |conn| {
				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					let locked: Option<i32> = dining_table::table
						.find(self.table_id)
						.select(dining_table::id)
						.for_update()
						.get_result(conn)
						.optional()?;

					if locked.is_none() {
						return Ok(WindowInsert::MissingTable);
					}

					let existing = table_window::table
						.filter(table_window::table_id.eq(self.table_id))
						.select(PrimitiveTableWindow::as_select())
						.load(conn)?;

					if conflicts(&existing) {
						return Ok(WindowInsert::Conflict);
					}

					let window = diesel::insert_into(table_window::table)
						.values(self)
						.returning(PrimitiveTableWindow::as_returning())
						.get_result(conn)?;

					Ok(WindowInsert::Inserted(window))
				})
			})
			.await??;

		Ok(outcome)
	}
}
