#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, NaiveTime, Utc};
use common::{DbConn, Error};
use db::restaurant;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveRestaurant {
	pub id:            i32,
	pub name:          String,
	pub email:         String,
	pub address:       String,
	pub phone:         String,
	pub image_url:     Option<String>,
	pub limited_seats: i32,
	pub opening_hour:  NaiveTime,
	pub closing_hour:  NaiveTime,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl PrimitiveRestaurant {
	/// Get a [`PrimitiveRestaurant`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let restaurant = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				restaurant
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(restaurant)
	}

	/// Get all [`PrimitiveRestaurant`]s ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let restaurants = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				restaurant
					.order((name.asc(), id.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(restaurants)
	}

	/// Delete a [`PrimitiveRestaurant`] by its id, the database cascades the
	/// deletion to its tables, windows and reservations
	///
	/// Returns `false` if no such restaurant existed
	#[instrument(skip(conn))]
	pub async fn delete_by_id(r_id: i32, conn: &DbConn) -> Result<bool, Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				diesel::delete(restaurant.find(r_id)).execute(conn)
			})
			.await??;

		if deleted > 0 {
			info!("deleted restaurant with id {r_id}");
		}

		Ok(deleted > 0)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct NewRestaurant {
	pub name:          String,
	pub email:         String,
	pub address:       String,
	pub phone:         String,
	pub image_url:     Option<String>,
	pub limited_seats: i32,
	pub opening_hour:  NaiveTime,
	pub closing_hour:  NaiveTime,
}

impl NewRestaurant {
	/// Insert this [`NewRestaurant`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveRestaurant, Error> {
		let restaurant = conn
			.interact(|conn| {
				use self::restaurant::dsl::*;

				diesel::insert_into(restaurant)
					.values(self)
					.returning(PrimitiveRestaurant::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("registered restaurant {} ({})", restaurant.name, restaurant.id);

		Ok(restaurant)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct RestaurantUpdate {
	pub name:          Option<String>,
	pub email:         Option<String>,
	pub address:       Option<String>,
	pub phone:         Option<String>,
	pub image_url:     Option<String>,
	pub limited_seats: Option<i32>,
	pub opening_hour:  Option<NaiveTime>,
	pub closing_hour:  Option<NaiveTime>,
}

impl RestaurantUpdate {
	/// Merge this update into an existing restaurant without touching the
	/// database
	#[must_use]
	pub fn merged_into(
		&self,
		mut target: PrimitiveRestaurant,
	) -> PrimitiveRestaurant {
		if let Some(v) = &self.name {
			target.name.clone_from(v);
		}
		if let Some(v) = &self.email {
			target.email.clone_from(v);
		}
		if let Some(v) = &self.address {
			target.address.clone_from(v);
		}
		if let Some(v) = &self.phone {
			target.phone.clone_from(v);
		}
		if let Some(v) = &self.image_url {
			target.image_url = Some(v.clone());
		}
		if let Some(v) = self.limited_seats {
			target.limited_seats = v;
		}
		if let Some(v) = self.opening_hour {
			target.opening_hour = v;
		}
		if let Some(v) = self.closing_hour {
			target.closing_hour = v;
		}

		target.updated_at = Utc::now().naive_utc();

		target
	}

	/// Apply this update to the [`PrimitiveRestaurant`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<PrimitiveRestaurant>, Error> {
		let now = Utc::now().naive_utc();

		let restaurant = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				diesel::update(restaurant.find(r_id))
					.set((self, updated_at.eq(now)))
					.returning(PrimitiveRestaurant::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		if let Some(restaurant) = &restaurant {
			info!("updated restaurant {}", restaurant.id);
		}

		Ok(restaurant)
	}
}
