mod util;

use std::env;

use chrono::NaiveTime;
use clap::{Error, Parser};
use common::DbConn;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::prelude::*;
use fake::Fake;
use fake::faker::address::raw::{CityName, StreetName};
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::FreeEmail;
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, FR_FR};
use primitive_restaurant::NewRestaurant;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};

use crate::util::{batch_insert, generate_unique_set, io_error};

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'r', default_value_t = 1_000)]
	restaurants: usize,
	#[arg(long, short = 't', default_value_t = 12)]
	tables:      usize,
}

/// A table row with an explicit table number, numbering starts at 1 for
/// every restaurant
#[derive(Insertable)]
#[diesel(table_name = db::dining_table)]
struct SeedTable {
	restaurant_id: i32,
	table_number:  i32,
	capacity:      i32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	if cli.restaurants > 0 {
		println!("Seeding {} restaurants…", cli.restaurants);
		let inserted = seed_restaurants(&conn, cli.restaurants).await?;
		println!("Inserted {inserted} restaurants");
	}

	if cli.tables > 0 {
		println!("Seeding up to {} tables per restaurant…", cli.tables);
		let inserted = seed_tables(&conn, cli.tables).await?;
		println!("Inserted {inserted} tables");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// Seed restaurants with unique emails and random opening hours
async fn seed_restaurants(conn: &DbConn, count: usize) -> Result<usize, Error> {
	let emails = generate_unique_set(count, || FreeEmail(EN).fake::<String>());

	let mut rng = rng();

	let restaurants: Vec<NewRestaurant> = emails
		.into_iter()
		.map(|email| {
			let street = StreetName(FR_FR).fake::<String>();
			let number = rng.random_range(1..200);
			let city = CityName(FR_FR).fake::<String>();

			let opening_hour =
				NaiveTime::from_hms_opt(rng.random_range(7..=12), 0, 0)
					.unwrap_or(NaiveTime::MIN);
			let closing_hour = NaiveTime::from_hms_opt(
				rng.random_range(20..=23),
				if rng.random_bool(0.5) { 30 } else { 0 },
				0,
			)
			.unwrap_or(NaiveTime::MIN);

			NewRestaurant {
				name: CompanyName(EN).fake(),
				email,
				address: format!("{street} {number}, {city}"),
				phone: PhoneNumber(EN).fake(),
				image_url: None,
				limited_seats: rng.random_range(4..=40),
				opening_hour,
				closing_hour,
			}
		})
		.collect();

	batch_insert(conn, restaurants, 2 << 10, |conn, chunk| {
		use db::restaurant::dsl::*;
		diesel::insert_into(restaurant).values(chunk).execute(conn)
	})
	.await
}

/// Give every restaurant without tables a random set of tables
async fn seed_tables(conn: &DbConn, max_per_restaurant: usize) -> Result<usize, Error> {
	let restaurant_ids: Vec<i32> = conn
		.interact(|c| {
			use db::{dining_table, restaurant};

			restaurant::table
				.left_join(dining_table::table)
				.filter(dining_table::id.is_null())
				.select(restaurant::id)
				.load::<i32>(c)
		})
		.await
		.map_err(io_error)?
		.map_err(io_error)?;

	let mut rng = rng();

	let tables: Vec<SeedTable> = restaurant_ids
		.into_iter()
		.flat_map(|restaurant_id| {
			let count = rng.random_range(1..=max_per_restaurant);

			(1..=count)
				.map(|number| {
					SeedTable {
						restaurant_id,
						table_number: i32::try_from(number).unwrap_or(i32::MAX),
						capacity: *[2, 2, 4, 4, 4, 6, 8].choose(&mut rng).unwrap_or(&4),
					}
				})
				.collect::<Vec<_>>()
		})
		.collect();

	batch_insert(conn, tables, 2 << 10, |conn, chunk| {
		use db::dining_table::dsl::*;
		diesel::insert_into(dining_table).values(chunk).execute(conn)
	})
	.await
}
