use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use booking::MemoryStore;
use serde_json::json;
use tablebook::schemas::restaurant::RestaurantResponse;
use tablebook::schemas::table::TableResponse;
use tablebook::{AppState, Config, Store, routes};
use tracing::Level;

#[allow(dead_code)]
pub mod mock_db;

#[allow(dead_code)]
pub struct TestEnv {
	pub app:   TestServer,
	pub store: Store,
}

#[allow(dead_code)]
impl TestEnv {
	/// Get a test environment backed by an in-memory store
	///
	/// # Panics
	/// Panics if building the test server fails
	pub fn new() -> Self { Self::with_store(Arc::new(MemoryStore::new())) }

	/// Get a test environment backed by the given store
	///
	/// # Panics
	/// Panics if building the test server fails
	pub fn with_store(store: Store) -> Self {
		let config = Config {
			database_url:    String::new(),
			bind_address:    "127.0.0.1:0".to_string(),
			request_timeout: Duration::from_secs(10),
			log_level:       Level::DEBUG,
		};

		let state = AppState { config, store: store.clone() };
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv { app: test_server, store }
	}

	/// Register a restaurant open from 09:00 until 22:00
	pub async fn create_restaurant(
		&self,
		email: &str,
		limited_seats: i32,
	) -> RestaurantResponse {
		self.app
			.post("/restaurants")
			.json(&json!({
				"name": "De Gouden Tafel",
				"email": email,
				"address": "Korenmarkt 1, 9000 Gent",
				"phone": "+32 9 123 45 67",
				"limitedSeats": limited_seats,
				"openingHour": "09:00",
				"closingHour": "22:00",
			}))
			.await
			.json::<RestaurantResponse>()
	}

	/// Add a table with the given capacity to a restaurant
	pub async fn add_table(&self, restaurant_id: i32, capacity: i32) -> TableResponse {
		self.app
			.post(&format!("/restaurants/{restaurant_id}/tables"))
			.json(&json!({ "capacity": capacity }))
			.await
			.json::<TableResponse>()
	}
}
