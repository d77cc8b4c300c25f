use std::time::Duration;

use deadpool_diesel::postgres::{Manager, Pool};
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub bind_address:    String,
	pub request_timeout: Duration,
	pub log_level:       Level,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if `DATABASE_URL` is missing or if a variable holds a value
	/// that does not parse
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let bind_address = Self::get_env_var_or("BIND_ADDRESS", "0.0.0.0:80");

		let request_timeout = Duration::from_secs(
			Self::get_env_var_or("REQUEST_TIMEOUT_SECONDS", "10")
				.parse::<u64>()
				.unwrap_or_else(|_| {
					panic!("REQUEST_TIMEOUT_SECONDS must be a whole number")
				}),
		);

		let log_level = Self::get_env_var_or("LOG_LEVEL", "info")
			.parse::<Level>()
			.unwrap_or_else(|_| panic!("LOG_LEVEL must be a valid log level"));

		Self { database_url, bind_address, request_timeout, log_level }
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}
}
