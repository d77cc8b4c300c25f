//! # Tablebook backend library

#[macro_use]
extern crate tracing;

use std::sync::Arc;

use axum::extract::FromRef;
use booking::BookingStore;

mod config;
mod store;

pub mod controllers;
pub mod routes;
pub mod schemas;

pub use config::*;
pub use store::*;

/// Shared handle to whichever [`BookingStore`] the app runs against
pub type Store = Arc<dyn BookingStore>;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config: Config,
	pub store:  Store,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for Store {
	fn from_ref(input: &AppState) -> Self { input.store.clone() }
}
