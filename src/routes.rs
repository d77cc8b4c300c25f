use axum::Router;
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::healthcheck;
use crate::controllers::reservation::{
	create_reservation,
	delete_reservation,
	get_reservation,
	get_reservations,
};
use crate::controllers::restaurant::{
	create_restaurant,
	delete_restaurant,
	get_restaurant,
	get_restaurants,
	update_restaurant,
};
use crate::controllers::table::{
	add_table,
	delete_table,
	get_available_table,
	get_tables,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.route("/available-table", get(get_available_table))
		.nest("/restaurants", restaurant_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(state.config.request_timeout))
				.layer(CompressionLayer::new())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Restaurant routes, tables and reservations live under their restaurant
fn restaurant_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_restaurant).get(get_restaurants))
		.route(
			"/{id}",
			get(get_restaurant)
				.patch(update_restaurant)
				.delete(delete_restaurant),
		)
		.route("/{id}/tables", get(get_tables).post(add_table))
		.route("/{id}/tables/{table_id}", delete(delete_table))
		.route("/{id}/tables/{table_id}/reservations", post(create_reservation))
		.route("/{id}/reservations", get(get_reservations))
		.route(
			"/{id}/reservations/{reservation_id}",
			get(get_reservation).delete(delete_reservation),
		)
}
