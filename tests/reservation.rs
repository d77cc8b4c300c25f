use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;

use common::TestEnv;
use tablebook::schemas::reservation::ReservationResponse;
use tablebook::schemas::table::TableResponse;

fn reservation_at(time: &str, seats: i32) -> Value {
	json!({
		"customerName": "Jane Doe",
		"phone": "0470123456",
		"seats": seats,
		"reservationTime": time,
	})
}

#[tokio::test]
async fn create_reservation() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let response = env
		.app
		.post(&format!(
			"/restaurants/{}/tables/{}/reservations",
			restaurant.id, table.id
		))
		.json(&reservation_at("2024-01-01T12:00", 3))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<ReservationResponse>();

	assert_eq!(body.table_id, table.id);
	assert_eq!(body.restaurant_id, restaurant.id);
	assert_eq!(body.seats, 3);
	assert_eq!(body.reservation_time.to_string(), "2024-01-01 12:00:00");

	let tables = env
		.app
		.get(&format!("/restaurants/{}/tables", restaurant.id))
		.await
		.json::<Vec<TableResponse>>();

	assert_eq!(tables[0].res_dates.len(), 1);
	assert_eq!(tables[0].res_dates[0].end.to_string(), "2024-01-01 13:00:00");
}

#[tokio::test]
async fn create_reservation_conflict() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let path = format!(
		"/restaurants/{}/tables/{}/reservations",
		restaurant.id, table.id
	);

	let response = env.app.post(&path).json(&reservation_at("2024-01-01T12:00", 2)).await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env.app.post(&path).json(&reservation_at("2024-01-01T13:00", 2)).await;
	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert_eq!(response.json::<Value>()["code"], json!(8));

	let response = env.app.post(&path).json(&reservation_at("2024-01-01T13:01", 2)).await;
	assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn create_reservation_rejected_before_writing() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let path = format!(
		"/restaurants/{}/tables/{}/reservations",
		restaurant.id, table.id
	);

	let cases = [
		(reservation_at("2024-01-01T12:00", 0), StatusCode::UNPROCESSABLE_ENTITY),
		(reservation_at("2024-01-01T12:00", 5), StatusCode::BAD_REQUEST),
		(reservation_at("2024-01-01T07:00", 2), StatusCode::BAD_REQUEST),
		(reservation_at("sometime tomorrow", 2), StatusCode::BAD_REQUEST),
	];

	for (body, status) in cases {
		let response = env.app.post(&path).json(&body).await;

		assert_eq!(response.status_code(), status, "{body}");
	}

	let reservations = env
		.app
		.get(&format!("/restaurants/{}/reservations", restaurant.id))
		.await
		.json::<Vec<ReservationResponse>>();

	assert!(reservations.is_empty());

	let tables = env
		.app
		.get(&format!("/restaurants/{}/tables", restaurant.id))
		.await
		.json::<Vec<TableResponse>>();

	assert!(tables[0].res_dates.is_empty());
}

#[tokio::test]
async fn create_reservation_unknown_table() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;

	let response = env
		.app
		.post(&format!("/restaurants/{}/tables/999/reservations", restaurant.id))
		.json(&reservation_at("2024-01-01T12:00", 2))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_reservations() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let path = format!(
		"/restaurants/{}/tables/{}/reservations",
		restaurant.id, table.id
	);

	env.app.post(&path).json(&reservation_at("2024-01-01T18:00", 2)).await;
	env.app.post(&path).json(&reservation_at("2024-01-01T12:00", 2)).await;

	let response =
		env.app.get(&format!("/restaurants/{}/reservations", restaurant.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let times: Vec<String> = response
		.json::<Vec<ReservationResponse>>()
		.into_iter()
		.map(|r| r.reservation_time.format("%H:%M").to_string())
		.collect();

	assert_eq!(times, vec!["12:00", "18:00"]);
}

#[tokio::test]
async fn get_reservation() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let other = env.create_restaurant("two@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let created = env
		.app
		.post(&format!(
			"/restaurants/{}/tables/{}/reservations",
			restaurant.id, table.id
		))
		.json(&reservation_at("2024-01-01T12:00", 2))
		.await
		.json::<ReservationResponse>();

	let response = env
		.app
		.get(&format!("/restaurants/{}/reservations/{}", restaurant.id, created.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<ReservationResponse>().id, created.id);

	let response = env
		.app
		.get(&format!("/restaurants/{}/reservations/{}", other.id, created.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_reservation_frees_the_table() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	let path = format!(
		"/restaurants/{}/tables/{}/reservations",
		restaurant.id, table.id
	);

	let created = env
		.app
		.post(&path)
		.json(&reservation_at("2024-01-01T12:00", 2))
		.await
		.json::<ReservationResponse>();

	let response = env
		.app
		.delete(&format!("/restaurants/{}/reservations/{}", restaurant.id, created.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.post(&path).json(&reservation_at("2024-01-01T12:00", 2)).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn deleting_a_table_drops_its_reservations() {
	let env = TestEnv::new();

	let restaurant = env.create_restaurant("one@example.com", 10).await;
	let table = env.add_table(restaurant.id, 4).await;

	env.app
		.post(&format!(
			"/restaurants/{}/tables/{}/reservations",
			restaurant.id, table.id
		))
		.json(&reservation_at("2024-01-01T12:00", 2))
		.await;

	env.app
		.delete(&format!("/restaurants/{}/tables/{}", restaurant.id, table.id))
		.await;

	let reservations = env
		.app
		.get(&format!("/restaurants/{}/reservations", restaurant.id))
		.await
		.json::<Vec<ReservationResponse>>();

	assert!(reservations.is_empty());
}
