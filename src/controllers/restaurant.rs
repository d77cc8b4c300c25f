use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::Error;

use crate::Store;
use crate::schemas::restaurant::{
	CreateRestaurantRequest,
	RestaurantResponse,
	UpdateRestaurantRequest,
};

#[instrument(skip(store))]
pub async fn create_restaurant(
	State(store): State<Store>,
	Json(request): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_restaurant = request.to_insertable()?;
	let restaurant = store.insert_restaurant(new_restaurant).await?;

	let response = RestaurantResponse::from(restaurant);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_restaurants(
	State(store): State<Store>,
) -> Result<impl IntoResponse, Error> {
	let restaurants = store.restaurants().await?;

	let response: Vec<RestaurantResponse> =
		restaurants.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_restaurant(
	State(store): State<Store>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let restaurant = store
		.restaurant(id)
		.await?
		.ok_or_else(|| Error::NotFound(format!("restaurant with id {id}")))?;

	let response = RestaurantResponse::from(restaurant);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn update_restaurant(
	State(store): State<Store>,
	Path(id): Path<i32>,
	Json(request): Json<UpdateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	let not_found = || Error::NotFound(format!("restaurant with id {id}"));

	let current = store.restaurant(id).await?.ok_or_else(not_found)?;

	let changeset = request.to_changeset(&current)?;
	let updated =
		store.update_restaurant(id, changeset).await?.ok_or_else(not_found)?;

	let response = RestaurantResponse::from(updated);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_restaurant(
	State(store): State<Store>,
	Path(id): Path<i32>,
) -> Result<NoContent, Error> {
	if !store.delete_restaurant(id).await? {
		return Err(Error::NotFound(format!("restaurant with id {id}")));
	}

	Ok(NoContent)
}
