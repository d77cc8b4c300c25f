use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use booking::{ReservationRequest, make_reservation};
use common::Error;

use crate::Store;
use crate::schemas::reservation::ReservationResponse;

#[instrument(skip(store))]
pub async fn create_reservation(
	State(store): State<Store>,
	Path((r_id, t_id)): Path<(i32, i32)>,
	Json(request): Json<ReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let reservation =
		make_reservation(store.as_ref(), r_id, t_id, request).await?;

	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_reservations(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	if store.restaurant(r_id).await?.is_none() {
		return Err(Error::NotFound(format!("restaurant with id {r_id}")));
	}

	let reservations = store.reservations_for_restaurant(r_id).await?;

	let response: Vec<ReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_reservation(
	State(store): State<Store>,
	Path((r_id, res_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let reservation = store.reservation(r_id, res_id).await?.ok_or_else(|| {
		Error::NotFound(format!(
			"reservation with id {res_id} in restaurant {r_id}"
		))
	})?;

	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_reservation(
	State(store): State<Store>,
	Path((r_id, res_id)): Path<(i32, i32)>,
) -> Result<NoContent, Error> {
	if !store.delete_reservation(r_id, res_id).await? {
		return Err(Error::NotFound(format!(
			"reservation with id {res_id} in restaurant {r_id}"
		)));
	}

	Ok(NoContent)
}
