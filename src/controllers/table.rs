use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use booking::find_available_table;
use common::Error;

use crate::Store;
use crate::schemas::table::{
	AvailableTableQuery,
	AvailableTableResponse,
	CreateTableRequest,
	TableResponse,
};

/// Fail with [`Error::NotFound`] unless the restaurant exists
async fn ensure_restaurant(store: &Store, id: i32) -> Result<(), Error> {
	if store.restaurant(id).await?.is_none() {
		return Err(Error::NotFound(format!("restaurant with id {id}")));
	}

	Ok(())
}

#[instrument(skip(store))]
pub async fn get_tables(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	ensure_restaurant(&store, r_id).await?;

	let tables = store.tables_for_restaurant(r_id).await?;

	let response: Vec<TableResponse> =
		tables.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn add_table(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
	Json(request): Json<CreateTableRequest>,
) -> Result<impl IntoResponse, Error> {
	ensure_restaurant(&store, r_id).await?;

	let new_table = request.to_insertable(r_id)?;
	let table = store.insert_table(new_table).await?;

	let response = TableResponse::from(table);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_table(
	State(store): State<Store>,
	Path((r_id, t_id)): Path<(i32, i32)>,
) -> Result<NoContent, Error> {
	ensure_restaurant(&store, r_id).await?;

	store.delete_table(r_id, t_id).await?.ok_or_else(|| {
		Error::NotFound(format!("table with id {t_id} in restaurant {r_id}"))
	})?;

	Ok(NoContent)
}

#[instrument(skip(store))]
pub async fn get_available_table(
	State(store): State<Store>,
	Query(query): Query<AvailableTableQuery>,
) -> Result<impl IntoResponse, Error> {
	let table = find_available_table(
		store.as_ref(),
		query.restaurant_id,
		&query.date,
		&query.time,
		query.seats,
	)
	.await?;

	let response = AvailableTableResponse::from(table);

	Ok((StatusCode::OK, Json(response)))
}
