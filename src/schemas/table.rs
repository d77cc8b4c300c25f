use booking::{Table, TimeWindow};
use chrono::NaiveDateTime;
use common::Error;
use primitive_table::{NewTable, PrimitiveTable};
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
	pub id:            i32,
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub capacity:      i32,
	pub created_at:    NaiveDateTime,
	pub res_dates:     Vec<TimeWindow>,
}

impl From<Table> for TableResponse {
	fn from(value: Table) -> Self {
		Self {
			id:            value.primitive.id,
			restaurant_id: value.primitive.restaurant_id,
			table_number:  value.primitive.table_number,
			capacity:      value.primitive.capacity,
			created_at:    value.primitive.created_at,
			res_dates:     value.windows,
		}
	}
}

impl From<PrimitiveTable> for TableResponse {
	fn from(value: PrimitiveTable) -> Self {
		Table { primitive: value, windows: vec![] }.into()
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
	#[validate(range(min = 1))]
	pub capacity: i32,
}

impl CreateTableRequest {
	/// Validate this request and turn it into an insertable table
	///
	/// # Errors
	/// Errors if the capacity is not positive
	pub fn to_insertable(self, restaurant_id: i32) -> Result<NewTable, Error> {
		self.validate().map_err(|e| Error::invalid_table(&e))?;

		Ok(NewTable { restaurant_id, capacity: self.capacity })
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTableQuery {
	pub restaurant_id: i32,
	pub date:          String,
	pub time:          String,
	pub seats:         i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTableResponse {
	pub table_number: i32,
	pub capacity:     i32,
	pub id:           i32,
}

impl From<Table> for AvailableTableResponse {
	fn from(value: Table) -> Self {
		Self {
			table_number: value.primitive.table_number,
			capacity:     value.primitive.capacity,
			id:           value.primitive.id,
		}
	}
}
