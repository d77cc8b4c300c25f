use booking::{OperatingHours, parse_wall_clock};
use chrono::{NaiveDateTime, NaiveTime};
use common::Error;
use primitive_restaurant::{
	NewRestaurant,
	PrimitiveRestaurant,
	RestaurantUpdate,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
	pub id:            i32,
	pub name:          String,
	pub email:         String,
	pub address:       String,
	pub phone:         String,
	pub image_url:     Option<String>,
	pub limited_seats: i32,
	pub opening_hour:  NaiveTime,
	pub closing_hour:  NaiveTime,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl From<PrimitiveRestaurant> for RestaurantResponse {
	fn from(value: PrimitiveRestaurant) -> Self {
		Self {
			id:            value.id,
			name:          value.name,
			email:         value.email,
			address:       value.address,
			phone:         value.phone,
			image_url:     value.image_url,
			limited_seats: value.limited_seats,
			opening_hour:  value.opening_hour,
			closing_hour:  value.closing_hour,
			created_at:    value.created_at,
			updated_at:    value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
	#[validate(length(min = 2, max = 99))]
	pub name:          String,
	#[validate(email, length(max = 255))]
	pub email:         String,
	#[validate(length(min = 5, max = 255))]
	pub address:       String,
	#[validate(length(min = 5, max = 20))]
	pub phone:         String,
	#[validate(length(max = 1024))]
	pub image_url:     Option<String>,
	#[validate(range(min = 0))]
	pub limited_seats: i32,
	pub opening_hour:  String,
	pub closing_hour:  String,
}

impl CreateRestaurantRequest {
	/// Validate this request and turn it into an insertable restaurant
	///
	/// # Errors
	/// Errors if a field is invalid, if an hour does not parse or if the
	/// restaurant would close before it opens
	pub fn to_insertable(self) -> Result<NewRestaurant, Error> {
		self.validate().map_err(|e| Error::invalid_restaurant(&e))?;

		let hours = OperatingHours::new(
			parse_wall_clock(&self.opening_hour)?,
			parse_wall_clock(&self.closing_hour)?,
		)?;

		Ok(NewRestaurant {
			name:          self.name,
			email:         self.email,
			address:       self.address,
			phone:         self.phone,
			image_url:     self.image_url,
			limited_seats: self.limited_seats,
			opening_hour:  hours.opening(),
			closing_hour:  hours.closing(),
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
	#[validate(length(min = 2, max = 99))]
	pub name:          Option<String>,
	#[validate(email, length(max = 255))]
	pub email:         Option<String>,
	#[validate(length(min = 5, max = 255))]
	pub address:       Option<String>,
	#[validate(length(min = 5, max = 20))]
	pub phone:         Option<String>,
	#[validate(length(max = 1024))]
	pub image_url:     Option<String>,
	#[validate(range(min = 0))]
	pub limited_seats: Option<i32>,
	pub opening_hour:  Option<String>,
	pub closing_hour:  Option<String>,
}

impl UpdateRestaurantRequest {
	/// Validate this request against the restaurant it would change
	///
	/// The resulting hours are checked as a whole, so moving only the
	/// closing hour before the current opening hour is refused.
	///
	/// # Errors
	/// Errors if a field is invalid, if an hour does not parse or if the
	/// restaurant would close before it opens
	pub fn to_changeset(
		self,
		current: &PrimitiveRestaurant,
	) -> Result<RestaurantUpdate, Error> {
		self.validate().map_err(|e| Error::invalid_restaurant(&e))?;

		let opening_hour =
			self.opening_hour.as_deref().map(parse_wall_clock).transpose()?;
		let closing_hour =
			self.closing_hour.as_deref().map(parse_wall_clock).transpose()?;

		OperatingHours::new(
			opening_hour.unwrap_or(current.opening_hour),
			closing_hour.unwrap_or(current.closing_hour),
		)?;

		Ok(RestaurantUpdate {
			name: self.name,
			email: self.email,
			address: self.address,
			phone: self.phone,
			image_url: self.image_url,
			limited_seats: self.limited_seats,
			opening_hour,
			closing_hour,
		})
	}
}
