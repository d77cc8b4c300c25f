use chrono::NaiveDateTime;
use primitive_table::{PrimitiveTable, PrimitiveTableWindow};
use serde::{Deserialize, Serialize};

use crate::{TimeWindow, conflicts_at};

/// A table together with the windows it currently holds
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Table {
	pub primitive: PrimitiveTable,
	pub windows:   Vec<TimeWindow>,
}

impl Table {
	/// Check whether the table is free at `at`
	#[must_use]
	pub fn is_available_at(&self, at: NaiveDateTime) -> bool {
		!conflicts_at(self.windows.iter().copied(), at)
	}
}

impl From<(PrimitiveTable, Vec<PrimitiveTableWindow>)> for Table {
	fn from(value: (PrimitiveTable, Vec<PrimitiveTableWindow>)) -> Self {
		Self {
			primitive: value.0,
			windows:   value.1.iter().map(Into::into).collect(),
		}
	}
}
