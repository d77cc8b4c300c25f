//! # Table booking core
//!
//! Everything needed to answer "which table can seat this party at this
//! time" and to record a reservation against that table without ever
//! double-booking it. Persistence is reached through the [`BookingStore`]
//! trait so the same rules run against PostgreSQL and against the in-memory
//! [`MemoryStore`].

#[macro_use]
extern crate tracing;

mod commit;
mod hours;
mod memory;
mod resolver;
mod store;
mod table;
mod time;
mod window;

pub use commit::*;
pub use hours::*;
pub use memory::*;
pub use resolver::*;
pub use store::*;
pub use table::*;
pub use time::*;
pub use window::*;

/// Length of the window a reservation occupies on its table
pub const RESERVATION_WINDOW_MINUTES: i64 = 60;
