//! Diesel table definitions shared by every crate that talks to the database

mod schema;

pub use schema::*;
