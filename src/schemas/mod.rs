pub mod reservation;
pub mod restaurant;
pub mod table;
