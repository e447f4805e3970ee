pub mod address;
pub mod datetime;
