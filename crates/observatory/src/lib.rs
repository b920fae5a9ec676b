pub mod errors;
pub mod models;
pub mod object_store;
pub mod resolve;
pub mod views;
