pub mod models;
pub mod products;
pub mod views;
