pub mod models;
pub mod recommendations;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
