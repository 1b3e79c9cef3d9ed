pub mod approvals;
pub mod assignments;
pub mod delivery;
pub mod offerings;

#[cfg(test)]
mod tests;
