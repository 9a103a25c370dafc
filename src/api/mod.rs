// API layer module (adapters for controllers)
// HTTP is an adapter over the domain repositories

pub mod errors;
pub mod extract;
pub mod handlers;
