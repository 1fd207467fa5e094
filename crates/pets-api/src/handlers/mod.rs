//! HTTP handlers for pets API endpoints

pub mod health;
pub mod pets;
