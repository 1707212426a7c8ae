//! API request handlers

pub mod dashboard;
pub mod events;
pub mod health;
