//! Route definitions for the dashboard API.

pub mod dashboard;
pub mod health;
