//! Route Handlers

pub mod health;
pub mod predict;
