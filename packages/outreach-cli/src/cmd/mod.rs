//! Command implementations

pub mod auth;
pub mod history;
pub mod menu;
pub mod open;
pub mod results;
pub mod search;
