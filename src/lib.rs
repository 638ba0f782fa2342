pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod stats;
pub mod store;
pub mod theme;
pub mod views;
