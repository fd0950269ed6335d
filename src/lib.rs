pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod schedule;
pub mod services;
