// API routes and handlers

pub mod health;
pub mod metrics;
pub mod plans;
pub mod routes;
pub mod sessions;
pub mod templates;
