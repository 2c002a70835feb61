pub mod auth;
pub mod envelope;
pub mod handlers;
pub mod models;
pub mod routes;
