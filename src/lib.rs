pub mod app;
pub mod auth;
pub mod companies;
pub mod config;
pub mod error;
pub mod openapi;
pub mod response;
pub mod state;
