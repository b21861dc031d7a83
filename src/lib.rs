pub mod api;
pub mod auth;
pub mod config;
pub mod courier;
pub mod error;
pub mod models;
pub mod observability;
pub mod state;
pub mod tracking;
