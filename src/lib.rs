pub mod app;
pub mod applications;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod state;
