pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod view;
