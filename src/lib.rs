pub mod auth;
pub mod commands;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
pub mod views;
