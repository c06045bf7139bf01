pub mod app;
pub mod app_state;
pub mod backend;
pub mod config;
pub mod content;
pub mod error;
pub mod guard;
pub mod health;
pub mod pages;
