// ABOUTME: Library crate for notify-panel exposing the API client, controller and UI for testing and reuse

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod models;
