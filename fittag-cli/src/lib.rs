// FitTag client: backend API, onboarding and tag flows, terminal UI

pub mod api;
pub mod commands;
pub mod config;
pub mod flows;
pub mod models;
pub mod notification;
pub mod session;
pub mod ui;
