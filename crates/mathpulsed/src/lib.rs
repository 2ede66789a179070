//! MathPulse Daemon - JSON API over the tutoring services

pub mod routes;
pub mod server;

pub use server::{app, run, AppState};
