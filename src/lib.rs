//! Last Location Tracker
//!
//! Busca a última localização conhecida em um backend, mede quanto tempo cada
//! busca levou e mostra o histórico com as estatísticas de tempo
//! (mais rápida, mais lenta, média).

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod stats;
pub mod tracker;
pub mod types;
pub mod view;

pub use client::{client_for_endpoint, LocationClient};
pub use error::{AppError, FetchError, TrackerError};
pub use stats::{calculate_stats, Stats};
pub use tracker::{ResultTracker, TrackerState};
pub use types::{Address, LocationRecord, LocationResponse};
