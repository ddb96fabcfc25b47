//! Replays request traces through the 2Q and optimal caches.

pub mod error;
pub mod generator;
pub mod input;
pub mod logging;
pub mod models;
pub mod runner;
pub mod stats;

pub use error::SimulationError;
