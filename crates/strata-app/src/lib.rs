//! Headless driver for the biome shifter: scheduling, a scripted observer,
//! and a seeded in-memory world.

pub mod error;
pub mod observer;
pub mod scheduler;
pub mod simulation;

pub use error::AppError;
pub use observer::PatrolObserver;
pub use scheduler::{MAX_CATCH_UP, PeriodicAction};
pub use simulation::{RunStats, SHIFT_ACTION, Simulation, seed_world};
