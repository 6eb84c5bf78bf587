#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod coordinate;
pub mod error;
pub mod gps_processor;
pub mod journey_tracker;
pub mod logs;
pub mod notification;
pub mod progress;
pub mod session;
pub mod sinks;

pub use config::TrackerConfig;
pub use coordinate::{Coordinate, Distance, Haversine};
pub use error::TrackerError;
pub use journey_tracker::{Arrival, Journey, JourneyTracker, LocationUpdate, TrackerState};
pub use progress::{Band, PercentPolicy, ProgressState};
