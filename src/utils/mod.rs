pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use filename::{default_stations_path, is_observation_file};
pub use progress::ProgressReporter;
