pub mod observation_reader;
pub mod station_reader;

pub use observation_reader::{open_observation_file, RawRecordIter};
pub use station_reader::{StationLineIter, StationReader};
