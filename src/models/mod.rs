pub mod observation;
pub mod station;

pub use observation::{is_us_station, ObservationRecord};
pub use station::StationRecord;
