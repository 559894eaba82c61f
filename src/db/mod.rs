pub mod connection;
pub mod observation_loader;
pub mod report;
pub mod schema;
pub mod station_loader;

pub use connection::connect_with_retry;
pub use observation_loader::ObservationLoader;
pub use report::LoadReport;
pub use station_loader::StationLoader;
