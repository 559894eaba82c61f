/// File names
pub const OBSERVATION_FILE_SUFFIX: &str = ".csv.gz";
pub const STATIONS_FILE: &str = "ghcnd-stations.txt";

/// Minimum source columns; a station line may end at the state token,
/// leaving the location description empty.
pub const MIN_OBSERVATION_COLUMNS: usize = 4;
pub const MIN_STATION_COLUMNS: usize = 5;

/// Batching defaults
pub const DEFAULT_BATCH_SIZE: usize = 1_000;
/// Upper bound keeps the widest multi-row statement (8 columns) under
/// the wire protocol's 65535 bind-parameter limit.
pub const MAX_BATCH_SIZE: usize = 5_000;

/// Connection retry defaults
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Storage column widths
pub const MAX_LOCATION_LENGTH: usize = 100;

/// Log entry timestamp format
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
