use csv::StringRecord;

use crate::error::{LoadError, Result};
use crate::utils::constants::MIN_OBSERVATION_COLUMNS;

/// One accepted observation row, buffered only until its batch is flushed.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    pub station_id: String,
    /// Kept as text; the database parses it when the batch is stored.
    pub observation_date: String,
    pub observation_type: String,
    pub value: Option<f64>,
    pub flag: Option<String>,
    pub time_of_observation: Option<String>,
}

impl ObservationRecord {
    /// Classify one CSV record. `Ok(None)` drops non-US stations silently;
    /// `Err` marks a malformed row (too few columns, non-numeric value).
    pub fn from_record(record: &StringRecord) -> Result<Option<Self>> {
        if record.len() < MIN_OBSERVATION_COLUMNS {
            return Err(LoadError::InvalidFormat(format!(
                "insufficient columns ({} of {} required)",
                record.len(),
                MIN_OBSERVATION_COLUMNS
            )));
        }

        let station_id = record[0].to_string();
        if !is_us_station(&station_id) {
            return Ok(None);
        }

        let raw_value = &record[3];
        let value = if raw_value.is_empty() {
            None
        } else {
            Some(raw_value.parse::<f64>().map_err(|_| {
                LoadError::InvalidFormat(format!("invalid value '{}'", raw_value))
            })?)
        };

        Ok(Some(Self {
            station_id,
            observation_date: record[1].to_string(),
            observation_type: record[2].to_string(),
            value,
            flag: record.get(6).map(str::to_string),
            time_of_observation: record.get(7).map(str::to_string),
        }))
    }
}

/// Inclusion rule for both loaders: the station identifier must start with
/// "US", case-insensitively.
pub fn is_us_station(station_id: &str) -> bool {
    station_id
        .get(..2)
        .map(|prefix| prefix.eq_ignore_ascii_case("US"))
        .unwrap_or(false)
}
