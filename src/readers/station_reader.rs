use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::{LoadError, Result};
use crate::models::{is_us_station, StationRecord};
use crate::utils::constants::{MAX_LOCATION_LENGTH, MIN_STATION_COLUMNS};

pub struct StationReader {
    distance_pattern: Regex,
    direction_pattern: Regex,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            distance_pattern: Regex::new(r"^\d+(\.\d+)?$").expect("valid distance regex"),
            direction_pattern: Regex::new(r"^[NESW]{1,3}$").expect("valid direction regex"),
        }
    }

    /// Stream (line number, line) pairs from the inventory file, skipping
    /// blank lines.
    pub fn open(&self, path: &Path) -> Result<StationLineIter> {
        let file = File::open(path)?;
        Ok(StationLineIter {
            lines: BufReader::new(file).lines(),
            line_number: 0,
        })
    }

    /// Classify one inventory line. `Ok(None)` drops non-US stations
    /// silently; `Err` marks a malformed line (too few fields, non-numeric
    /// coordinates, bad state code).
    pub fn parse_station_line(&self, line: &str) -> Result<Option<StationRecord>> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < MIN_STATION_COLUMNS {
            return Err(LoadError::InvalidFormat(format!(
                "insufficient fields ({} of {} required)",
                parts.len(),
                MIN_STATION_COLUMNS
            )));
        }

        let station_id = parts[0];
        if !is_us_station(station_id) {
            return Ok(None);
        }

        let latitude = parse_coordinate(parts[1], "latitude")?;
        let longitude = parse_coordinate(parts[2], "longitude")?;
        let elevation = parse_coordinate(parts[3], "elevation")?;

        let state = parts[4];
        if state.len() != 2 {
            return Err(LoadError::InvalidFormat(format!(
                "invalid state code '{}'",
                state
            )));
        }

        let (location_description, distance, direction) = self.parse_location(&parts[5..]);

        Ok(Some(StationRecord {
            station_id: station_id.to_string(),
            latitude,
            longitude,
            elevation,
            state: state.to_string(),
            location_description,
            distance,
            direction,
        }))
    }

    /// Split a trailing "<distance> <direction>" pair off the location
    /// tokens when one is present (e.g. "BOYNTON BEACH 3.2 SSW").
    fn parse_location(&self, tokens: &[&str]) -> (String, Option<f64>, Option<String>) {
        if tokens.len() >= 2 {
            let distance_token = tokens[tokens.len() - 2];
            let direction_token = tokens[tokens.len() - 1];

            if self.distance_pattern.is_match(distance_token)
                && self.direction_pattern.is_match(direction_token)
            {
                let location = truncate_location(tokens[..tokens.len() - 2].join(" "));
                return (
                    location,
                    distance_token.parse::<f64>().ok(),
                    Some(direction_token.to_string()),
                );
            }
        }

        (truncate_location(tokens.join(" ")), None, None)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp the location text to the storage column width
fn truncate_location(mut location: String) -> String {
    if location.len() > MAX_LOCATION_LENGTH {
        let mut end = MAX_LOCATION_LENGTH;
        while !location.is_char_boundary(end) {
            end -= 1;
        }
        location.truncate(end);
    }
    location
}

/// Iterator over non-blank inventory lines with their 1-based line numbers
pub struct StationLineIter {
    lines: std::io::Lines<BufReader<File>>,
    line_number: u64,
}

impl Iterator for StationLineIter {
    type Item = Result<(u64, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    self.line_number += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok((self.line_number, line)));
                }
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

fn parse_coordinate(raw: &str, field: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| LoadError::InvalidFormat(format!("invalid {} '{}'", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_station_line_with_bearing() {
        let reader = StationReader::new();

        let line = "US1FLPB0002  26.4876  -80.0856    4.6 FL BOYNTON BEACH 3.2 SSW";
        let station = reader.parse_station_line(line).unwrap().unwrap();

        assert_eq!(station.station_id, "US1FLPB0002");
        assert!((station.latitude - 26.4876).abs() < 1e-9);
        assert!((station.longitude - -80.0856).abs() < 1e-9);
        assert!((station.elevation - 4.6).abs() < 1e-9);
        assert_eq!(station.state, "FL");
        assert_eq!(station.location_description, "BOYNTON BEACH");
        assert_eq!(station.distance, Some(3.2));
        assert_eq!(station.direction, Some("SSW".to_string()));
    }

    #[test]
    fn test_parse_station_line_without_bearing() {
        let reader = StationReader::new();

        let line = "USW00094728  40.7789  -73.9692   39.6 NY NEW YORK CNTRL PK TWR";
        let station = reader.parse_station_line(line).unwrap().unwrap();

        assert_eq!(station.station_id, "USW00094728");
        assert_eq!(station.state, "NY");
        assert_eq!(station.location_description, "NEW YORK CNTRL PK TWR");
        assert_eq!(station.distance, None);
        assert_eq!(station.direction, None);
    }

    #[test]
    fn test_line_ending_at_state_has_empty_location() {
        let reader = StationReader::new();

        let line = "US1FLPB0099  26.5287  -80.0963    3.0 FL";
        let station = reader.parse_station_line(line).unwrap().unwrap();

        assert_eq!(station.station_id, "US1FLPB0099");
        assert_eq!(station.state, "FL");
        assert_eq!(station.location_description, "");
        assert_eq!(station.distance, None);
        assert_eq!(station.direction, None);
    }

    #[test]
    fn test_non_us_station_is_dropped_silently() {
        let reader = StationReader::new();

        let line = "CA002100805  68.3167 -133.5333   26.8 NT INUVIK CLIMATE";
        assert_eq!(reader.parse_station_line(line).unwrap(), None);
    }

    #[test]
    fn test_short_line_is_an_error() {
        let reader = StationReader::new();

        let err = reader
            .parse_station_line("US1FLPB0002  26.4876  -80.0856")
            .unwrap_err();
        assert!(err.to_string().contains("insufficient fields"));
    }

    #[test]
    fn test_bad_coordinate_is_an_error() {
        let reader = StationReader::new();

        let line = "US1FLPB0002  north  -80.0856    4.6 FL BOYNTON BEACH";
        let err = reader.parse_station_line(line).unwrap_err();
        assert!(err.to_string().contains("invalid latitude"));
    }

    #[test]
    fn test_bad_state_code_is_an_error() {
        let reader = StationReader::new();

        let line = "US1FLPB0002  26.4876  -80.0856    4.6 FLA BOYNTON BEACH";
        let err = reader.parse_station_line(line).unwrap_err();
        assert!(err.to_string().contains("invalid state code"));
    }

    #[test]
    fn test_numeric_tail_without_direction_stays_in_location() {
        let reader = StationReader::new();

        let line = "US1TXTR0012  32.7554  -97.3307  184.0 TX FORT WORTH 7";
        let station = reader.parse_station_line(line).unwrap().unwrap();

        assert_eq!(station.location_description, "FORT WORTH 7");
        assert_eq!(station.distance, None);
        assert_eq!(station.direction, None);
    }

    #[test]
    fn test_location_is_truncated_to_column_width() {
        let reader = StationReader::new();

        let long_name = "A".repeat(140);
        let line = format!("US1FLPB0002  26.4876  -80.0856 4.6 FL {}", long_name);
        let station = reader.parse_station_line(&line).unwrap().unwrap();

        assert_eq!(station.location_description.len(), MAX_LOCATION_LENGTH);
    }

    #[test]
    fn test_open_skips_blank_lines_and_numbers_by_physical_line() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "US1FLPB0002  26.4876  -80.0856 4.6 FL BOYNTON BEACH 3.2 SSW")
            .unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "USW00094728  40.7789  -73.9692 39.6 NY NEW YORK CNTRL PK TWR")
            .unwrap();

        let reader = StationReader::new();
        let lines: Vec<(u64, String)> = reader
            .open(temp_file.path())
            .expect("Failed to open fixture")
            .map(|item| item.expect("line should read"))
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, 1);
        assert_eq!(lines[1].0, 3);
    }
}
