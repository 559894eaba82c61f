use std::path::{Path, PathBuf};

use crate::utils::constants::{OBSERVATION_FILE_SUFFIX, STATIONS_FILE};

/// Check whether a path names a compressed observation file (*.csv.gz)
pub fn is_observation_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .map(|name| name.ends_with(OBSERVATION_FILE_SUFFIX))
        .unwrap_or(false)
}

/// Default station inventory path inside the data directory
pub fn default_stations_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STATIONS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_observation_file() {
        assert!(is_observation_file(Path::new("/data/2023.csv.gz")));
        assert!(is_observation_file(Path::new("2023.csv.gz")));

        assert!(!is_observation_file(Path::new("/data/2023.csv")));
        assert!(!is_observation_file(Path::new("/data/2023.gz")));
        assert!(!is_observation_file(Path::new("/data/ghcnd-stations.txt")));
        assert!(!is_observation_file(Path::new("/data")));
    }

    #[test]
    fn test_default_stations_path() {
        let path = default_stations_path(Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/ghcnd-stations.txt"));
    }
}
