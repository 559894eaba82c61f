/// Counters for one loaded file (or a whole run, via `merge`)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Rows that passed the filter and row validation
    pub accepted: usize,
    /// Rows dropped by the US-station filter
    pub filtered: usize,
    /// Rows skipped for format errors
    pub malformed: usize,
    /// Rows reaching storage across committed batches
    pub committed: u64,
    /// Batches attempted
    pub batches: usize,
    /// Batches rolled back on storage errors
    pub failed_batches: usize,
}

impl LoadReport {
    pub fn merge(&mut self, other: &LoadReport) {
        self.accepted += other.accepted;
        self.filtered += other.filtered;
        self.malformed += other.malformed;
        self.committed += other.committed;
        self.batches += other.batches;
        self.failed_batches += other.failed_batches;
    }

    pub fn summary(&self) -> String {
        format!(
            "Load Summary:\n\
            - Accepted rows: {}\n\
            - Filtered (non-US): {}\n\
            - Malformed rows: {}\n\
            - Committed rows: {}\n\
            - Batches: {} ({} failed)",
            self.accepted,
            self.filtered,
            self.malformed,
            self.committed,
            self.batches,
            self.failed_batches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_all_counters() {
        let mut total = LoadReport {
            accepted: 10,
            filtered: 2,
            malformed: 1,
            committed: 10,
            batches: 2,
            failed_batches: 0,
        };
        let other = LoadReport {
            accepted: 5,
            filtered: 0,
            malformed: 3,
            committed: 4,
            batches: 1,
            failed_batches: 1,
        };

        total.merge(&other);

        assert_eq!(total.accepted, 15);
        assert_eq!(total.filtered, 2);
        assert_eq!(total.malformed, 4);
        assert_eq!(total.committed, 14);
        assert_eq!(total.batches, 3);
        assert_eq!(total.failed_batches, 1);
    }

    #[test]
    fn test_summary_reports_counters() {
        let report = LoadReport {
            accepted: 7,
            filtered: 3,
            malformed: 1,
            committed: 7,
            batches: 1,
            failed_batches: 0,
        };

        let summary = report.summary();
        assert!(summary.contains("Accepted rows: 7"));
        assert!(summary.contains("Filtered (non-US): 3"));
        assert!(summary.contains("Committed rows: 7"));
        assert!(summary.contains("Batches: 1 (0 failed)"));
    }
}
