use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use postgres::types::ToSql;
use postgres::Client;
use tracing::error;

use crate::db::report::LoadReport;
use crate::error::Result;
use crate::models::StationRecord;
use crate::readers::StationReader;
use crate::utils::ProgressReporter;

pub struct StationLoader {
    reader: StationReader,
    batch_size: usize,
}

impl StationLoader {
    pub fn new(batch_size: usize) -> Self {
        Self {
            reader: StationReader::new(),
            batch_size,
        }
    }

    /// Load the fixed-width station metadata file, upserting US stations in
    /// batches of the configured size.
    pub fn load_file(
        &self,
        client: &mut Client,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<LoadReport> {
        let file_name = path.display().to_string();
        let lines = self.reader.open(path)?;
        self.load_lines(lines, &file_name, progress, |rows| upsert_batch(client, rows))
    }

    /// Batching loop behind `load_file`, with the same boundary rules as the
    /// observation loader: full batches and the final remainder go to `store`
    /// after last-wins dedup.
    fn load_lines<I, F>(
        &self,
        lines: I,
        file_name: &str,
        progress: Option<&ProgressReporter>,
        mut store: F,
    ) -> Result<LoadReport>
    where
        I: IntoIterator<Item = Result<(u64, String)>>,
        F: FnMut(&[&StationRecord]) -> Result<u64>,
    {
        let mut report = LoadReport::default();
        let mut batch: Vec<StationRecord> = Vec::with_capacity(self.batch_size);

        for item in lines {
            let (line, text) = item?;
            match self.reader.parse_station_line(&text) {
                Ok(Some(station)) => {
                    batch.push(station);
                    report.accepted += 1;
                    if batch.len() >= self.batch_size {
                        flush(&mut batch, &mut report, &mut store);
                        if let Some(progress) = progress {
                            progress.set_message(&format!(
                                "{}: {} stations committed",
                                file_name, report.committed
                            ));
                        }
                    }
                }
                Ok(None) => report.filtered += 1,
                Err(err) => {
                    error!("{} line {}: {} in line {:?}", file_name, line, err, text);
                    report.malformed += 1;
                }
            }
        }

        if !batch.is_empty() {
            flush(&mut batch, &mut report, &mut store);
        }

        Ok(report)
    }
}

fn flush<F>(batch: &mut Vec<StationRecord>, report: &mut LoadReport, store: &mut F)
where
    F: FnMut(&[&StationRecord]) -> Result<u64>,
{
    report.batches += 1;
    let rows = dedup_last_wins(batch);
    match store(&rows) {
        Ok(count) => report.committed += count,
        Err(err) => {
            error!("batch of {} stations rolled back: {}", rows.len(), err);
            report.failed_batches += 1;
        }
    }
    batch.clear();
}

/// Repeated station identifiers collapse to the last line seen, since one
/// statement cannot update the same key twice.
fn dedup_last_wins(batch: &[StationRecord]) -> Vec<&StationRecord> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(batch.len());
    let mut rows: Vec<&StationRecord> = Vec::with_capacity(batch.len());

    for station in batch {
        match index.entry(station.station_id.as_str()) {
            Entry::Occupied(entry) => rows[*entry.get()] = station,
            Entry::Vacant(entry) => {
                entry.insert(rows.len());
                rows.push(station);
            }
        }
    }

    rows
}

fn upsert_batch(client: &mut Client, rows: &[&StationRecord]) -> Result<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let statement = build_upsert_statement(rows.len());
    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(rows.len() * 8);
    for station in rows {
        params.push(&station.station_id);
        params.push(&station.latitude);
        params.push(&station.longitude);
        params.push(&station.elevation);
        params.push(&station.state);
        params.push(&station.location_description);
        params.push(&station.distance);
        params.push(&station.direction);
    }

    let mut transaction = client.transaction()?;
    let count = transaction.execute(statement.as_str(), &params)?;
    transaction.commit()?;
    Ok(count)
}

fn build_upsert_statement(rows: usize) -> String {
    let mut sql = String::from(
        "INSERT INTO weather_stations \
         (station_id, latitude, longitude, elevation, state, location_description, distance, direction) \
         VALUES ",
    );

    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        let base = row * 8;
        sql.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${}, ${})",
            base + 1,
            base + 2,
            base + 3,
            base + 4,
            base + 5,
            base + 6,
            base + 7,
            base + 8
        ));
    }

    sql.push_str(
        " ON CONFLICT (station_id) \
         DO UPDATE SET latitude = EXCLUDED.latitude, longitude = EXCLUDED.longitude, \
         elevation = EXCLUDED.elevation, state = EXCLUDED.state, \
         location_description = EXCLUDED.location_description, \
         distance = EXCLUDED.distance, direction = EXCLUDED.direction",
    );

    sql
}
