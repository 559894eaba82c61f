use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;
use postgres::types::ToSql;
use postgres::Client;
use tracing::error;

use crate::db::report::LoadReport;
use crate::error::{LoadError, Result};
use crate::models::ObservationRecord;
use crate::readers::open_observation_file;
use crate::utils::ProgressReporter;

pub struct ObservationLoader {
    batch_size: usize,
}

impl ObservationLoader {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Load one compressed observation file, upserting accepted rows in
    /// batches of the configured size. Malformed rows and failed batches are
    /// logged and contained; only stream-level failures abort the file.
    pub fn load_file(
        &self,
        client: &mut Client,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<LoadReport> {
        let file_name = path.display().to_string();
        let records = open_observation_file(path)?;
        self.load_records(records, &file_name, progress, |rows| {
            upsert_batch(client, rows)
        })
    }

    /// Batching loop behind `load_file`: accepted rows accumulate until
    /// `batch_size`, and each full batch plus the final remainder goes to
    /// `store` after last-wins dedup.
    fn load_records<I, F>(
        &self,
        records: I,
        file_name: &str,
        progress: Option<&ProgressReporter>,
        mut store: F,
    ) -> Result<LoadReport>
    where
        I: IntoIterator<Item = Result<(u64, StringRecord)>>,
        F: FnMut(&[&ObservationRecord]) -> Result<u64>,
    {
        let mut report = LoadReport::default();
        let mut batch: Vec<ObservationRecord> = Vec::with_capacity(self.batch_size);

        for item in records {
            let (line, record) = match item {
                Ok(pair) => pair,
                Err(LoadError::Csv(err)) if is_row_level(&err) => {
                    error!("{}: unreadable row skipped: {}", file_name, err);
                    report.malformed += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            match ObservationRecord::from_record(&record) {
                Ok(Some(observation)) => {
                    batch.push(observation);
                    report.accepted += 1;
                    if batch.len() >= self.batch_size {
                        flush(&mut batch, &mut report, &mut store);
                        if let Some(progress) = progress {
                            progress.set_message(&format!(
                                "{}: {} rows committed",
                                file_name, report.committed
                            ));
                        }
                    }
                }
                Ok(None) => report.filtered += 1,
                Err(err) => {
                    error!("{} line {}: {} in row {:?}", file_name, line, err, record);
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

/// Hand the buffered rows to the store as one batch; a storage error rolls
/// the batch back and the run moves on. The buffer is cleared either way.
fn flush<F>(batch: &mut Vec<ObservationRecord>, report: &mut LoadReport, store: &mut F)
where
    F: FnMut(&[&ObservationRecord]) -> Result<u64>,
{
    report.batches += 1;
    let rows = dedup_last_wins(batch);
    match store(&rows) {
        Ok(count) => report.committed += count,
        Err(err) => {
            error!("batch of {} rows rolled back: {}", rows.len(), err);
            report.failed_batches += 1;
        }
    }
    batch.clear();
}

/// A record-level CSV error (bad UTF-8 in one row) is skippable; anything
/// else means the stream itself is broken.
fn is_row_level(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Utf8 { .. })
}

/// Collapse rows sharing the uniqueness key, keeping the last row's values in
/// the first occurrence's position. A multi-row ON CONFLICT DO UPDATE cannot
/// touch the same key twice in one statement.
fn dedup_last_wins(batch: &[ObservationRecord]) -> Vec<&ObservationRecord> {
    let mut index: HashMap<(&str, &str, &str), usize> = HashMap::with_capacity(batch.len());
    let mut rows: Vec<&ObservationRecord> = Vec::with_capacity(batch.len());

    for observation in batch {
        let key = (
            observation.station_id.as_str(),
            observation.observation_date.as_str(),
            observation.observation_type.as_str(),
        );
        match index.entry(key) {
            Entry::Occupied(entry) => rows[*entry.get()] = observation,
            Entry::Vacant(entry) => {
                entry.insert(rows.len());
                rows.push(observation);
            }
        }
    }

    rows
}

fn upsert_batch(client: &mut Client, rows: &[&ObservationRecord]) -> Result<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let statement = build_upsert_statement(rows.len());
    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(rows.len() * 6);
    for observation in rows {
        params.push(&observation.station_id);
        params.push(&observation.observation_date);
        params.push(&observation.observation_type);
        params.push(&observation.value);
        params.push(&observation.flag);
        params.push(&observation.time_of_observation);
    }

    let mut transaction = client.transaction()?;
    let count = transaction.execute(statement.as_str(), &params)?;
    transaction.commit()?;
    Ok(count)
}

/// One INSERT carrying every buffered row. Dates bind as text and are cast
/// by the server, so a malformed date fails the batch, not the row.
fn build_upsert_statement(rows: usize) -> String {
    let mut sql = String::from(
        "INSERT INTO weather_observations \
         (station_id, observation_date, observation_type, value, flag, time_of_observation) \
         VALUES ",
    );

    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        let base = row * 6;
        sql.push_str(&format!(
            "(${}, ${}::text::date, ${}, ${}, ${}, ${})",
            base + 1,
            base + 2,
            base + 3,
            base + 4,
            base + 5,
            base + 6
        ));
    }

    sql.push_str(
        " ON CONFLICT (station_id, observation_date, observation_type) \
         DO UPDATE SET value = EXCLUDED.value, flag = EXCLUDED.flag, \
         time_of_observation = EXCLUDED.time_of_observation",
    );

    sql
}
