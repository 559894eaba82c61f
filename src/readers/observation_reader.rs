use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;

use crate::error::Result;

/// Open a gzip-compressed CSV observation file and stream its records
/// together with their 1-based line numbers.
///
/// Archives may hold several concatenated gzip members; the decoder reads
/// through every member. Records are read headerless and with variable
/// field counts; column validation happens in
/// `ObservationRecord::from_record`.
pub fn open_observation_file(path: &Path) -> Result<RawRecordIter> {
    let file = File::open(path)?;
    let decoder = MultiGzDecoder::new(file);
    let records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoder)
        .into_records();

    Ok(RawRecordIter { records })
}

pub struct RawRecordIter {
    records: csv::StringRecordsIntoIter<MultiGzDecoder<File>>,
}

impl Iterator for RawRecordIter {
    type Item = Result<(u64, StringRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                Some(Ok((line, record)))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}
