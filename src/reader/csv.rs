//! Delimited text stays
//!
//! Rows with the wrong number of fields or invalid UTF-8 are row errors and
//! follow the malformed row policy. IO failures always abort the load.

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::config::MetricsConfig;
use crate::error::{MetricsError, Result};
use crate::models::StayRecord;
use crate::reader::{LoadedStays, RawDate, StayCollector, build_stay};
use crate::schema::StayColumnIndex;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Whether a CSV error concerns a single record rather than the stream
fn is_record_error(err: &csv::Error) -> bool {
    !matches!(err.kind(), csv::ErrorKind::Io(_))
}

/// Read stays from a delimited text file with a header row
pub fn read_stays_csv(path: &Path, config: &MetricsConfig) -> Result<LoadedStays> {
    log_operation_start("Reading stays from", path);
    let start = Instant::now();

    let file = File::open(path).map_err(|e| MetricsError::io(path, e))?;
    let loaded = read_stays_from_reader(file, config)?;

    log_operation_complete("read", path, loaded.records.len(), Some(start.elapsed()));
    Ok(loaded)
}

/// Read stays from any delimited text source with a header row
pub fn read_stays_from_reader<R: io::Read>(reader: R, config: &MetricsConfig) -> Result<LoadedStays> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = StayColumnIndex::resolve(headers.iter(), &config.columns)?;
    let mut collector = StayCollector::new(config.malformed_rows);

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let stay = match result {
            Ok(record) => build_stay(
                row,
                record.get(index.patient_id),
                record.get(index.ward),
                RawDate::Text(record.get(index.admission_date)),
                RawDate::Text(record.get(index.discharge_date)),
                config,
            ),
            Err(err) if is_record_error(&err) => Err(MetricsError::Csv(err)),
            Err(err) => return Err(err.into()),
        };
        collector.push(row, stay)?;
    }

    Ok(collector.finish())
}

/// Write stays as CSV with ISO dates
pub fn write_stays_csv(path: &Path, records: &[StayRecord], delimiter: u8) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    writer.write_record(["patient_id", "ward", "admission_date", "discharge_date"])?;
    for stay in records {
        let admission = stay.admission_date.format("%Y-%m-%d").to_string();
        let discharge = stay.discharge_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            stay.patient_id.as_str(),
            stay.ward.as_str(),
            admission.as_str(),
            discharge.as_str(),
        ])?;
    }
    writer.flush().map_err(|e| MetricsError::io(path, e))?;
    Ok(())
}
