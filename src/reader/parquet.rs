//! Parquet stays
//!
//! Identifier and ward columns may be string or integer typed. Date columns may
//! be `Date32`, `Date64` or strings parsed with the configured date formats.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Int32Type, Int64Type, Schema, UInt32Type, UInt64Type,
};
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::MetricsConfig;
use crate::error::{MetricsError, Result};
use crate::reader::{LoadedStays, RawDate, StayCollector, build_stay};
use crate::schema::StayColumnIndex;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

fn is_text_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Utf8View
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn is_date_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32 | DataType::Date64 | DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

/// Check the resolved columns have types this reader understands
fn check_column_types(schema: &Schema, index: &StayColumnIndex) -> Result<()> {
    let checks = [
        (index.patient_id, is_text_type as fn(&DataType) -> bool),
        (index.ward, is_text_type),
        (index.admission_date, is_date_type),
        (index.discharge_date, is_date_type),
    ];
    for (idx, accepts) in checks {
        let field = schema.field(idx);
        if !accepts(field.data_type()) {
            return Err(ArrowError::SchemaError(format!(
                "Column '{}' has unsupported type {}",
                field.name(),
                field.data_type()
            ))
            .into());
        }
    }
    Ok(())
}

fn type_mismatch(data_type: &DataType) -> MetricsError {
    ArrowError::CastError(format!("Unexpected column type {data_type}")).into()
}

/// Text value of a cell, `None` for nulls
fn cell_text(array: &dyn Array, i: usize) -> Result<Option<String>> {
    if array.is_null(i) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Utf8 => array
            .as_string_opt::<i32>()
            .map(|a| a.value(i).to_string()),
        DataType::LargeUtf8 => array
            .as_string_opt::<i64>()
            .map(|a| a.value(i).to_string()),
        DataType::Utf8View => array.as_string_view_opt().map(|a| a.value(i).to_string()),
        DataType::Int32 => array
            .as_primitive_opt::<Int32Type>()
            .map(|a| a.value(i).to_string()),
        DataType::Int64 => array
            .as_primitive_opt::<Int64Type>()
            .map(|a| a.value(i).to_string()),
        DataType::UInt32 => array
            .as_primitive_opt::<UInt32Type>()
            .map(|a| a.value(i).to_string()),
        DataType::UInt64 => array
            .as_primitive_opt::<UInt64Type>()
            .map(|a| a.value(i).to_string()),
        other => return Err(type_mismatch(other)),
    };
    value.map(Some).ok_or_else(|| type_mismatch(array.data_type()))
}

/// Date value of a cell; typed dates are taken as is, text is parsed later
fn cell_date(array: &dyn Array, i: usize) -> Result<DateCell> {
    match array.data_type() {
        DataType::Date32 => {
            let dates = array
                .as_primitive_opt::<Date32Type>()
                .ok_or_else(|| type_mismatch(array.data_type()))?;
            Ok(DateCell::Date(if dates.is_null(i) {
                None
            } else {
                dates.value_as_date(i)
            }))
        }
        DataType::Date64 => {
            let dates = array
                .as_primitive_opt::<Date64Type>()
                .ok_or_else(|| type_mismatch(array.data_type()))?;
            Ok(DateCell::Date(if dates.is_null(i) {
                None
            } else {
                dates.value_as_date(i)
            }))
        }
        _ => Ok(DateCell::Text(cell_text(array, i)?)),
    }
}

/// Owned form of a date cell
enum DateCell {
    Date(Option<chrono::NaiveDate>),
    Text(Option<String>),
}

impl DateCell {
    fn as_raw(&self) -> RawDate<'_> {
        match self {
            DateCell::Date(date) => RawDate::Date(*date),
            DateCell::Text(text) => RawDate::Text(text.as_deref()),
        }
    }
}

/// Read stays from a Parquet file
pub fn read_stays_parquet(path: &Path, config: &MetricsConfig) -> Result<LoadedStays> {
    log_operation_start("Reading stays from", path);
    let start = Instant::now();

    let file = File::open(path).map_err(|e| MetricsError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let index = StayColumnIndex::resolve(
        schema.fields().iter().map(|f| f.name().as_str()),
        &config.columns,
    )?;
    check_column_types(&schema, &index)?;

    let reader = builder.with_batch_size(DEFAULT_BATCH_SIZE).build()?;
    let mut collector = StayCollector::new(config.malformed_rows);
    let mut row = 0;

    for batch in reader {
        let batch = batch?;
        let patient_ids = batch.column(index.patient_id).as_ref();
        let wards = batch.column(index.ward).as_ref();
        let admissions = batch.column(index.admission_date).as_ref();
        let discharges = batch.column(index.discharge_date).as_ref();

        for i in 0..batch.num_rows() {
            row += 1;
            let patient_id = cell_text(patient_ids, i)?;
            let ward = cell_text(wards, i)?;
            let admission = cell_date(admissions, i)?;
            let discharge = cell_date(discharges, i)?;

            let stay = build_stay(
                row,
                patient_id.as_deref(),
                ward.as_deref(),
                admission.as_raw(),
                discharge.as_raw(),
                config,
            );
            collector.push(row, stay)?;
        }
    }

    let loaded = collector.finish();
    log_operation_complete("read", path, loaded.records.len(), Some(start.elapsed()));
    Ok(loaded)
}
