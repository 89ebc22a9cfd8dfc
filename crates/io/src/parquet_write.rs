//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, RecordBatch, StringArray, UInt8Array,
    UInt16Array, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::Datelike;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use tempest_engine::Realisation;

use crate::error::IoError;
use crate::writer::PetColumns;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Builds the Arrow schema for simulated weather output.
///
/// `event` and `event_return_period` are null on days without an injected
/// extreme event. When `has_pet` is true, `eto` and `deficit` are appended.
pub(crate) fn build_schema(has_pet: bool) -> Schema {
    let mut fields = vec![
        Field::new("realisation", DataType::UInt32, false),
        Field::new("date", DataType::Date32, false),
        Field::new("month", DataType::UInt8, false),
        Field::new("day_of_year", DataType::UInt16, false),
        Field::new("wet", DataType::Boolean, false),
        Field::new("precip", DataType::Float64, false),
        Field::new("tmax", DataType::Float64, false),
        Field::new("tmin", DataType::Float64, false),
        Field::new("tave", DataType::Float64, false),
        Field::new("event", DataType::Utf8, true),
        Field::new("event_return_period", DataType::UInt32, true),
    ];

    if has_pet {
        fields.push(Field::new("eto", DataType::Float64, false));
        fields.push(Field::new("deficit", DataType::Float64, false));
    }

    Schema::new(fields)
}

pub(crate) fn date32(date: chrono::NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Converts one [`Realisation`] into an Arrow [`RecordBatch`].
///
/// The schema must come from [`build_schema`] with `has_pet` equal to
/// `pet.is_some()`.
pub(crate) fn realisation_to_record_batch(
    realisation: &Realisation,
    pet: Option<&PetColumns>,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let records = realisation.records();
    let n = records.len();

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(vec![realisation.member(); n])),
        Arc::new(Date32Array::from(
            records.iter().map(|r| date32(r.date)).collect::<Vec<_>>(),
        )),
        Arc::new(UInt8Array::from(
            records.iter().map(|r| r.month()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt16Array::from(
            records.iter().map(|r| r.doy().get()).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            records.iter().map(|r| r.is_wet()).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(realisation.precip())),
        Arc::new(Float64Array::from(realisation.tmax())),
        Arc::new(Float64Array::from(realisation.tmin())),
        Arc::new(Float64Array::from(realisation.tave())),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.event.as_ref().map(|e| e.name.as_str()))
                .collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            records
                .iter()
                .map(|r| r.event.as_ref().map(|e| e.return_period_years))
                .collect::<Vec<_>>(),
        )),
    ];

    if let Some(pet) = pet {
        columns.push(Arc::new(Float64Array::from(pet.eto().to_vec())));
        columns.push(Arc::new(Float64Array::from(pet.deficit().to_vec())));
    }

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::File`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
