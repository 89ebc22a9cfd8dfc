//! Integration tests: simulated realisations written to Parquet.

use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{Date32Type, Float64Type, UInt32Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempest_calendar::SimulationWindow;
use tempest_engine::{Realisation, SimulationConfig, Simulator};
use tempest_io::{Compression, IoError, PetColumns, WriterConfig, write_parquet};
use tempest_params::{
    Climatology, ClimatologyTable, CorrelationMatrices, DailyClimate, EventCatalog,
    ExtremeEventSpec, ParameterSet, frio,
};
use tempest_temperature::stationary_moments;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn flat(name: &str, tmax: f64, tmin: f64, spread: bool) -> ClimatologyTable {
    let rows = vec![DailyClimate::new(tmax, tmin, 0.5 * (tmax + tmin)); 366];
    if spread {
        ClimatologyTable::new_spread(name, rows).unwrap()
    } else {
        ClimatologyTable::new(name, rows).unwrap()
    }
}

fn params(events: EventCatalog) -> ParameterSet {
    let (a, b) = (frio::residual_a(), frio::residual_b());
    let (m0, m1) = stationary_moments(&a, &b).unwrap();
    frio::builder()
        .unwrap()
        .with_climatology(Climatology::new(
            flat("wet_mean", 24.0, 14.0, false),
            flat("wet_std", 4.0, 3.5, true),
            flat("dry_mean", 27.0, 13.0, false),
            flat("dry_std", 4.5, 4.0, true),
        ))
        .with_correlation(CorrelationMatrices::new(a, b, m0, m1).unwrap())
        .with_events(events)
        .build()
        .unwrap()
}

fn simulate(params: &ParameterSet, start: &str, end: &str, members: u32) -> Vec<Realisation> {
    let config = SimulationConfig::new(SimulationWindow::parse(start, end).unwrap()).with_seed(7);
    let sim = Simulator::new(params, &config).unwrap();
    (0..members).map(|m| sim.run_member(m).unwrap()).collect()
}

fn read_back(path: &Path) -> Vec<RecordBatch> {
    let file = std::fs::File::open(path).unwrap();
    ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn column_f64(batches: &[RecordBatch], name: &str) -> Vec<f64> {
    batches
        .iter()
        .flat_map(|b| {
            b.column_by_name(name)
                .unwrap()
                .as_primitive::<Float64Type>()
                .values()
                .to_vec()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn one_row_per_member_and_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.parquet");
    let p = params(frio::events().unwrap());
    let realisations = simulate(&p, "2024-01-01", "2024-03-31", 3);

    write_parquet(&path, &realisations, None, &WriterConfig::default()).unwrap();

    let batches = read_back(&path);
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 3 * 91);
    assert_eq!(batches[0].num_columns(), 11);

    let precip = column_f64(&batches, "precip");
    let expected: Vec<f64> = realisations.iter().flat_map(|r| r.precip()).collect();
    assert_eq!(precip, expected);

    let members: Vec<u32> = batches
        .iter()
        .flat_map(|b| {
            b.column_by_name("realisation")
                .unwrap()
                .as_primitive::<UInt32Type>()
                .values()
                .to_vec()
        })
        .collect();
    assert_eq!(members[0], 0);
    assert_eq!(members[rows - 1], 2);

    // 2024-01-01 is day 19723 since the Unix epoch.
    let dates = batches[0]
        .column_by_name("date")
        .unwrap()
        .as_primitive::<Date32Type>();
    assert_eq!(dates.value(0), 19_723);
    assert_eq!(dates.value(90), 19_723 + 90);
}

#[test]
fn event_columns_are_null_without_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiet.parquet");
    let p = params(EventCatalog::empty());
    let realisations = simulate(&p, "2024-01-01", "2024-12-31", 1);

    let config = WriterConfig::default().with_compression(Compression::Zstd);
    write_parquet(&path, &realisations, None, &config).unwrap();

    let batches = read_back(&path);
    let rp = batches[0].column_by_name("event_return_period").unwrap();
    assert_eq!(rp.null_count(), rp.len());
}

#[test]
fn frequent_events_are_labelled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.parquet");
    let catalog =
        EventCatalog::new(vec![ExtremeEventSpec::new("1-yr", 1, 40.0, 60.0).unwrap()]).unwrap();
    let p = params(catalog);
    let realisations = simulate(&p, "2000-01-01", "2019-12-31", 1);
    let labelled = realisations[0]
        .records()
        .iter()
        .filter(|r| r.event.is_some())
        .count();
    assert!(labelled > 0, "no events in 20 years of a 1-year recurrence");

    write_parquet(&path, &realisations, None, &WriterConfig::default()).unwrap();
    let batches = read_back(&path);
    let non_null: usize = batches
        .iter()
        .map(|b| {
            let c = b.column_by_name("event_return_period").unwrap();
            c.len() - c.null_count()
        })
        .sum();
    assert_eq!(non_null, labelled);
}

#[test]
fn pet_columns_appended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pet.parquet");
    let p = params(EventCatalog::empty());
    let realisations = simulate(&p, "2024-06-01", "2024-06-10", 1);
    let eto = vec![5.0; 10];
    let deficit: Vec<f64> = realisations[0].precip().iter().map(|p| p - 5.0).collect();
    let pet = [PetColumns::new(eto, deficit.clone()).unwrap()];

    write_parquet(&path, &realisations, Some(&pet), &WriterConfig::default()).unwrap();

    let batches = read_back(&path);
    assert_eq!(batches[0].num_columns(), 13);
    assert_eq!(column_f64(&batches, "eto"), vec![5.0; 10]);
    assert_eq!(column_f64(&batches, "deficit"), deficit);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn pet_shape_mismatch_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.parquet");
    let p = params(EventCatalog::empty());
    let realisations = simulate(&p, "2024-06-01", "2024-06-10", 2);
    let pet = [PetColumns::new(vec![1.0; 9], vec![0.0; 9]).unwrap()];

    let err = write_parquet(&path, &realisations, Some(&pet), &WriterConfig::default())
        .unwrap_err();
    match err {
        IoError::Validation { count, .. } => assert_eq!(count, 2),
        other => panic!("expected Validation error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn unwritable_path_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.parquet");
    let p = params(EventCatalog::empty());
    let realisations = simulate(&p, "2024-06-01", "2024-06-02", 1);
    let err = write_parquet(&path, &realisations, None, &WriterConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::File { .. }));
}
