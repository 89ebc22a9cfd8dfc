//! Parquet output of simulated realisations.

use std::path::Path;

use parquet::file::properties::WriterProperties;
use tempest_engine::Realisation;
use tracing::debug;

use crate::error::IoError;
use crate::parquet_write;

/// Column-chunk codec of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed pages.
    None,
    /// Snappy, the default.
    #[default]
    Snappy,
    /// Zstd at level 3; smaller files for long ensembles.
    Zstd,
}

impl Compression {
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level = parquet::basic::ZstdLevel::try_new(3)?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing simulated weather to Parquet.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    compression: Compression,
    /// Row-group size cap.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Chooses the codec.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Caps the number of rows per row group.
    pub fn with_row_group_size(mut self, rows: usize) -> Self {
        self.row_group_size = rows;
        self
    }

    // --- Accessors ---

    /// Returns the compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Returns the maximum number of rows per row group.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Checks the settings before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for a zero row-group size.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Reference evapotranspiration and deficit series for one realisation.
#[derive(Debug, Clone, PartialEq)]
pub struct PetColumns {
    eto: Vec<f64>,
    deficit: Vec<f64>,
}

impl PetColumns {
    /// Pairs an ETo series with its deficit series.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the two series differ in length.
    pub fn new(eto: Vec<f64>, deficit: Vec<f64>) -> Result<Self, IoError> {
        if eto.len() != deficit.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "eto has {} values but deficit has {}",
                    eto.len(),
                    deficit.len()
                ),
            });
        }
        Ok(Self { eto, deficit })
    }

    /// Returns the ETo series (mm/day).
    pub fn eto(&self) -> &[f64] {
        &self.eto
    }

    /// Returns the deficit series (mm/day).
    pub fn deficit(&self) -> &[f64] {
        &self.deficit
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.eto.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.eto.is_empty()
    }
}

/// Writes simulated realisations to a Parquet file.
///
/// Each realisation becomes one record batch, one row per simulated day.
/// When `pet` is given it must hold one entry per realisation, each as long
/// as its realisation.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration or the PET columns
/// are invalid, [`IoError::File`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch conversion or writing fails.
pub fn write_parquet(
    path: &Path,
    realisations: &[Realisation],
    pet: Option<&[PetColumns]>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    if let Some(pet) = pet {
        check_pet_shape(realisations, pet)?;
    }

    let schema = parquet_write::build_schema(pet.is_some());

    let props = WriterProperties::builder()
        .set_compression(config.compression.to_parquet()?)
        .set_max_row_group_size(config.row_group_size)
        .build();

    let batches: Vec<_> = realisations
        .iter()
        .enumerate()
        .map(|(i, r)| {
            parquet_write::realisation_to_record_batch(r, pet.map(|p| &p[i]), &schema)
        })
        .collect::<Result<Vec<_>, _>>()?;

    parquet_write::write_batches(path, &batches, &schema, props)?;

    debug!(
        path = %path.display(),
        realisations = realisations.len(),
        pet = pet.is_some(),
        "wrote parquet output"
    );
    Ok(())
}

fn check_pet_shape(realisations: &[Realisation], pet: &[PetColumns]) -> Result<(), IoError> {
    let mut problems = Vec::new();
    if pet.len() != realisations.len() {
        problems.push(format!(
            "{} pet entries for {} realisations",
            pet.len(),
            realisations.len()
        ));
    }
    for (r, p) in realisations.iter().zip(pet) {
        if r.n_days() != p.len() {
            problems.push(format!(
                "realisation {} has {} days but {} pet values",
                r.member(),
                r.n_days(),
                p.len()
            ));
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}
