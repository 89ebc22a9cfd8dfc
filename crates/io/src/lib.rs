//! # tempest-io
//!
//! File formats at the edge of the weather generator: basin parameter sets
//! read from TOML and simulated realisations written to Parquet.
//!
//! | Module | Role |
//! |--------|------|
//! | `repository` | [`TomlRepository`], a [`tempest_params::ParameterRepository`] over `<dir>/<basin>.toml` |
//! | `writer` | [`write_parquet`] with [`WriterConfig`] and optional [`PetColumns`] |

mod basin;
mod error;
mod parquet_write;
mod repository;
mod writer;

pub use error::IoError;
pub use repository::{TomlRepository, read_parameters, write_parameters};
pub use writer::{Compression, PetColumns, WriterConfig, write_parquet};
