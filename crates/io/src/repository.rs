//! Directory of per-basin TOML parameter files.

use std::path::{Path, PathBuf};

use tempest_params::{ParameterRepository, ParameterSet, ParamsError};
use tracing::debug;

use crate::basin::BasinFile;
use crate::error::IoError;

/// Loads `<dir>/<basin>.toml` on demand.
#[derive(Debug, Clone)]
pub struct TomlRepository {
    dir: PathBuf,
}

impl TomlRepository {
    /// Creates a repository rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory searched for parameter files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path that holds `basin`.
    pub fn path_for(&self, basin: &str) -> PathBuf {
        self.dir.join(format!("{basin}.toml"))
    }

    /// Loads `basin`, keeping file-level error detail.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if the file is missing,
    /// [`IoError::Toml`] if it does not parse, or [`IoError::Parameters`]
    /// if the values violate a model invariant.
    pub fn read(&self, basin: &str) -> Result<ParameterSet, IoError> {
        read_parameters(&self.path_for(basin), basin)
    }

    /// Writes `set` to `<dir>/<basin>.toml`, returning the path.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::File`] if the file cannot be written.
    pub fn write(&self, set: &ParameterSet) -> Result<PathBuf, IoError> {
        let path = self.path_for(set.basin());
        write_parameters(&path, set)?;
        Ok(path)
    }
}

impl ParameterRepository for TomlRepository {
    fn load(&self, basin: &str) -> Result<ParameterSet, ParamsError> {
        self.read(basin).map_err(|e| match e {
            IoError::FileNotFound { .. } => ParamsError::UnknownBasin {
                basin: basin.to_string(),
            },
            other => ParamsError::Repository {
                basin: basin.to_string(),
                reason: other.to_string(),
            },
        })
    }
}

/// Reads one basin parameter file.
///
/// # Errors
///
/// See [`TomlRepository::read`].
pub fn read_parameters(path: &Path, basin: &str) -> Result<ParameterSet, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let file: BasinFile = toml::from_str(&text).map_err(|e| IoError::Toml {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let set = file
        .into_parameter_set(basin)
        .map_err(|e| IoError::Parameters {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!(basin, path = %path.display(), events = set.events().len(), "loaded parameters");
    Ok(set)
}

/// Serializes `set` as a basin parameter file at `path`.
///
/// Caps, `A` and `B` are written explicitly so the file reloads to the same
/// set.
///
/// # Errors
///
/// Returns [`IoError::Toml`] if serialization fails or [`IoError::File`] if
/// the file cannot be written.
pub fn write_parameters(path: &Path, set: &ParameterSet) -> Result<(), IoError> {
    let text = toml::to_string(&BasinFile::from_parameter_set(set)).map_err(|e| IoError::Toml {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(path, text).map_err(|e| IoError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
