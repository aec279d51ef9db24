//! Environment variable utilities for pdtune
//!
//! This module resolves the PDTUNE_DIR variable that points to the project
//! root, and the `data_generated/records` directory below it where tuning
//! histories are written.

use crate::constants::{DATA_GENERATED, PDTUNE_DIR_VAR, RECORDS};
use std::env;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "PDTUNE_DIR environment variable is not set. Please set it to the project root directory (e.g., export PDTUNE_DIR=/path/to/pdtune)"
    )]
    PdtuneDirNotSet,

    #[error("PDTUNE_DIR points to a non-existent directory: {0}")]
    PdtuneDirNotFound(PathBuf),

    #[error("Failed to create directory {0}: {1}")]
    DirCreationFailed(PathBuf, std::io::Error),
}

/// Validate a PDTUNE_DIR value
fn pdtune_dir_from(value: Option<String>) -> Result<PathBuf, EnvError> {
    let path = PathBuf::from(value.ok_or(EnvError::PdtuneDirNotSet)?);
    if !path.exists() {
        return Err(EnvError::PdtuneDirNotFound(path));
    }
    Ok(path)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(&path).map_err(|e| EnvError::DirCreationFailed(path.clone(), e))?;
    }
    Ok(path)
}

/// Get the PDTUNE_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - PDTUNE_DIR is not set
/// - PDTUNE_DIR points to a non-existent directory
pub fn get_pdtune_dir() -> Result<PathBuf, EnvError> {
    pdtune_dir_from(env::var(PDTUNE_DIR_VAR).ok())
}

/// `<root>/data_generated`, created if missing
fn data_generated_dir_in(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(root.join(DATA_GENERATED))
}

/// `<root>/data_generated/records`, created if missing
fn records_dir_in(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(data_generated_dir_in(root)?.join(RECORDS))
}

/// Get the path to the records subdirectory within data_generated
///
/// This is the default location for tuning history CSV files.
///
/// # Example
///
/// ```no_run
/// use pdtune_env::env_utils::get_records_dir;
///
/// let records = get_records_dir()?;
/// println!("Records directory: {}", records.display());
/// # Ok::<(), pdtune_env::env_utils::EnvError>(())
/// ```
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    records_dir_in(&get_pdtune_dir()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdtune_dir_not_set() {
        let result = pdtune_dir_from(None);
        assert!(matches!(result, Err(EnvError::PdtuneDirNotSet)));
    }

    #[test]
    fn test_pdtune_dir_nonexistent() {
        let result = pdtune_dir_from(Some("/this/path/should/not/exist".to_string()));
        assert!(matches!(result, Err(EnvError::PdtuneDirNotFound(_))));
    }

    #[test]
    fn test_records_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let root_str = root.path().to_string_lossy().to_string();
        let resolved = pdtune_dir_from(Some(root_str)).unwrap();

        let records = records_dir_in(&resolved).unwrap();
        assert!(records.is_dir());
        assert_eq!(records, root.path().join("data_generated").join("records"));

        // second call is a no-op
        assert_eq!(records_dir_in(&resolved).unwrap(), records);
    }
}
