//! Shared synchronous JSON file persistence.
//!
//! Both stores follow the same discipline: load once at open, write the
//! whole document after every mutation. A load failure of any kind degrades
//! to the default value with a warning so startup is never blocked; a write
//! failure is reported to the caller, who keeps the in-memory state.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreError;

/// Read and parse a JSON file, falling back to `T::default()` when the file
/// is absent or malformed. Malformed content is logged, not propagated.
pub(crate) fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read store file; starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed store file; starting empty");
            T::default()
        }
    }
}

/// Serialize `value` and write it to `path`, creating parent directories as
/// needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Persistence {
            path: path.to_owned(),
            source,
        })?;
    }

    let contents = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_owned(),
        source,
    })?;

    std::fs::write(path, contents).map_err(|source| StoreError::Persistence {
        path: path.to_owned(),
        source,
    })
}
