// crates/hwstage/src/prefix.rs

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hw_project::PREFIX_FILENAME;

use crate::StageError;

/// Resolves the staging prefix for `stage_dir`.
///
/// An explicit prefix is always accepted and saved to `<stage_dir>/.prefix`
/// (creating `stage_dir` if needed), replacing whatever was saved before.
/// Without one, the saved prefix is used. Nothing is written on that path, so
/// a missing `.prefix` leaves the staging directory untouched.
///
/// The resolved prefix must be non-empty.
pub fn resolve_prefix(stage_dir: &Path, explicit: Option<&str>) -> Result<String, StageError> {
    let marker = stage_dir.join(PREFIX_FILENAME);
    let prefix = match explicit {
        Some(prefix) => {
            fs::create_dir_all(stage_dir).map_err(|source| StageError::Io {
                action: "failed to create",
                path: stage_dir.to_path_buf(),
                source,
            })?;
            fs::write(&marker, format!("{}\n", prefix)).map_err(|source| StageError::Io {
                action: "failed to write",
                path: marker.clone(),
                source,
            })?;
            tracing::debug!("saved prefix {:?} to {}", prefix, marker.display());
            prefix.to_string()
        }
        None => match fs::read_to_string(&marker) {
            Ok(saved) => {
                let prefix = saved.trim_end_matches(['\n', '\r']).to_string();
                tracing::debug!("using saved prefix {:?} from {}", prefix, marker.display());
                prefix
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StageError::PrefixNotDefined { marker });
            }
            Err(source) => {
                return Err(StageError::Io {
                    action: "failed to read",
                    path: marker,
                    source,
                });
            }
        },
    };

    if prefix.is_empty() {
        return Err(StageError::EmptyPrefix);
    }
    Ok(prefix)
}
