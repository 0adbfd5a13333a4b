// crates/hwstage/src/scan.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::StageError;

/// Question directories are the entries whose name starts with this tag.
pub const QUESTION_DIR_TAG: &str = "q";

/// The one source file staged from each question directory.
pub const SOURCE_FILENAME: &str = "main.cpp";

/// A question directory that contains `.nostage` is left out of staging.
pub const NOSTAGE_FILENAME: &str = ".nostage";

/// A question directory that is ready to be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSource {
    /// Base name of the question directory, e.g. `q1`.
    pub name: String,
    /// Path to its `main.cpp`.
    pub source: PathBuf,
}

/// Lists the stageable question directories directly under `work_dir`, sorted by name.
///
/// Matching plain files are skipped silently. Anything else that is not a
/// directory (a dangling symlink, a socket) and directories without
/// `main.cpp` are skipped with a warning.
pub fn find_question_sources(work_dir: &Path) -> Result<Vec<QuestionSource>, StageError> {
    let read_dir = fs::read_dir(work_dir).map_err(|source| StageError::Io {
        action: "failed to list",
        path: work_dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| StageError::Io {
            action: "failed to list",
            path: work_dir.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            if file_name.to_string_lossy().starts_with(QUESTION_DIR_TAG) {
                tracing::warn!("skipping {:?}: name is not valid UTF-8", file_name);
            }
            continue;
        };
        if name.starts_with(QUESTION_DIR_TAG) {
            candidates.push((name.to_string(), entry.path()));
        }
    }
    candidates.sort();

    let mut sources = Vec::new();
    for (name, path) in candidates {
        // `is_file`/`is_dir` follow symlinks, so a dangling link is neither.
        if path.is_file() {
            continue;
        }
        if !path.is_dir() {
            tracing::warn!("skipping {}: not a directory", name);
            continue;
        }
        if path.join(NOSTAGE_FILENAME).exists() {
            tracing::info!("skipping {}: {} present", name, NOSTAGE_FILENAME);
            continue;
        }
        let source = path.join(SOURCE_FILENAME);
        if !source.is_file() {
            tracing::warn!("skipping {}: no {} found", name, SOURCE_FILENAME);
            continue;
        }
        sources.push(QuestionSource { name, source });
    }
    tracing::debug!("{} question directories to stage", sources.len());
    Ok(sources)
}
