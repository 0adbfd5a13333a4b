// crates/hwstage/src/lib.rs

//! Copies each question's `main.cpp` into a staging directory as
//! `<prefix><question>.cpp`, with cut-marker lines removed.

pub mod prefix;
pub mod scan;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cut_markers::strip_cut_markers;
use hw_project::{describe_path, PREFIX_FILENAME};
use thiserror::Error;

pub use prefix::resolve_prefix;
pub use scan::{find_question_sources, QuestionSource};

#[derive(Debug, Error)]
pub enum StageError {
    #[error("no prefix given and none saved in {}; run again with a prefix, e.g. `hwstage net1_hw4_`", marker.display())]
    PrefixNotDefined { marker: PathBuf },

    #[error("prefix is empty; run again with a non-empty prefix")]
    EmptyPrefix,

    #[error("zero files staged from {}", work_dir.display())]
    NothingStaged { work_dir: PathBuf },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

impl StageError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            StageError::NothingStaged { .. } => 2,
            _ => 1,
        }
    }
}

/// Inputs for one staging run.
#[derive(Clone, Debug)]
pub struct StageOptions {
    /// Directory scanned for question directories.
    pub work_dir: PathBuf,
    /// Destination of the staged files and the `.prefix` marker.
    pub stage_dir: PathBuf,
    /// Explicit prefix; `None` means use the saved one.
    pub prefix: Option<String>,
    /// Empty the staging directory (keeping `.prefix`) before copying.
    pub clean: bool,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    pub prefix: String,
    pub staged: Vec<PathBuf>,
}

/// Resolves the prefix, scans for questions and stages every valid one.
///
/// Files copied before a failure stay on disk.
pub fn stage(opts: &StageOptions) -> Result<StageReport, StageError> {
    let prefix = resolve_prefix(&opts.stage_dir, opts.prefix.as_deref())?;
    let sources = find_question_sources(&opts.work_dir)?;
    if sources.is_empty() {
        return Err(StageError::NothingStaged {
            work_dir: opts.work_dir.clone(),
        });
    }

    if opts.clean {
        clear_stage_dir(&opts.stage_dir, true)?;
    }

    let mut staged = Vec::with_capacity(sources.len());
    for question in &sources {
        let dest = opts.stage_dir.join(format!("{}{}.cpp", prefix, question.name));
        stage_file(&question.source, &dest)?;
        tracing::info!(
            "staged {} -> {}",
            describe_path(&question.source, &opts.work_dir),
            describe_path(&dest, &opts.work_dir)
        );
        staged.push(dest);
    }

    Ok(StageReport { prefix, staged })
}

/// Writes the filtered contents of `source` to `dest`, replacing `dest` if present.
pub fn stage_file(source: &Path, dest: &Path) -> Result<(), StageError> {
    let content = fs::read(source).map_err(|err| StageError::Io {
        action: "failed to read",
        path: source.to_path_buf(),
        source: err,
    })?;
    let filtered = strip_cut_markers(&content);
    if filtered.unterminated_block {
        tracing::warn!(
            "{}: `stage: cut start` without `stage: cut stop`; the rest of the file was cut",
            source.display()
        );
    }
    tracing::debug!("{}: {} lines cut", source.display(), filtered.removed);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| StageError::Io {
            action: "failed to create",
            path: parent.to_path_buf(),
            source: err,
        })?;
    }
    fs::write(dest, filtered.content).map_err(|err| StageError::Io {
        action: "failed to write",
        path: dest.to_path_buf(),
        source: err,
    })
}

/// Counts of what [`clear_stage_dir`] removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cleared {
    pub dirs: usize,
    pub files: usize,
}

/// Deletes the contents of `stage_dir`, optionally sparing the `.prefix` marker.
/// A missing directory is not an error.
pub fn clear_stage_dir(stage_dir: &Path, keep_prefix: bool) -> Result<Cleared, StageError> {
    let mut cleared = Cleared::default();
    let read_dir = match fs::read_dir(stage_dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(cleared),
        Err(err) => {
            return Err(StageError::Io {
                action: "failed to list",
                path: stage_dir.to_path_buf(),
                source: err,
            })
        }
    };

    for entry in read_dir {
        let entry = entry.map_err(|err| StageError::Io {
            action: "failed to list",
            path: stage_dir.to_path_buf(),
            source: err,
        })?;
        if keep_prefix && entry.file_name() == PREFIX_FILENAME {
            continue;
        }
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let result = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|err| StageError::Io {
            action: "failed to remove",
            path: path.clone(),
            source: err,
        })?;
        if is_dir {
            cleared.dirs += 1;
        } else {
            cleared.files += 1;
        }
    }

    if cleared.dirs > 0 || cleared.files > 0 {
        tracing::info!(
            "{} directories and {} files deleted from {}",
            cleared.dirs,
            cleared.files,
            stage_dir.display()
        );
    }
    Ok(cleared)
}
