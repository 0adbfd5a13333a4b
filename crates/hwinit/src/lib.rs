// crates/hwinit/src/lib.rs

//! Sets up a homework project directory: an empty `.hwconfig.json` that marks
//! the project root, a root `CMakeLists.txt`, and `.gitignore` entries for the
//! build and staging output.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hw_project::CFG_FILENAME;
use thiserror::Error;

pub const DEFAULT_PROJECT_NAME: &str = "hw";

const GITIGNORE_TEXT: &str = "\
cmake-build*/
/stage/
";

#[derive(Debug, Error)]
pub enum InitError {
    #[error("already exists: {}", path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

/// Renders the root `CMakeLists.txt`.
pub fn root_cmakelists(project_name: &str) -> String {
    format!(
        "cmake_minimum_required(VERSION 3.7)\nproject({})\n",
        project_name
    )
}

/// Initializes `proj_dir`, creating it if needed.
///
/// Refuses to touch a directory that already has `.hwconfig.json` or
/// `CMakeLists.txt` unless `unsafe_overwrite` is set. The config file is never
/// truncated, and `.gitignore` is appended to rather than replaced.
pub fn init_project(proj_dir: &Path, project_name: &str, unsafe_overwrite: bool) -> Result<(), InitError> {
    let cfg_path = proj_dir.join(CFG_FILENAME);
    let cmakelists_path = proj_dir.join("CMakeLists.txt");
    if !unsafe_overwrite {
        for path in [&cfg_path, &cmakelists_path] {
            if path.exists() {
                return Err(InitError::AlreadyInitialized { path: path.clone() });
            }
        }
    }

    fs::create_dir_all(proj_dir).map_err(|source| InitError::Io {
        action: "failed to create",
        path: proj_dir.to_path_buf(),
        source,
    })?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg_path)
        .map_err(|source| InitError::Io {
            action: "failed to create",
            path: cfg_path.clone(),
            source,
        })?;
    fs::write(&cmakelists_path, root_cmakelists(project_name)).map_err(|source| InitError::Io {
        action: "failed to write",
        path: cmakelists_path.clone(),
        source,
    })?;

    let gitignore_path = proj_dir.join(".gitignore");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&gitignore_path)
        .and_then(|mut file| file.write_all(GITIGNORE_TEXT.as_bytes()))
        .map_err(|source| InitError::Io {
            action: "failed to write",
            path: gitignore_path,
            source,
        })?;

    tracing::debug!("initialized project {:?} in {}", project_name, proj_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_project_files() {
        let dir = tempdir().unwrap();
        let proj = dir.path().join("my_homework_12");
        init_project(&proj, "hw12", false).unwrap();

        assert_eq!(fs::read_to_string(proj.join(CFG_FILENAME)).unwrap(), "");
        assert_eq!(
            fs::read_to_string(proj.join("CMakeLists.txt")).unwrap(),
            "cmake_minimum_required(VERSION 3.7)\nproject(hw12)\n"
        );
        let gitignore = fs::read_to_string(proj.join(".gitignore")).unwrap();
        assert!(gitignore.lines().any(|l| l == "cmake-build*/"));
        assert!(gitignore.lines().any(|l| l == "/stage/"));
        assert_eq!(hw_project::find_project_root(&proj).unwrap(), proj);
    }

    #[test]
    fn test_second_init_is_refused() {
        let dir = tempdir().unwrap();
        init_project(dir.path(), "hw", false).unwrap();
        let err = init_project(dir.path(), "other", false).unwrap_err();
        match err {
            InitError::AlreadyInitialized { path } => assert_eq!(path, dir.path().join(CFG_FILENAME)),
            other => panic!("unexpected error: {other}"),
        }
        assert!(fs::read_to_string(dir.path().join("CMakeLists.txt"))
            .unwrap()
            .contains("project(hw)"));
    }

    #[test]
    fn test_existing_cmakelists_is_refused_without_side_effects() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "# mine\n").unwrap();
        let err = init_project(dir.path(), "hw", false).unwrap_err();
        assert!(matches!(err, InitError::AlreadyInitialized { .. }));
        assert!(!dir.path().join(CFG_FILENAME).exists());
        assert!(!dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_unsafe_overwrites_cmakelists_and_keeps_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CFG_FILENAME), r#"{"stage_dir": "handin"}"#).unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "# mine\n").unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();

        init_project(dir.path(), "hw5", true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(CFG_FILENAME)).unwrap(),
            r#"{"stage_dir": "handin"}"#
        );
        assert!(fs::read_to_string(dir.path().join("CMakeLists.txt"))
            .unwrap()
            .contains("project(hw5)"));
        assert!(fs::read_to_string(dir.path().join(".gitignore"))
            .unwrap()
            .starts_with("target/\ncmake-build*/\n"));
    }
}
