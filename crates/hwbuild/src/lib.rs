// crates/hwbuild/src/lib.rs

//! Configures and builds the homework project with CMake and make.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use hw_project::{HwConfig, BUILD_DIR_BASENAME};
use thiserror::Error;

pub const DEFAULT_CMAKE: &str = "cmake";
pub const DEFAULT_MAKE: &str = "make";
pub const BUILD_TYPE: &str = "Debug";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{role} `{name}` not found")]
    ToolMissing {
        role: &'static str,
        name: String,
        source: which::Error,
    },

    #[error("failed to run {}", program.display())]
    Spawn { program: PathBuf, source: io::Error },

    #[error("{step} failed ({status})")]
    StepFailed {
        step: &'static str,
        status: ExitStatus,
    },
}

/// The two external tools a build needs, resolved to runnable paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub cmake: PathBuf,
    pub make: PathBuf,
}

impl Toolchain {
    /// Looks both tools up, failing on the first one that cannot be found.
    /// Names containing a path separator are checked as paths; others are searched on `PATH`.
    pub fn resolve(cmake: &str, make: &str) -> Result<Self, BuildError> {
        Ok(Self {
            cmake: find_tool("build-system generator", cmake)?,
            make: find_tool("build tool", make)?,
        })
    }

    /// Resolves the tools using explicit overrides first, then `.hwconfig.json`,
    /// then the conventional names.
    pub fn from_config(
        cfg: &HwConfig,
        cmake_override: Option<&str>,
        make_override: Option<&str>,
    ) -> Result<Self, BuildError> {
        let cmake = cmake_override
            .map(str::to_string)
            .unwrap_or_else(|| cfg.resolve_executable(DEFAULT_CMAKE));
        let make = make_override
            .map(str::to_string)
            .unwrap_or_else(|| cfg.resolve_executable(DEFAULT_MAKE));
        Self::resolve(&cmake, &make)
    }

    /// Generates build files for `source_dir` into `build_dir`.
    pub fn generate(&self, source_dir: &Path, build_dir: &Path, build_type: &str) -> Result<(), BuildError> {
        let mut cmd = Command::new(&self.cmake);
        cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", build_type))
            .arg("-S")
            .arg(source_dir)
            .arg("-B")
            .arg(build_dir);
        run_step("generate", &self.cmake, &mut cmd)?;
        tracing::debug!("build files generated in {}", build_dir.display());
        Ok(())
    }

    /// Runs the build tool with `build_dir` as its working directory.
    pub fn compile(&self, build_dir: &Path) -> Result<(), BuildError> {
        let mut cmd = Command::new(&self.make);
        cmd.current_dir(build_dir);
        run_step("build", &self.make, &mut cmd)?;
        tracing::debug!("build complete in {}", build_dir.display());
        Ok(())
    }
}

/// Generates a Debug configuration under `<project_root>/cmake-build-debug`
/// and builds it. Returns the build directory.
pub fn build(project_root: &Path, toolchain: &Toolchain) -> Result<PathBuf, BuildError> {
    let build_dir = project_root.join(BUILD_DIR_BASENAME);
    toolchain.generate(project_root, &build_dir, BUILD_TYPE)?;
    toolchain.compile(&build_dir)?;
    Ok(build_dir)
}

fn find_tool(role: &'static str, name: &str) -> Result<PathBuf, BuildError> {
    let path = which::which(name).map_err(|source| BuildError::ToolMissing {
        role,
        name: name.to_string(),
        source,
    })?;
    tracing::debug!("{} `{}` resolved to {}", role, name, path.display());
    Ok(path)
}

fn run_step(step: &'static str, program: &Path, cmd: &mut Command) -> Result<(), BuildError> {
    tracing::debug!("{}: {:?}", step, cmd);
    let status = cmd.status().map_err(|source| BuildError::Spawn {
        program: program.to_path_buf(),
        source,
    })?;
    if !status.success() {
        return Err(BuildError::StepFailed { step, status });
    }
    Ok(())
}
