use std::io;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};
use walkdir::WalkDir;

use crate::error::InstallError;
use crate::source::SourceArtifacts;

/// Source-side check, run before anything destructive: the library directory
/// must hold at least one regular file. An empty set is always an error,
/// never "CPU-only is fine" — a build without backends is a broken build.
pub fn preflight(source: &SourceArtifacts) -> Result<usize, InstallError> {
    let count = regular_files(&source.lib_dir)?.len();
    if count == 0 {
        return Err(InstallError::NoLibrariesFound(source.lib_dir.clone()));
    }
    Ok(count)
}

/// Destination-side check, run after the copy: every installed library must
/// be readable and executable by this process. Failures are collected per
/// file and degrade the report; they never abort the run. An unwalkable
/// subdirectory counts as an issue on that path, same policy.
pub fn post_copy(lib_dir: &Path) -> Vec<PathBuf> {
    if !lib_dir.is_dir() {
        return Vec::new();
    }
    let mut issues = Vec::new();
    for entry in WalkDir::new(lib_dir) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && access(entry.path(), AccessFlags::R_OK | AccessFlags::X_OK).is_err()
                {
                    issues.push(entry.into_path());
                }
            }
            Err(err) => {
                if let Some(path) = err.path() {
                    issues.push(path.to_path_buf());
                }
            }
        }
    }
    issues
}

fn regular_files(dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
