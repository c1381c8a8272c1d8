use std::path::{Path, PathBuf};

use crate::constants::{BINARY_NAME, SOURCE_LIB_DIRS};
use crate::error::InstallError;

/// Build outputs the installer consumes: the compiled binary and the
/// directory of accelerator runtime libraries next to it.
#[derive(Debug, Clone)]
pub struct SourceArtifacts {
    pub root: PathBuf,
    pub binary: PathBuf,
    pub lib_dir: PathBuf,
}

impl SourceArtifacts {
    /// Looks for build outputs in the directory containing the installer
    /// executable, then in the working directory. No upward search: the
    /// artifacts either sit next to the invocation or the run aborts.
    pub fn locate(invocation_dir: &Path, working_dir: &Path) -> Result<Self, InstallError> {
        [invocation_dir, working_dir]
            .into_iter()
            .find_map(Self::at_root)
            .ok_or(InstallError::SourceNotFound)
    }

    fn at_root(root: &Path) -> Option<Self> {
        let binary = root.join(BINARY_NAME);
        if !binary.is_file() {
            return None;
        }
        let lib_dir = SOURCE_LIB_DIRS
            .iter()
            .map(|sub| root.join(sub))
            .find(|dir| dir.is_dir())
            // Missing outright is reported by the pre-flight verifier, which
            // owns the "no libraries" failure.
            .unwrap_or_else(|| root.join(SOURCE_LIB_DIRS[SOURCE_LIB_DIRS.len() - 1]));
        Some(Self {
            root: root.to_path_buf(),
            binary,
            lib_dir,
        })
    }
}

/// Finds an installed binary by name: direct PATH resolution first, then a
/// bounded ascent from `start_dir` to the filesystem root. Used by the
/// doctor, never by the installer itself.
pub fn find_installed_binary(name: &str, start_dir: &Path) -> Option<PathBuf> {
    if let Ok(path) = which::which(name) {
        return Some(path);
    }
    ascend_for_binary(name, start_dir)
}

/// Iterative upward walk; checks `<dir>/<name>` at every level and stops at
/// the root without looping.
pub fn ascend_for_binary(name: &str, start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn locates_artifacts_in_invocation_dir() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join(BINARY_NAME));
        fs::create_dir_all(root.path().join("dist/lib/ollama")).unwrap();

        let found = SourceArtifacts::locate(root.path(), Path::new("/nonexistent")).unwrap();
        assert_eq!(found.binary, root.path().join(BINARY_NAME));
        assert_eq!(found.lib_dir, root.path().join("dist/lib/ollama"));
    }

    #[test]
    fn falls_back_to_bare_lib_layout() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join(BINARY_NAME));
        fs::create_dir_all(root.path().join("lib/ollama")).unwrap();

        let found = SourceArtifacts::locate(root.path(), root.path()).unwrap();
        assert_eq!(found.lib_dir, root.path().join("lib/ollama"));
    }

    #[test]
    fn working_dir_is_searched_second() {
        let empty = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        touch(&cwd.path().join(BINARY_NAME));
        fs::create_dir_all(cwd.path().join("lib/ollama")).unwrap();

        let found = SourceArtifacts::locate(empty.path(), cwd.path()).unwrap();
        assert_eq!(found.root, cwd.path());
    }

    #[test]
    fn missing_artifacts_fail_without_upward_search() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        // Binary above the search dirs must not be found.
        touch(&root.path().join(BINARY_NAME));

        let err = SourceArtifacts::locate(&nested, &nested).unwrap_err();
        assert!(matches!(err, InstallError::SourceNotFound));
    }

    #[test]
    fn ascent_finds_binary_in_ancestor() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("ollama"));
        let deep = root.path().join("x/y/z");
        fs::create_dir_all(&deep).unwrap();

        let found = ascend_for_binary("ollama", &deep).unwrap();
        assert_eq!(found, root.path().join("ollama"));
    }

    #[test]
    fn ascent_terminates_at_filesystem_root() {
        assert_eq!(
            ascend_for_binary("definitely-not-a-real-binary-name", Path::new("/")),
            None
        );
    }
}
