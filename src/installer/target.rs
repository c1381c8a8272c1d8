use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{BINARY_NAME, BINDIR_CANDIDATES};

/// Canonical destinations for one install, derived once from the search path.
/// The install root anchors both the binary and its sibling library
/// directory, so a prior system installation is replaced in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub install_root: PathBuf,
    /// The PATH entry that anchored the resolution.
    pub bindir: PathBuf,
    pub binary: PathBuf,
    pub lib_dir: PathBuf,
}

impl InstallTarget {
    pub fn resolve(path_var: &str) -> Self {
        let candidates: Vec<PathBuf> = BINDIR_CANDIDATES.iter().map(PathBuf::from).collect();
        Self::resolve_with(path_var, &candidates)
    }

    /// Picks the first candidate bindir present on `path_var`; falls back to
    /// the last candidate when PATH lists none of them. Entries are compared
    /// by components so trailing separators on PATH do not break anchoring.
    pub fn resolve_with(path_var: &str, candidates: &[PathBuf]) -> Self {
        let entries: Vec<PathBuf> = env::split_paths(path_var).collect();
        let bindir = candidates
            .iter()
            .find(|candidate| {
                entries
                    .iter()
                    .any(|entry| entry.components().eq(candidate.components()))
            })
            .or_else(|| candidates.last())
            .expect("at least one bindir candidate")
            .clone();
        Self::anchored_at(&bindir)
    }

    fn anchored_at(bindir: &Path) -> Self {
        let install_root = bindir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        Self {
            binary: install_root.join("bin").join(BINARY_NAME),
            lib_dir: install_root.join("lib").join(BINARY_NAME),
            bindir: bindir.to_path_buf(),
            install_root,
        }
    }

    /// Where invocation by bare command name resolves. Differs from
    /// `self.binary` only when the anchor is not a `bin/` directory, in which
    /// case the placer drops a symlink here.
    pub fn path_entry(&self) -> PathBuf {
        self.bindir.join(BINARY_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_var(entries: &[&Path]) -> String {
        env::join_paths(entries)
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn picks_first_candidate_on_path() {
        let target = InstallTarget::resolve("/usr/local/bin:/usr/bin:/bin");
        assert_eq!(target.install_root, Path::new("/usr/local"));
        assert_eq!(target.binary, Path::new("/usr/local/bin/ollama"));
        assert_eq!(target.lib_dir, Path::new("/usr/local/lib/ollama"));
    }

    #[test]
    fn skips_candidates_missing_from_path() {
        let target = InstallTarget::resolve("/usr/bin:/bin");
        assert_eq!(target.install_root, Path::new("/usr"));
        assert_eq!(target.binary, Path::new("/usr/bin/ollama"));
    }

    #[test]
    fn anchors_despite_trailing_separator_on_path_entry() {
        let target = InstallTarget::resolve("/usr/local/bin/:/usr/bin");
        assert_eq!(target.bindir, Path::new("/usr/local/bin"));
        assert_eq!(target.install_root, Path::new("/usr/local"));
    }

    #[test]
    fn falls_back_to_last_candidate() {
        let target = InstallTarget::resolve("/opt/strange/bin");
        assert_eq!(target.bindir, Path::new("/bin"));
        assert_eq!(target.install_root, Path::new("/"));
    }

    #[test]
    fn resolves_within_injected_roots() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bindir = tmp.path().join("usr/local/bin");
        let candidates = vec![bindir.clone()];
        let var = path_var(&[&bindir]);

        let target = InstallTarget::resolve_with(&var, &candidates);
        assert_eq!(target.install_root, tmp.path().join("usr/local"));
        assert_eq!(target.binary, bindir.join("ollama"));
        assert_eq!(target.path_entry(), bindir.join("ollama"));
    }
}
