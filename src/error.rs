use std::path::PathBuf;
use thiserror::Error;

/// Fatal installation failures. Each stage aborts the run on the first of
/// these; non-fatal conditions (per-file permission issues, supervisor not
/// running) travel in the final report instead.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("WSL1 is not supported; upgrade to WSL2 with `wsl --set-version <distro> 2` (kernel: {0})")]
    UnsupportedCompatLayer(String),

    #[error("required tools are missing: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("could not find the ollama binary and its library directory next to the installer or in the current directory")]
    SourceNotFound,

    #[error("no accelerator libraries found in {}", .0.display())]
    NoLibrariesFound(PathBuf),

    #[error("installation requires root privileges and sudo is not available")]
    ElevationUnavailable,

    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
