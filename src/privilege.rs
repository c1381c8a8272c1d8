use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::error::InstallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Elevation {
    /// Run commands as-is (already root, or operating on caller-owned paths).
    Direct,
    /// Prefix every command with sudo.
    Sudo,
}

/// Decides once, at startup, how destructive operations are executed. The
/// decision is never re-evaluated mid-run.
#[derive(Debug, Clone, Copy)]
pub struct PrivilegeBroker {
    elevation: Elevation,
}

impl PrivilegeBroker {
    pub fn acquire() -> Result<Self, InstallError> {
        if nix::unistd::Uid::effective().is_root() {
            return Ok(Self {
                elevation: Elevation::Direct,
            });
        }
        if which::which("sudo").is_ok() {
            return Ok(Self {
                elevation: Elevation::Sudo,
            });
        }
        Err(InstallError::ElevationUnavailable)
    }

    /// Broker that never escalates. Used when installing into directories the
    /// caller already owns.
    pub fn direct() -> Self {
        Self {
            elevation: Elevation::Direct,
        }
    }

    /// Whether installed files can be given root ownership.
    pub fn is_privileged(&self) -> bool {
        self.elevation == Elevation::Sudo || nix::unistd::Uid::effective().is_root()
    }

    fn command<I, S>(&self, program: &str, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        match self.elevation {
            Elevation::Direct => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Elevation::Sudo => {
                let mut cmd = Command::new("sudo");
                cmd.arg(program).args(args);
                cmd
            }
        }
    }

    /// Runs a command to completion, failing on a non-zero exit status.
    pub fn run<I, S>(&self, program: &str, args: I) -> Result<(), InstallError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.command(program, args).output().map_err(|err| {
            InstallError::CommandFailed {
                command: program.to_string(),
                detail: err.to_string(),
            }
        })?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(InstallError::CommandFailed {
            command: program.to_string(),
            detail: format!("{} ({})", stderr.trim(), output.status),
        })
    }

    /// Places a single file with `install`, fixing the mode and, when the
    /// broker is privileged, root ownership.
    pub fn install_file(&self, src: &Path, dest: &Path, mode: &str) -> Result<(), InstallError> {
        let mut args: Vec<&OsStr> = Vec::new();
        if self.is_privileged() {
            args.extend(["-o0", "-g0"].map(OsStr::new));
        }
        args.extend(["-m", mode].map(OsStr::new));
        args.push(src.as_os_str());
        args.push(dest.as_os_str());
        self.run("install", args)
    }

    /// Creates a directory (and parents) with a fixed mode.
    pub fn install_dir(&self, dir: &Path, mode: &str) -> Result<(), InstallError> {
        let mut args: Vec<&OsStr> = Vec::new();
        if self.is_privileged() {
            args.extend(["-o0", "-g0"].map(OsStr::new));
        }
        args.extend(["-d", "-m", mode].map(OsStr::new));
        args.push(dir.as_os_str());
        self.run("install", args)
    }
}
