use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ollama-installer",
    version,
    about = "Installs the ollama binary and its accelerator runtime libraries from a local build"
)]
pub struct InstallCli {
    /// Release qualifier recorded for this install. The download variant of
    /// the installer appends it to artifact URLs; the local variant only
    /// echoes it in the banner.
    #[arg(long, env = "OLLAMA_VERSION")]
    pub release: Option<String>,
}

/// Process environment captured once at startup. Stages read this struct
/// instead of the ambient environment.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub release: Option<String>,
    pub path_var: String,
    /// Directory containing the running installer executable.
    pub invocation_dir: PathBuf,
    pub working_dir: PathBuf,
}

impl InstallConfig {
    pub fn from_env(cli: &InstallCli) -> Result<Self> {
        let working_dir = env::current_dir().context("failed to resolve working directory")?;
        let invocation_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
            .unwrap_or_else(|| working_dir.clone());

        Ok(Self {
            release: cli.release.clone(),
            path_var: env::var("PATH").unwrap_or_default(),
            invocation_dir,
            working_dir,
        })
    }
}
