use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::unistd::{Group, Uid, User};

use crate::constants::{
    DEVICE_GROUPS, SERVE_SUBCOMMAND, SERVICE_ACCOUNT, SERVICE_HOME, SERVICE_UNIT, UNIT_PATH,
};
use crate::error::InstallError;
use crate::installer::target::InstallTarget;
use crate::privilege::PrivilegeBroker;
use crate::utils::{print_message, TagColor};

/// Outcome of service activation. The non-started variant is an advisory,
/// not a failure: the unit file is on disk either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Started,
    SupervisorNotRunning,
}

/// Creates the service account, grants device-group access, writes the unit
/// and activates it when the supervisor is up. Every step is idempotent.
/// The unit destination and the supervisor-state probe default to the real
/// host but are injectable, like `InstallTarget::resolve_with`.
pub struct ServiceProvisioner<'a> {
    broker: &'a PrivilegeBroker,
    unit_path: PathBuf,
    supervisor_state: fn() -> bool,
}

impl<'a> ServiceProvisioner<'a> {
    pub fn new(broker: &'a PrivilegeBroker) -> Self {
        Self {
            broker,
            unit_path: PathBuf::from(UNIT_PATH),
            supervisor_state: supervisor_running,
        }
    }

    pub fn with_unit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.unit_path = path.into();
        self
    }

    pub fn with_supervisor_state(mut self, probe: fn() -> bool) -> Self {
        self.supervisor_state = probe;
        self
    }

    pub fn provision(
        &self,
        target: &InstallTarget,
        path_var: &str,
        has_supervisor: bool,
        scratch: &Path,
    ) -> Result<ServiceStatus, InstallError> {
        self.ensure_account()?;
        self.grant_device_groups()?;
        self.add_invoking_user()?;
        self.install_unit(target, path_var, scratch)?;
        self.activate(has_supervisor)
    }

    fn ensure_account(&self) -> Result<(), InstallError> {
        if User::from_name(SERVICE_ACCOUNT)
            .map_err(io::Error::from)?
            .is_some()
        {
            return Ok(());
        }
        print_message(
            "ACCOUNT",
            &format!("Creating system user {SERVICE_ACCOUNT}"),
            TagColor::Blue,
        );
        self.broker.run(
            "useradd",
            [
                "-r",
                "-s",
                "/bin/false",
                "-U",
                "-m",
                "-d",
                SERVICE_HOME,
                SERVICE_ACCOUNT,
            ],
        )
    }

    fn grant_device_groups(&self) -> Result<(), InstallError> {
        for group in DEVICE_GROUPS {
            // Hosts expose different device group sets; absence is not an
            // error.
            if Group::from_name(group).map_err(io::Error::from)?.is_none() {
                continue;
            }
            self.broker
                .run("usermod", ["-a", "-G", group, SERVICE_ACCOUNT])?;
        }
        Ok(())
    }

    /// Adds the invoking user to the service group so interactive use does
    /// not need elevation afterward.
    fn add_invoking_user(&self) -> Result<(), InstallError> {
        let invoking = match env::var("SUDO_USER") {
            Ok(name) => Some(name),
            Err(_) => User::from_uid(Uid::current())
                .map_err(io::Error::from)?
                .map(|user| user.name),
        };
        match invoking {
            Some(name) if name != SERVICE_ACCOUNT && name != "root" => {
                self.broker
                    .run("usermod", ["-a", "-G", SERVICE_ACCOUNT, &name])
            }
            _ => Ok(()),
        }
    }

    /// Renders the unit into the scratch directory, then installs it over
    /// the unit destination. The unit is overwritten unconditionally: it is
    /// the sole source of truth for how the supervisor launches the binary.
    pub fn install_unit(
        &self,
        target: &InstallTarget,
        path_var: &str,
        scratch: &Path,
    ) -> Result<(), InstallError> {
        let staged = scratch.join(format!("{SERVICE_UNIT}.service"));
        std::fs::write(&staged, render_unit(&target.binary, path_var))?;
        self.broker.install_file(&staged, &self.unit_path, "644")?;
        print_message(
            "SERVICE",
            &format!("Wrote {}", self.unit_path.display()),
            TagColor::Blue,
        );
        Ok(())
    }

    /// Enables and restarts the unit, but only when the supervisor reports
    /// it can start units; otherwise skips with an advisory status.
    pub fn activate(&self, has_supervisor: bool) -> Result<ServiceStatus, InstallError> {
        if !has_supervisor || !(self.supervisor_state)() {
            return Ok(ServiceStatus::SupervisorNotRunning);
        }
        print_message("SERVICE", "Enabling and starting ollama", TagColor::Blue);
        self.broker.run("systemctl", ["daemon-reload"])?;
        self.broker.run("systemctl", ["enable", SERVICE_UNIT])?;
        self.broker.run("systemctl", ["restart", SERVICE_UNIT])?;
        Ok(ServiceStatus::Started)
    }
}

/// Fixed unit template, parameterized by the installed binary path, the
/// service account and the install-time PATH so the service resolves the
/// same tools the installer did.
pub fn render_unit(binary: &Path, path_var: &str) -> String {
    format!(
        "[Unit]\n\
         Description=Ollama Service\n\
         After=network-online.target\n\
         \n\
         [Service]\n\
         ExecStart={binary} {subcommand}\n\
         User={account}\n\
         Group={account}\n\
         Restart=always\n\
         RestartSec=3\n\
         Environment=\"PATH={path_var}\"\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        binary = binary.display(),
        subcommand = SERVE_SUBCOMMAND,
        account = SERVICE_ACCOUNT,
    )
}

/// Supervisor global state. `running` and `degraded` both mean units can be
/// started; anything else (or no systemd at all, common under WSL2) means
/// activation is skipped.
pub fn supervisor_running() -> bool {
    Command::new("systemctl")
        .arg("is-system-running")
        .output()
        .map(|output| {
            let state = String::from_utf8_lossy(&output.stdout);
            matches!(state.trim(), "running" | "degraded")
        })
        .unwrap_or(false)
}
