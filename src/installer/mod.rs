use std::path::PathBuf;

use crate::checks::{HostProfile, VirtKind};
use crate::error::InstallError;
use crate::privilege::PrivilegeBroker;
use crate::source::SourceArtifacts;
use crate::types::InstallConfig;
use crate::utils::{print_message, TagColor};

mod place;
mod service;
mod target;
mod verify;

pub use place::Placer;
pub use service::{render_unit, ServiceStatus};
pub use target::InstallTarget;
pub use verify::{post_copy, preflight};

use service::ServiceProvisioner;

/// What the reporter renders at the end of a successful run, including the
/// non-fatal conditions collected along the way.
#[derive(Debug)]
pub struct InstallReport {
    pub binary: PathBuf,
    pub lib_count: usize,
    pub permission_issues: Vec<PathBuf>,
    pub service: ServiceStatus,
    pub wsl2: bool,
}

pub struct Installer {
    pub config: InstallConfig,
    pub profile: HostProfile,
}

impl Installer {
    /// The ordered stage pipeline. Every stage aborts the whole run on its
    /// first fatal error; only the post-copy verifier and service activation
    /// degrade instead of failing.
    pub fn run(&self) -> Result<InstallReport, InstallError> {
        // Scratch space lives for the whole run and is removed on every exit
        // path when this binding drops.
        let scratch = tempfile::tempdir()?;

        let source = SourceArtifacts::locate(&self.config.invocation_dir, &self.config.working_dir)?;
        print_message(
            "SOURCE",
            &format!("Found build output at {}", source.root.display()),
            TagColor::Blue,
        );

        let lib_count = verify::preflight(&source)?;

        let broker = PrivilegeBroker::acquire()?;
        let target = InstallTarget::resolve(&self.config.path_var);

        Placer::new(&broker).install(&source, &target)?;

        let permission_issues = verify::post_copy(&target.lib_dir);

        let service = ServiceProvisioner::new(&broker).provision(
            &target,
            &self.config.path_var,
            self.profile.has_supervisor,
            scratch.path(),
        )?;

        Ok(InstallReport {
            binary: target.binary,
            lib_count,
            permission_issues,
            service,
            wsl2: self.profile.virt == VirtKind::Wsl2,
        })
    }
}
