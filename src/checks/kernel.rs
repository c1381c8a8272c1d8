use crate::checks::InstallCheck;
use crate::error::InstallError;

/// Virtualization flavor derived from the kernel release string. WSL2 is
/// supported but usually lacks a running service supervisor; WSL1 cannot run
/// the accelerator runtime at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtKind {
    None,
    Wsl2,
}

pub fn classify_kernel_release(release: &str) -> Result<VirtKind, InstallError> {
    let lowered = release.to_lowercase();
    if lowered.contains("microsoft-standard") || lowered.contains("wsl2") {
        return Ok(VirtKind::Wsl2);
    }
    // WSL1 kernels carry a bare "Microsoft" marker without the WSL2 suffix.
    if lowered.contains("microsoft") {
        return Err(InstallError::UnsupportedCompatLayer(release.to_string()));
    }
    Ok(VirtKind::None)
}

pub struct KernelCheck {
    release: String,
}

impl KernelCheck {
    pub fn new(release: &str) -> Self {
        Self {
            release: release.to_string(),
        }
    }
}

impl InstallCheck for KernelCheck {
    fn name(&self) -> &'static str {
        "Kernel Compatibility"
    }

    fn check(&self) -> Result<(), InstallError> {
        classify_kernel_release(&self.release).map(|_| ())
    }

    fn success_message(&self) -> String {
        match classify_kernel_release(&self.release) {
            Ok(VirtKind::Wsl2) => {
                format!("{} (WSL2: systemd may be unavailable)", self.release)
            }
            _ => self.release.clone(),
        }
    }
}
