use console::Emoji;
use nix::sys::utsname::uname;

mod arch;
mod kernel;
mod tools;

pub use arch::Arch;
pub use kernel::{classify_kernel_release, VirtKind};

use crate::error::InstallError;
use arch::ArchCheck;
use kernel::KernelCheck;
use tools::ToolsCheck;

/// A pre-flight requirement evaluated before anything touches the host.
pub trait InstallCheck {
    fn name(&self) -> &'static str;
    fn check(&self) -> Result<(), InstallError>;
    fn success_message(&self) -> String;
}

/// Host facts computed once at startup and read-only afterward.
#[derive(Debug, Clone)]
pub struct HostProfile {
    pub arch: Arch,
    pub virt: VirtKind,
    pub has_supervisor: bool,
}

impl HostProfile {
    /// Runs every pre-flight check, prints the pass/fail table, and returns
    /// the profile or the first fatal error. All rows are printed before
    /// aborting so the operator sees the complete picture.
    pub fn probe() -> Result<Self, InstallError> {
        let uts = uname().map_err(std::io::Error::from)?;
        let machine = uts.machine().to_string_lossy().into_owned();
        let release = uts.release().to_string_lossy().into_owned();

        let checks: Vec<Box<dyn InstallCheck>> = vec![
            Box::new(ArchCheck::new(&machine)),
            Box::new(KernelCheck::new(&release)),
            Box::new(ToolsCheck::new()),
        ];
        run_all(&checks)?;

        Ok(Self {
            arch: Arch::from_machine(&machine)?,
            virt: classify_kernel_release(&release)?,
            has_supervisor: which::which("systemctl").is_ok(),
        })
    }
}

fn run_all(checks: &[Box<dyn InstallCheck>]) -> Result<(), InstallError> {
    const PASS: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
    const FAIL: Emoji<'_, '_> = Emoji("❌ ", "[X] ");

    let mut first_failure = None;

    for check in checks {
        let label = format!("{:<25}", check.name());
        match check.check() {
            Ok(()) => println!("{PASS} {label} {}", check.success_message()),
            Err(err) => {
                println!("{FAIL} {label} {err}");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }

    println!(); // spacer

    match first_failure {
        None => {
            println!("Environment ready for installation");
            Ok(())
        }
        Some(err) => Err(err),
    }
}
