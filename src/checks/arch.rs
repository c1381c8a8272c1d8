use crate::checks::InstallCheck;
use crate::error::InstallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Normalizes a raw machine identifier (as reported by `uname -m`).
    pub fn from_machine(raw: &str) -> Result<Self, InstallError> {
        match raw {
            "x86_64" => Ok(Self::Amd64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            other => Err(InstallError::UnsupportedArchitecture(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

pub struct ArchCheck {
    machine: String,
}

impl ArchCheck {
    pub fn new(machine: &str) -> Self {
        Self {
            machine: machine.to_string(),
        }
    }
}

impl InstallCheck for ArchCheck {
    fn name(&self) -> &'static str {
        "CPU Architecture"
    }

    fn check(&self) -> Result<(), InstallError> {
        Arch::from_machine(&self.machine).map(|_| ())
    }

    fn success_message(&self) -> String {
        match Arch::from_machine(&self.machine) {
            Ok(arch) => format!("{} ({})", arch.as_str(), self.machine),
            Err(_) => self.machine.clone(),
        }
    }
}
