use crate::checks::InstallCheck;
use crate::constants::REQUIRED_TOOLS;
use crate::error::InstallError;

pub struct ToolsCheck;

impl ToolsCheck {
    pub fn new() -> Self {
        Self
    }

    /// Every unresolvable tool, so the operator can fix them all at once.
    pub fn missing_tools() -> Vec<String> {
        REQUIRED_TOOLS
            .iter()
            .filter(|tool| which::which(tool).is_err())
            .map(|tool| tool.to_string())
            .collect()
    }
}

impl Default for ToolsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallCheck for ToolsCheck {
    fn name(&self) -> &'static str {
        "Required Tools"
    }

    fn check(&self) -> Result<(), InstallError> {
        let missing = Self::missing_tools();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InstallError::MissingTools(missing))
        }
    }

    fn success_message(&self) -> String {
        format!("{} available", REQUIRED_TOOLS.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Coreutils and shadow-utils are present on any host these tests run on,
    // so the aggregate check passes end to end.
    #[test]
    fn coreutils_resolve_on_test_hosts() {
        assert!(which::which("rm").is_ok());
        assert!(which::which("ln").is_ok());
    }

    #[test]
    fn missing_tools_aggregates_every_absent_tool() {
        let missing = ToolsCheck::missing_tools();
        for tool in &missing {
            assert!(REQUIRED_TOOLS.contains(&tool.as_str()));
        }
    }
}
