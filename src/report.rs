use colored::Colorize;

use crate::constants::API_ENDPOINT;
use crate::error::InstallError;
use crate::installer::{InstallReport, ServiceStatus};
use crate::success_message;
use crate::utils::{print_message, print_title, TagColor};

/// Final status line for a completed run. Distinguishes a fully started
/// service from "installed but not started" and surfaces collected
/// per-file permission warnings.
pub fn render(report: &InstallReport) {
    print_title("Install Complete");
    success_message!(
        "Installed {} with {} accelerator libraries",
        report.binary.display(),
        report.lib_count
    );

    for file in &report.permission_issues {
        print_message(
            "WARNING",
            &format!("library is not readable and executable: {}", file.display()),
            TagColor::Cyan,
        );
    }

    match report.service {
        ServiceStatus::Started => {
            success_message!("The Ollama API is now available at {}", API_ENDPOINT);
            println!("\nRun a model with:");
            println!("  {}\n", "ollama run gemma3".cyan());
        }
        ServiceStatus::SupervisorNotRunning => {
            print_message(
                "NOTICE",
                "systemd is not running; the service was installed but not started",
                TagColor::Cyan,
            );
            if report.wsl2 {
                print_message(
                    "NOTICE",
                    "under WSL2, start the server manually with `ollama serve`",
                    TagColor::Cyan,
                );
            }
        }
    }
}

/// Fatal path: the first error, verbatim, on stderr. The caller exits 1.
pub fn fatal(err: &InstallError) {
    eprintln!("{} {err}", "[ERROR]".red().bold());
}
