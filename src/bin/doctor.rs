use std::env;
use std::process::{self, Command};

use clap::Parser;
use console::Emoji;
use sysinfo::System;

use ollama_installer::constants::BINARY_NAME;
use ollama_installer::installer;
use ollama_installer::source::find_installed_binary;
use ollama_installer::utils::{print_message, print_title, TagColor};

/// Read-only companion to the installer: locates the installed binary,
/// summarizes the host and inspects the installed library set. Touches
/// nothing on disk.
#[derive(Parser, Debug)]
#[command(
    name = "ollama-doctor",
    version,
    about = "Verifies an existing ollama installation"
)]
struct DoctorCli {}

fn main() {
    let _cli = DoctorCli::parse();
    print_title("Ollama Install Doctor");

    print_host_summary();

    let start_dir = env::current_dir().unwrap_or_else(|_| "/".into());
    let binary = match find_installed_binary(BINARY_NAME, &start_dir) {
        Some(path) => path,
        None => {
            eprintln!("ollama not found on the PATH or in any ancestor directory");
            process::exit(1);
        }
    };
    print_status("FOUND", "Binary", &binary.display().to_string(), TagColor::Green);

    // lib/ollama sits next to the bin directory holding the binary.
    let lib_dir = binary
        .parent()
        .and_then(|bin| bin.parent())
        .map(|root| root.join("lib").join(BINARY_NAME));
    match lib_dir {
        Some(dir) if dir.is_dir() => {
            let issues = installer::post_copy(&dir);
            if issues.is_empty() {
                print_status("OK", "Libraries", &dir.display().to_string(), TagColor::Green);
            } else {
                for file in issues {
                    print_status(
                        "WARNING",
                        "Library",
                        &format!("not readable and executable: {}", file.display()),
                        TagColor::Cyan,
                    );
                }
            }
        }
        _ => print_message(
            "NOTICE",
            "no library directory next to the binary (CPU-only install?)",
            TagColor::Cyan,
        ),
    }

    print_accelerators();
}

/// Labeled variant of the installer's status line, used only for doctor
/// findings.
fn print_status(tag: &str, label: &str, detail: &str, color: TagColor) {
    print_message(tag, &format!("{label:<12} {detail}"), color);
}

fn print_host_summary() {
    const OS: Emoji<'_, '_> = Emoji("🐧 ", "[OS] ");
    const CPU: Emoji<'_, '_> = Emoji("⚙️ ", "[CPU] ");
    const RAM: Emoji<'_, '_> = Emoji("💾 ", "[RAM] ");

    let sys = System::new_all();
    let total_mem_gib = sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0;

    println!(
        "{OS}{} {}",
        System::name().unwrap_or_else(|| "Linux".into()),
        System::kernel_version().unwrap_or_default()
    );
    println!("{CPU}{} cores, {}", sys.cpus().len(), env::consts::ARCH);
    println!("{RAM}{total_mem_gib:.2} GiB\n");
}

/// Accelerator inventory via nvidia-smi. Purely diagnostic: the installer
/// never consults it.
fn print_accelerators() {
    if which::which("nvidia-smi").is_err() {
        print_message("NOTICE", "nvidia-smi not found; skipping GPU inventory", TagColor::Cyan);
        return;
    }
    let output = Command::new("nvidia-smi")
        .args(["--query-gpu=name,memory.total", "--format=csv,noheader"])
        .output();
    match output {
        Ok(output) if output.status.success() => {
            for line in String::from_utf8_lossy(&output.stdout).lines() {
                print_status("GPU", "Detected", line.trim(), TagColor::Green);
            }
        }
        _ => print_message("NOTICE", "nvidia-smi present but not responding", TagColor::Cyan),
    }
}
