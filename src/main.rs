use clap::Parser;
use std::process;

use ollama_installer::checks::HostProfile;
use ollama_installer::installer::Installer;
use ollama_installer::report;
use ollama_installer::types::{InstallCli, InstallConfig};
use ollama_installer::utils::print_banner;

fn main() {
    let cli = InstallCli::parse();
    print_banner(cli.release.as_deref());

    let profile = match HostProfile::probe() {
        Ok(profile) => profile,
        Err(err) => {
            report::fatal(&err);
            process::exit(1);
        }
    };

    let config = match InstallConfig::from_env(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to read environment: {err}");
            process::exit(1);
        }
    };

    let installer = Installer { config, profile };
    match installer.run() {
        Ok(outcome) => report::render(&outcome),
        Err(err) => {
            report::fatal(&err);
            process::exit(1);
        }
    }
}
