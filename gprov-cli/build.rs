//! Build script for gprov-cli.
//!
//! Renders the man page into OUT_DIR with clap_mangen. The command tree is
//! rebuilt here because a build script cannot depend on its own crate.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("gprov")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve and inspect Google Cloud provider configuration")
        .long_about(
            "Command-line tool that resolves Google Cloud provider settings, credentials, \
             universe domain and service endpoints into a single configuration",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings file to load instead of searching the default locations")
                .value_name("PATH")
                .global(true)
                .env("GPROV_SETTINGS"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve and print the provider configuration")
                .long_about("Load settings, credentials and endpoints and print the result"),
            Command::new("validate")
                .about("Validate a settings file")
                .long_about("Check a gprov settings file for parse and semantic errors"),
            Command::new("endpoints")
                .about("Print the effective service endpoints")
                .long_about("Print per-service base paths after transport and universe rewrites"),
            Command::new("catalog")
                .about("Merge operation registry files into a catalog")
                .long_about("Merge resource and data source registries, reporting duplicates"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();
    fs::write(man_dir.join("gprov.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
