//! CLI command definitions and dispatch.

pub mod build;
pub mod doctor;
pub mod test_all;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gradebox_common::config::HarnessConfig;
use gradebox_common::types::ImageTag;

/// Gradebox — typed harness for autograder container images.
#[derive(Parser, Debug)]
#[command(name = "gbx", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding one fixture subdirectory per test case.
    #[arg(long, global = true, default_value = gradebox_common::constants::DEFAULT_CASES_DIR)]
    pub cases_dir: PathBuf,

    /// Image tag to build and run.
    #[arg(long, global = true, default_value = gradebox_common::constants::DEFAULT_IMAGE_TAG)]
    pub image: String,

    /// Container runtime binary.
    #[arg(long, global = true, default_value = gradebox_common::constants::DEFAULT_RUNTIME_BIN)]
    pub runtime_bin: String,
}

impl Cli {
    fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            cases_dir: self.cases_dir.clone(),
            image: ImageTag::new(&self.image),
            runtime_bin: self.runtime_bin.clone(),
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stage the grader payload and build the autograder image.
    Build(build::BuildArgs),
    /// Run a single named test case; exits with the container's exit code.
    Test(test::TestArgs),
    /// Run every test case sequentially and report per-case outcomes.
    TestAll(test_all::TestAllArgs),
    /// Report container runtime availability.
    Doctor(doctor::DoctorArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if the command execution fails before a container
/// exit code exists to report.
pub fn execute(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.harness_config();
    match cli.command {
        Command::Build(args) => build::execute(&args, &config),
        Command::Test(args) => test::execute(&args, config),
        Command::TestAll(args) => test_all::execute(&args, config),
        Command::Doctor(args) => doctor::execute(&args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_a_case_name_is_a_usage_error() {
        assert!(Cli::try_parse_from(["gbx", "test"]).is_err());
    }

    #[test]
    fn test_with_extra_arguments_is_a_usage_error() {
        assert!(Cli::try_parse_from(["gbx", "test", "basic", "broken"]).is_err());
    }

    #[test]
    fn test_with_exactly_one_case_name_parses() {
        let cli = Cli::try_parse_from(["gbx", "test", "basic"]).expect("valid invocation");
        let Command::Test(args) = cli.command else {
            panic!("expected the test subcommand");
        };
        assert_eq!(args.case, "basic");
    }

    #[test]
    fn global_flags_reach_the_harness_config() {
        let cli = Cli::try_parse_from([
            "gbx",
            "--cases-dir",
            "demos/cases",
            "--runtime-bin",
            "podman",
            "test-all",
        ])
        .expect("valid invocation");
        let config = cli.harness_config();
        assert_eq!(config.cases_dir, PathBuf::from("demos/cases"));
        assert_eq!(config.runtime_bin, "podman");
    }
}
