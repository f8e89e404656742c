//! `gbx build` — Stage the grader payload and build the autograder image.

use std::time::Instant;

use clap::Args;

use gradebox_common::config::HarnessConfig;
use gradebox_image::cache::BuildCache;
use gradebox_image::context::BuildContext;
use gradebox_runtime::backend;

use crate::output::{BOLD, DIM, GREEN, RESET};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the grader payload.
    #[arg(default_value = "source")]
    pub payload: String,

    /// Base image for the rendered Dockerfile.
    #[arg(long, default_value = gradebox_common::constants::DEFAULT_BASE_IMAGE)]
    pub base_image: String,

    /// OS packages the setup script installs.
    #[arg(long = "apt-package")]
    pub apt_packages: Vec<String>,

    /// Development-only packages, rendered into a separate script.
    #[arg(long = "dev-package")]
    pub dev_packages: Vec<String>,

    /// Python requirements manifest inside the payload.
    #[arg(long)]
    pub requirements: Option<String>,

    /// Rebuild even when the staged context is unchanged.
    #[arg(long)]
    pub force: bool,
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if staging fails or the image build fails.
pub fn execute(args: &BuildArgs, config: &HarnessConfig) -> anyhow::Result<i32> {
    let started = Instant::now();

    let mut context = BuildContext::new(&args.payload, &args.base_image);
    context.plan.apt_packages.clone_from(&args.apt_packages);
    context.plan.dev_packages.clone_from(&args.dev_packages);
    context.plan.requirements.clone_from(&args.requirements);

    let staging = tempfile::Builder::new()
        .prefix("gradebox-build-")
        .tempdir()?;
    let digest = context.stage(staging.path())?;
    tracing::info!(digest = %digest, "staged build context");

    let cache = BuildCache::open(gradebox_common::constants::data_dir())?;
    if !args.force && cache.lookup(&config.image)? == Some(digest.clone()) {
        eprintln!(
            "  {BOLD}{}{RESET} is up to date {DIM}({digest}){RESET}",
            config.image
        );
        return Ok(0);
    }

    let runtime = backend::detect_runtime(&config.runtime_bin);
    runtime.build_image(staging.path(), &config.image)?;
    cache.record(&config.image, &digest)?;

    eprintln!(
        "  {GREEN}{BOLD}Built {}{RESET} in {:.1}s",
        config.image,
        started.elapsed().as_secs_f64()
    );
    Ok(0)
}
