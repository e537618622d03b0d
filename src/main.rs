use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use releaser::boundary::BoundaryWarning;
use releaser::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use releaser::config;
use releaser::gitlab::GitLabClient;
use releaser::ui;

#[derive(clap::Parser)]
#[command(
    name = "releaser",
    about = "Create GitLab releases with changelogs and archives from repository tags"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Release a tag: changelog, archive, upload, release and asset link
    Release {
        #[arg(long, help = "Version to release (defaults to the latest tag)")]
        version: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Release { version } => release(args.config.as_deref(), version),
    }
}

/// Diagnostics go to stderr, filtered by RUST_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn release(config_path: Option<&str>, version: Option<String>) -> Result<()> {
    let config = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let client = match GitLabClient::new(&config.gitlab.url, config.gitlab.token.clone()) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let args = ReleaseWorkflowArgs {
        version,
        ..ReleaseWorkflowArgs::default()
    };

    match run_release_workflow(&args, &config, &client) {
        Ok(result) => {
            report(&result);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn report(result: &WorkflowResult) {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    let link_failed = result
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::AssetLinkFailed { .. }));
    if !link_failed {
        ui::display_success(&format!("Archive linked: {}", result.asset_url));
    }
    println!(
        "\n{} Release {} created for tag {}\n",
        console::style("✓").green(),
        result.version,
        result.tag_name
    );
}
