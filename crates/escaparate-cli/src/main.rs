//! Escaparate CLI: run the storefront scenario suite.
//!
//! ## Usage
//!
//! ```bash
//! escaparate run                         # run every scenario headless
//! escaparate run --filter auth::         # only the authentication flows
//! escaparate run --json report.json      # also write a JSON report
//! escaparate list                        # print the registry
//! ```

use clap::{Args, Parser, Subcommand};
use escaparate_cli::{logging, scenarios, CliError, CliResult, ProgressReporter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "escaparate",
    version,
    about = "Browser-driven e2e scenarios against a live storefront"
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print failures
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run scenarios against the live storefront
    Run(RunArgs),
    /// List scenarios without running them
    List,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Only scenarios whose group::name contains this string
    #[arg(short, long)]
    filter: Option<String>,

    /// Storefront entry point
    #[arg(long, env = "ESCAPARATE_BASE_URL")]
    base_url: Option<String>,

    /// Stop after the first failing scenario
    #[arg(long)]
    fail_fast: bool,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Directory for failure screenshots
    #[arg(long, default_value = "target/escaparate")]
    artifacts_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<bool> {
    match cli.command {
        Commands::List => {
            for scenario in scenarios::all() {
                println!("{}", scenario.qualified_name());
            }
            Ok(true)
        }
        Commands::Run(ref args) => run_suite(&cli, args).await,
    }
}

#[cfg(feature = "browser")]
async fn run_suite(cli: &Cli, args: &RunArgs) -> CliResult<bool> {
    use escaparate::{Browser, BrowserConfig, PageFactory, Runner, SuiteConfig};
    use std::sync::Arc;

    let mut config = SuiteConfig::from_env();
    if let Some(ref base_url) = args.base_url {
        config.base_url.clone_from(base_url);
    }
    config.headless = !args.headed;

    let selected = scenarios::filtered(args.filter.as_deref());
    if selected.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "no scenario matches filter {:?}",
            args.filter.as_deref().unwrap_or("")
        )));
    }

    tracing::info!(
        scenarios = selected.len(),
        base_url = %config.base_url,
        "starting suite"
    );

    let browser_config = BrowserConfig::default()
        .with_headless(config.headless)
        .with_viewport(config.viewport_width, config.viewport_height);
    let browser = Arc::new(Browser::launch(browser_config).await?);

    let factory: PageFactory = {
        let browser = Arc::clone(&browser);
        Box::new(move || {
            let browser = Arc::clone(&browser);
            Box::pin(async move { browser.new_page().await })
        })
    };

    let mut reporter = ProgressReporter::new(!cli.no_color, cli.quiet);
    reporter.start_progress(selected.len() as u64, "running scenarios");

    let mut runner = Runner::new(config.clone()).with_artifacts_dir(&args.artifacts_dir);
    if args.fail_fast {
        runner = runner.with_fail_fast();
    }

    let suite = runner
        .run("storefront", &selected, &factory, |report| {
            reporter.scenario(report);
        })
        .await;

    reporter.finish_progress();
    reporter.summary(&suite);

    if let Some(ref path) = args.json {
        suite.write_json(path).map_err(CliError::Harness)?;
        reporter.info(&format!("report written to {}", path.display()));
    }

    drop(factory);
    if let Ok(browser) = Arc::try_unwrap(browser) {
        let _ = browser.close().await;
    }

    Ok(suite.all_green())
}

#[cfg(not(feature = "browser"))]
async fn run_suite(_cli: &Cli, _args: &RunArgs) -> CliResult<bool> {
    Err(CliError::invalid_argument(
        "browser control not enabled. Rebuild with --features browser",
    ))
}
