use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comparison::NotificationCenter;
use route_bench::{
    check_solver, AppContext, BenchConfig, ExportFormat, RunOutcome, TerminalSurface,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "route-bench", about = "Compare route heuristics on a shared point set")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every algorithm against a point set
    Run(RunArgs),
    /// Show the last saved results
    Show,
    /// Delete the saved results
    Clear,
    /// Export the last saved results
    Export {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Check that the solving service is reachable
    Health,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct RunArgs {
    /// Use the built-in 8-point sample
    #[arg(long)]
    sample: bool,
    /// Generate N random points (clamped to 3..=20)
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "8")]
    random: Option<usize>,
    /// Load points from a JSON file written by the point editor
    #[arg(long, value_name = "FILE")]
    points: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = BenchConfig::load(cli.config.as_deref())?;
    info!(
        solver = %config.solver_url,
        state_dir = %config.state_dir.display(),
        pacing_ms = config.pacing_ms,
        "Route benchmark starting"
    );

    let command = match cli.command {
        Command::Health => {
            if check_solver(config.solver_base()).await {
                println!("Solver reachable at {}", config.solver_base());
                return Ok(());
            }
            bail!("Solver not reachable at {}", config.solver_base());
        }
        other => other,
    };

    let notifier = Arc::new(NotificationCenter::new(config.notify_window()));
    let mut app = AppContext::from_config(&config, TerminalSurface::new(), notifier)
        .context("Failed to set up solve client")?;
    let restored = app.restore();

    match command {
        Command::Run(args) => {
            if args.sample {
                app.load_sample();
            } else if let Some(count) = args.random {
                app.generate_random(count, &mut rand::thread_rng());
            } else if let Some(path) = args.points {
                app.load_points(&path)
                    .with_context(|| format!("Failed to load points from {}", path.display()))?;
            } else if app.points().is_empty() {
                app.load_sample();
            }

            match app.run_comparison().await? {
                RunOutcome::Rejected => bail!("Comparison rejected: not enough points"),
                RunOutcome::Completed { completed, failed } => {
                    info!(completed, failed, "Comparison complete");
                }
            }
            print!("{}", app.surface().paint());
        }
        Command::Show => {
            if !restored {
                println!("No saved results");
            } else {
                print!("{}", app.surface().paint());
            }
        }
        Command::Clear => {
            app.clear_results().context("Failed to clear saved results")?;
        }
        Command::Export { out, format } => {
            if !restored {
                bail!("No saved results to export");
            }
            app.export(&out, format)
                .with_context(|| format!("Failed to export to {}", out.display()))?;
        }
        Command::Health => {}
    }

    Ok(())
}
