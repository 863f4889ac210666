use clap::Parser;
use std::path::PathBuf;
use task_cli::config::Settings;
use task_cli::console::StdConsole;
use task_cli::App;
use todo_list::TaskService;
use tracing::{Level, info};

/// Menu-driven to-do list kept in memory for a single run.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to task-cli.toml in the working directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Raise logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(configured: Level, verbose: u8) -> Level {
    let requested = match verbose {
        0 => return configured,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Level orders TRACE as the greatest.
    configured.max(requested)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let settings = Settings::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(settings.level()?, args.verbose))
        .init();
    info!(?settings, "starting task-cli");

    let mut app = App::new(StdConsole::new(), TaskService::new(), settings);
    app.run()?;
    Ok(())
}
