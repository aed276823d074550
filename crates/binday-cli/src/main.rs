use std::path::PathBuf;

use binday_core::DateKey;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "binday", version, about = "Collection-day reminders with streak points")]
struct Cli {
    /// Settings file (defaults to ~/.config/binday/settings.toml)
    #[arg(long, global = true, env = "BINDAY_SETTINGS")]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<DateKey>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// What is due today
    Today,
    /// Upcoming collection days
    Upcoming(commands::upcoming::UpcomingArgs),
    /// Current streak points
    Points(commands::points::PointsArgs),
    /// Report today's (or a given day's) collection as done
    Done(commands::done::DoneArgs),
    /// Completion history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Collection rule management
    Rule {
        #[command(subcommand)]
        action: commands::rule::RuleAction,
    },
    /// Monthly stamp card
    Card(commands::card::CardArgs),
    /// Export the schedule
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BINDAY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let ctx = match commands::Context::new(cli.config, cli.today, cli.json) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Today => commands::today::run(&ctx),
        Commands::Upcoming(args) => commands::upcoming::run(&ctx, args),
        Commands::Points(args) => commands::points::run(&ctx, args),
        Commands::Done(args) => commands::done::run(&ctx, args),
        Commands::History { action } => commands::history::run(&ctx, action),
        Commands::Rule { action } => commands::rule::run(&ctx, action),
        Commands::Card(args) => commands::card::run(&ctx, args),
        Commands::Export { action } => commands::export::run(&ctx, action),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "binday", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
