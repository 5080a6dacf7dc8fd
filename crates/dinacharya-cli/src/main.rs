use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;
mod render;

#[derive(Parser)]
#[command(name = "dinacharya", version, about = "Dinacharya dosha-aware day planner")]
struct Cli {
    /// Log scheduling decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a day and print the schedule
    Plan(commands::plan::PlanArgs),
    /// Show the dosha phases for a wake/sleep pair
    Phases {
        /// Wake-up time (HH:MM)
        #[arg(long)]
        wake: String,
        /// Sleep time (HH:MM)
        #[arg(long)]
        sleep: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Phases { wake, sleep, json } => commands::phases::run(&wake, &sleep, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run::<Cli>(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
