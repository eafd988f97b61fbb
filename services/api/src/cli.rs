use crate::check::{run_check_path, run_check_unit, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use combinability_scoreboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Combinability Scoreboard",
    about = "Validate fare combinations against Record 2 Category 10 rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a pricing document from disk and print the verdict
    Check {
        #[command(subcommand)]
        command: CheckCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CheckCommand {
    /// Run the intra-unit pass over one pricing unit
    Unit(CheckArgs),
    /// Validate every unit of a fare path, then run the cross-unit pass
    Path(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check {
            command: CheckCommand::Unit(args),
        } => run_check_unit(args),
        Command::Check {
            command: CheckCommand::Path(args),
        } => run_check_path(args),
    }
}
