use clap::{Args, Parser, Subcommand};
use ipcrf::error::AppError;

use crate::demo::{run_aggregate, run_demo, AggregateArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "IPCRF Portal",
    about = "Serve the IPCRF rating portal or compute ratings from the command line",
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
    /// Aggregate a rating submission JSON file and print the result
    Aggregate(AggregateArgs),
    /// Rate a sample teacher against the standard catalog and print the summary
    Demo(DemoArgs),
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
        Command::Aggregate(args) => run_aggregate(args),
        Command::Demo(args) => run_demo(args),
    }
}
