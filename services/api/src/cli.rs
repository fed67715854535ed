use crate::render::{run_import, run_score, ImportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use prakriti::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "prakriti",
    about = "Score Ayurvedic constitution intakes and serve the patient assessment API",
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
    /// Score a single intake questionnaire stored as JSON
    Score(ScoreArgs),
    /// Score every row of a CSV intake export
    Import(ImportArgs),
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
        Command::Score(args) => run_score(args),
        Command::Import(args) => run_import(args),
    }
}
