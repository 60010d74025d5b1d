use crate::demo::{run_demo, run_policy_cancellation, CancellationArgs, DemoArgs};
use crate::error::AppError;
use crate::server;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Community Trust Policy Engine",
    about = "Demonstrate and run the community trust policy engine from the command line",
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
    /// Evaluate trust policies offline for support tooling
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
    /// Run an end-to-end CLI demo covering the trust policy surfaces
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Evaluate a cancellation against the penalty windows
    Cancellation(CancellationArgs),
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
        Command::Policy {
            command: PolicyCommand::Cancellation(args),
        } => run_policy_cancellation(args),
        Command::Demo(args) => run_demo(args),
    }
}
