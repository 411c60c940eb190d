use crate::demo::{run_audit_report, run_demo, AuditReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sp_roaster::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SP Campaign Roaster",
    about = "Score the structural health of a Sponsored Products account from a bulk sheet",
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
    /// Audit a bulk sheet from the command line
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
    /// Run a CLI demo against a bundled sample bulk sheet
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Generate an account health report and optional campaign listing
    Report(AuditReportArgs),
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
        Command::Audit {
            command: AuditCommand::Report(args),
        } => run_audit_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
