use crate::analyze::{run_analysis, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use deal_analyzer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Analyzer",
    about = "Score real-estate deals from the command line or over HTTP",
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
    /// Score a single deal and print the analysis
    Analyze(AnalyzeArgs),
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
        Command::Analyze(args) => run_analysis(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["deal-analyzer-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_accepts_deal_figures() {
        let cli = Cli::try_parse_from([
            "deal-analyzer-api",
            "analyze",
            "--price",
            "250000",
            "--arv",
            "350000",
            "--repairs",
            "40000",
            "--offline",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.price, 250_000.0);
                assert_eq!(args.arv, Some(350_000.0));
                assert_eq!(args.rent, None);
                assert!(args.offline);
            }
            other => panic!("expected analyze command, got {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_price() {
        assert!(Cli::try_parse_from(["deal-analyzer-api", "analyze", "--rent", "1800"]).is_err());
    }
}
