use crate::generate::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use seo_report::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SEO Report Service",
    about = "Assemble and render SEO reports over HTTP or from payload files",
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
    /// Assemble a report from a payload file and write the rendered outputs
    Report(ReportArgs),
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
        Command::Report(args) => run_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["seo-report-api"]).expect("parses without arguments");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_command_parses_output_flags() {
        let cli = Cli::try_parse_from([
            "seo-report-api",
            "report",
            "--input",
            "payload.json",
            "--output",
            "out/report.html",
            "--pdf",
            "out/report.pdf",
        ])
        .expect("report arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.input.to_str(), Some("payload.json"));
                assert_eq!(
                    args.pdf.as_deref().and_then(|path| path.to_str()),
                    Some("out/report.pdf")
                );
                assert!(args.json.is_none());
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }
}
