use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payment_customization::config::ServeConfig;
use payment_customization::interfaces::{function, http};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the admin configuration UI
    Serve(ServeConfig),
    /// Evaluate the checkout function on an input document
    Run {
        /// Function input JSON file. Reads stdin when omitted.
        input: Option<PathBuf>,
    },
}

fn init_tracing() {
    // Logs go to stderr so the function output on stdout stays a single JSON document.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Serve(config) => {
            let app = http::router(config.service().into_diagnostic()?);
            let listener = tokio::net::TcpListener::bind(config.listen)
                .await
                .into_diagnostic()?;
            tracing::info!(
                "Admin UI listening on http://{}/app (in-memory: {})",
                config.listen,
                config.in_memory
            );
            axum::serve(listener, app).await.into_diagnostic()?;
        }
        Command::Run { input } => {
            let stdout = io::stdout();
            match input {
                Some(path) => {
                    let file = File::open(path).into_diagnostic()?;
                    function::execute(file, stdout.lock()).into_diagnostic()?;
                }
                None => {
                    function::execute(io::stdin().lock(), stdout.lock()).into_diagnostic()?;
                }
            }
        }
    }

    Ok(())
}
