use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qualifier::settings::{AppSettings, EngineKind};
use qualifier::{build_engine, terminal};
use qualifier_flow::ConversationSession;
use tokio::io::BufReader;

/// Screens a prospective customer through the qualification chat.
#[derive(Debug, Parser)]
#[command(name = "qualifier", version)]
struct Args {
    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the engine chosen in settings.
    #[arg(long, value_enum)]
    engine: Option<EngineKind>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the chat on stdout.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut settings = AppSettings::load(args.config.as_deref());
    if let Some(engine) = args.engine {
        settings.engine = engine;
    }

    let engine = match build_engine(&settings) {
        Ok(engine) => engine,
        Err(error) => {
            tracing::error!(error = %error, "configuration error, conversation cannot start");
            return ExitCode::FAILURE;
        }
    };

    let mut session = ConversationSession::new(engine, settings.typing.to_delay());
    let result = terminal::run_chat(
        &mut session,
        &settings.contact.agent_name,
        &settings.contact.link(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "chat terminated");
            ExitCode::FAILURE
        }
    }
}
