//! CLI entrypoint for code-buddy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use buddy_application::{
    ChatSession, ConversationLogger, DocumentIngestor, DocumentRegistry, InferenceClient,
    NoConversationLogger, NoProgress, ProgressNotifier,
};
use buddy_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OllamaGateway, default_extractors,
};
use buddy_presentation::{
    ChatRepl, Cli, Command, ConsoleChannel, ProgressReporter, ReplConfig, SimpleProgress,
    read_selection,
};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting code-buddy");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let model = config.model()?;
    let behavior = config.behavior();

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaGateway::new(&config.ollama.host)?);
    let client = InferenceClient::new(gateway)
        .with_model(model)
        .with_behavior(&behavior);

    let logger = transcript_logger(&config);
    let ingestor = Arc::new(
        DocumentIngestor::new(DocumentRegistry::new())
            .with_extractors(default_extractors())
            .with_conversation_logger(logger.clone()),
    );

    let show_progress = !cli.quiet && config.repl.show_progress;
    let progress: Arc<dyn ProgressNotifier> = if !show_progress {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let session = Arc::new(
        ChatSession::new(client, ingestor.registry().clone())
            .with_ingestor(ingestor)
            .with_progress(progress)
            .with_conversation_logger(logger)
            .with_behavior(&behavior),
    );

    let repl = ReplConfig {
        show_progress,
        history_file: config.repl.history_path(),
    };
    let succeeded = dispatch(cli.resolved_command(), session, repl, &config.ollama.host).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `command` against `session`. Returns false when the command could
/// not produce a successful reply.
async fn dispatch(
    command: Command,
    session: Arc<ChatSession>,
    repl: ReplConfig,
    host: &str,
) -> Result<bool> {
    match command {
        Command::Chat => {
            ChatRepl::new(session).with_config(repl).run().await?;
            Ok(true)
        }
        Command::Models => {
            let models = session.client().available_models().await?;
            if models.is_empty() {
                println!("No models installed on {}", host);
            }
            for model in models {
                let marker = if &model == session.client().model() { "*" } else { " " };
                println!("{} {}", marker, model);
            }
            Ok(true)
        }
        Command::Upload { paths, ask } => {
            session.bind_channel(Arc::new(ConsoleChannel));
            let mut last = None;
            for path in &paths {
                if let Some(name) = session.upload_document(path).await {
                    last = Some(name);
                }
            }
            match (ask, last) {
                (Some(question), Some(document)) => {
                    session.query_document(&document, &question).await;
                    Ok(last_reply_ok(&session))
                }
                (Some(_), None) => bail!("No document was uploaded, nothing to ask about"),
                (None, last) => Ok(last.is_some()),
            }
        }
        command => {
            let (task, source) = command
                .code_task()
                .ok_or_else(|| anyhow!("Unsupported command: {:?}", command))?;
            let code = read_selection(source)
                .with_context(|| format!("Failed to read code from {}", source))?;

            session.bind_channel(Arc::new(ConsoleChannel));
            session.submit_task(task, &code).await?;
            Ok(last_reply_ok(&session))
        }
    }
}

/// Initialize logging based on verbosity level.
///
/// With `log_file`, diagnostics go to that file through a non-blocking
/// writer; the returned guard must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::new(log_level(verbose));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file needs a file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// Command-line flags beat every configuration source.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.ollama.model = model.clone();
    }
    if let Some(host) = &cli.host {
        config.ollama.host = host.clone();
    }
}

fn transcript_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = config.transcript_log_path() else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(&path) {
        Ok(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Transcript log disabled, cannot open {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

/// False if the last transcript entry is an error.
fn last_reply_ok(session: &ChatSession) -> bool {
    !session
        .transcript()
        .last()
        .is_some_and(|message| message.is_error())
}
