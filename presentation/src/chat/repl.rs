//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::cli::selection::read_selection;
use crate::config::ReplConfig;
use crate::output::console::{ConsoleChannel, ConsoleFormatter};
use buddy_application::ChatSession;
use buddy_domain::TaskKind;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::Path;
use std::sync::Arc;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    /// Plain text for the model
    Message(&'a str),
    /// `/explain`, `/debug` or `/tests` with a file (or `-`)
    Task { task: TaskKind, source: &'a str },
    Upload(&'a str),
    Docs,
    Ask { document: &'a str, question: &'a str },
    History,
    Help,
    Quit,
    /// A known command used without its arguments
    Usage(&'static str),
    Unknown(&'a str),
}

impl<'a> ReplCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return ReplCommand::Message(line);
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        let task = |task: TaskKind, usage: &'static str| {
            if rest.is_empty() {
                ReplCommand::Usage(usage)
            } else {
                ReplCommand::Task { task, source: rest }
            }
        };

        match cmd {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/docs" => ReplCommand::Docs,
            "/explain" => task(TaskKind::Explain, "/explain <file>"),
            "/debug" => task(TaskKind::Debug, "/debug <file>"),
            "/tests" => task(TaskKind::GenerateTests, "/tests <file>"),
            "/upload" if rest.is_empty() => ReplCommand::Usage("/upload <path>"),
            "/upload" => ReplCommand::Upload(rest),
            "/ask" => match rest.split_once(char::is_whitespace) {
                Some((document, question)) if !question.trim().is_empty() => ReplCommand::Ask {
                    document,
                    question: question.trim(),
                },
                _ => ReplCommand::Usage("/ask <document> <question>"),
            },
            _ => ReplCommand::Unknown(cmd),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: Arc<ChatSession>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: Arc<ChatSession>) -> Self {
        Self {
            session,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.session.bind_channel(Arc::new(ConsoleChannel));
        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if self.handle(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }
        self.session.close();

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            code-buddy - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.session.client().model());
        println!("Type /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /explain <file>           - Explain code (use - for stdin)");
        println!("  /debug <file>             - Find bugs and suggest fixes");
        println!("  /tests <file>             - Generate test cases");
        println!("  /upload <path>            - Upload a .txt, .pdf or .docx document");
        println!("  /docs                     - List uploaded documents");
        println!("  /ask <document> <question> - Ask about an uploaded document");
        println!("  /history                  - Show the conversation so far");
        println!("  /help, /h, /?             - Show this help");
        println!("  /quit, /exit, /q          - Exit chat");
        println!();
    }

    /// Execute one command. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand<'_>) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Message(text) => {
                println!();
                self.session.submit_user_message(text).await;
            }
            ReplCommand::Task { task, source } => match read_selection(source) {
                Ok(code) => {
                    println!();
                    if let Err(e) = self.session.submit_task(task, &code).await {
                        eprintln!("{} {}", "error:".red(), e);
                    }
                }
                Err(e) => eprintln!("{} could not read {}: {}", "error:".red(), source, e),
            },
            ReplCommand::Upload(path) => {
                self.session.upload_document(Path::new(path)).await;
            }
            ReplCommand::Docs => {
                let names = self.session.documents().list_names();
                if names.is_empty() {
                    println!("No documents uploaded.");
                } else {
                    println!("{}", ConsoleFormatter::header("Documents"));
                    for name in names {
                        println!("  - {}", name);
                    }
                }
            }
            ReplCommand::Ask { document, question } => {
                println!();
                self.session.query_document(document, question).await;
            }
            ReplCommand::History => {
                println!("{}", ConsoleFormatter::header("History"));
                if self.session.replay_transcript() == 0 {
                    println!("No messages yet.");
                }
            }
            ReplCommand::Usage(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }
}
