mod command;
mod helper;
mod logging;
mod render;
mod shell;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use advisor_infrastructure::{ApiKey, ConfigStorage, model_override};
use advisor_interaction::{AdvisorSession, build_completion_client};

use crate::command::{Command, join_continuations};
use crate::helper::CliHelper;
use crate::shell::{Flow, Shell};

/// The main entry point for the advisor REPL.
///
/// Sets up logging and configuration, starts one session, then reads and
/// executes commands until the user quits. Each question is answered before
/// the next line is read.
#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init_with_dotenv();

    // ===== Backend Initialization =====
    let mut config = ConfigStorage::load_default()?;
    if let Some(model) = model_override() {
        config.completion.model = model;
    }

    let registry = Arc::new(config.persona_registry()?);
    let client = build_completion_client(&config.completion, ApiKey::from_env())?;
    let session = AdvisorSession::new(Arc::clone(&registry), client);
    let session_id = session.session_id().to_string();
    let mut shell = Shell::new(session);

    // ===== REPL Setup =====
    let persona_ids = registry.list_personas().iter().map(|p| p.id.clone()).collect();
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(persona_ids)));

    let mut stdout = io::stdout();
    shell.greet(&mut stdout)?;
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                // Bare Enter re-prompts; whitespace-only input is rejected by the session
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line.as_str());
                let input = join_continuations(&line);

                if shell.execute(Command::parse(&input), &mut stdout).await? == Flow::Exit {
                    break;
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::info!(
        session_id = %session_id,
        entries = shell.session().transcript().len(),
        "Session ended"
    );

    Ok(())
}
