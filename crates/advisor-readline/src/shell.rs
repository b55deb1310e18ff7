//! Command execution for the interaction shell.
//!
//! Output goes to any `Write` sink so the shell can be driven in tests.

use std::io::{self, Write};

use advisor_core::{AdvisorError, Persona};
use advisor_interaction::AdvisorSession;
use colored::Colorize;

use crate::command::Command;
use crate::render;

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    session: AdvisorSession,
}

impl Shell {
    pub fn new(session: AdvisorSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &AdvisorSession {
        &self.session
    }

    /// Prints the title, usage and current persona.
    pub fn greet(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", render::banner())?;
        writeln!(out)?;
        writeln!(out, "{}", render::selected_persona(self.session.selected_persona()))
    }

    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Quit => {
                writeln!(out, "{}", "Goodbye!".bright_green())?;
                return Ok(Flow::Exit);
            }
            Command::Ask(text) => self.ask(&text, out).await?,
            Command::SelectPersona(arg) => match self.select(&arg) {
                Ok(persona) => writeln!(out, "{}", render::selected_persona(persona))?,
                Err(err) => writeln!(out, "{}", render::error(&err))?,
            },
            Command::ListPersonas => write!(
                out,
                "{}",
                render::persona_list(self.session.personas(), self.session.selected_persona())
            )?,
            Command::History => {
                let entries = self.session.transcript().all();
                if entries.is_empty() {
                    writeln!(out, "{}", "No history yet".bright_black())?;
                } else {
                    write!(out, "{}", render::transcript(entries))?;
                }
            }
            Command::Help => write!(out, "{}", render::usage())?,
            Command::Unknown(input) => {
                writeln!(out, "{}", format!("Unknown command: {input}").bright_black())?
            }
        }
        Ok(Flow::Continue)
    }

    async fn ask(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render::GENERATING.bright_black())?;
        out.flush()?;

        match self.session.submit(text).await {
            Ok(entry) => write!(out, "{}", render::answer(&entry.answer)),
            Err(err) => writeln!(out, "{}", render::error(&err)),
        }
    }

    /// Selects by exact id, falling back to a 1-based position.
    fn select(&mut self, arg: &str) -> Result<&Persona, AdvisorError> {
        let registry = self.session.registry();
        let id = match registry.get(arg) {
            Ok(persona) => persona.id.clone(),
            Err(_) => arg
                .parse::<usize>()
                .ok()
                .and_then(|position| registry.get_by_position(position))
                .map(|persona| persona.id.clone())
                .ok_or_else(|| AdvisorError::unknown_persona(arg))?,
        };
        self.session.select_persona(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{CompletionClient, Exchange, PersonaRegistry, Result};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct StubClient {
        results: Mutex<VecDeque<Result<String>>>,
    }

    #[async_trait::async_trait]
    impl CompletionClient for StubClient {
        fn model(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _exchange: &Exchange) -> Result<String> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AdvisorError::service_unavailable("no more answers")))
        }
    }

    fn shell(results: Vec<Result<String>>) -> Shell {
        shell_with(PersonaRegistry::builtin(), results)
    }

    fn shell_with(registry: PersonaRegistry, results: Vec<Result<String>>) -> Shell {
        colored::control::set_override(false);
        let client = Arc::new(StubClient {
            results: Mutex::new(results.into()),
        });
        Shell::new(AdvisorSession::new(Arc::new(registry), client))
    }

    async fn run(shell: &mut Shell, input: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = shell.execute(Command::parse(input), &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_ask_renders_answer_and_records_it() {
        let mut shell = shell(vec![Ok("A closure is...".to_string())]);

        let (flow, out) = run(&mut shell, "What is a closure?").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.contains(render::GENERATING));
        assert!(out.contains("回答:\nA closure is...\n"));
        assert_eq!(shell.session().transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_renders_error_kind_only() {
        let mut shell = shell(vec![Err(AdvisorError::service_unavailable("HTTP 503"))]);

        let (flow, out) = run(&mut shell, "question").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("[ServiceUnavailableError]"));
        assert!(shell.session().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_select_by_position_and_id() {
        let mut shell = shell(Vec::new());

        let (_, out) = run(&mut shell, "/persona 2").await;
        assert!(out.contains("栄養士に質問します"));
        assert_eq!(shell.session().selected_persona().id, "栄養士");

        let (_, out) = run(&mut shell, "/persona 旅行ガイド").await;
        assert!(out.contains("旅行ガイドに質問します"));

        let (_, out) = run(&mut shell, "/persona 9").await;
        assert!(out.contains("[UnknownPersonaError]"));
        assert_eq!(shell.session().selected_persona().id, "旅行ガイド");
    }

    #[tokio::test]
    async fn test_numeric_id_wins_over_position() {
        let registry =
            PersonaRegistry::with_extra(vec![Persona::new("2", "あなたは二番目の相談役です。")])
                .unwrap();
        let mut shell = shell_with(registry, Vec::new());

        let (_, out) = run(&mut shell, "/persona 2").await;
        assert!(out.contains("2に質問します"));
        assert_eq!(shell.session().selected_persona().id, "2");

        // Built-in personas are still reachable by position
        run(&mut shell, "/persona 3").await;
        assert_eq!(shell.session().selected_persona().id, "金融アドバイザー");

        // The extra persona sits at position 5
        run(&mut shell, "/persona 5").await;
        assert_eq!(shell.session().selected_persona().id, "2");
    }

    #[tokio::test]
    async fn test_history_after_two_personas() {
        let mut shell = shell(vec![Ok("a1".to_string()), Ok("a2".to_string())]);

        run(&mut shell, "q1").await;
        run(&mut shell, "/persona 4").await;
        run(&mut shell, "q2").await;
        let (_, out) = run(&mut shell, "/history").await;

        let first = out.find("質問 1 (プログラミング講師)").unwrap();
        let second = out.find("質問 2 (旅行ガイド)").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected_without_request() {
        let mut shell = shell(Vec::new());
        let (_, out) = run(&mut shell, "   ").await;
        assert!(out.contains("[EmptyInputError]"));
    }

    #[tokio::test]
    async fn test_quit_exits() {
        let mut shell = shell(Vec::new());
        let (flow, _) = run(&mut shell, "quit").await;
        assert_eq!(flow, Flow::Exit);
    }
}
