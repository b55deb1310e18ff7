use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::command::{SLASH_COMMANDS, is_continued};

const PERSONA_PREFIX: &str = "/persona ";

/// CLI helper for rustyline that provides completion, highlighting, hints and
/// `\` line continuation.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    persona_ids: Vec<String>,
}

impl CliHelper {
    pub fn new(persona_ids: Vec<String>) -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|c| c.to_string()).collect(),
            persona_ids,
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<Pair>) {
        if let Some(arg) = line.strip_prefix(PERSONA_PREFIX) {
            let pairs = self
                .persona_ids
                .iter()
                .filter(|id| id.starts_with(arg))
                .map(|id| Pair {
                    display: id.clone(),
                    replacement: id.clone(),
                })
                .collect();
            return (PERSONA_PREFIX.len(), pairs);
        }

        if line.starts_with('/') && !line.contains(' ') {
            let pairs = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            return (0, pairs);
        }

        (0, vec![])
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        if is_continued(ctx.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}
