//! Parsing of REPL input lines into commands.

/// Slash commands offered for completion, in display order.
pub const SLASH_COMMANDS: [&str; 4] = ["/persona", "/personas", "/history", "/help"];

/// What the user asked the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text to submit to the selected persona
    Ask(String),
    /// Select a persona by 1-based number or id
    SelectPersona(String),
    ListPersonas,
    History,
    Help,
    Quit,
    /// Slash command the shell does not know
    Unknown(String),
}

impl Command {
    /// Parses one (possibly multi-line) input.
    ///
    /// Anything that does not start with `/` is a question, passed through
    /// untrimmed; validation happens in the prompt builder.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            return Command::Quit;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Ask(input.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "persona" if !arg.is_empty() => Command::SelectPersona(arg.to_string()),
            "persona" | "personas" => Command::ListPersonas,
            "history" => Command::History,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Joins `\`-continued lines into one multi-line input.
pub fn join_continuations(input: &str) -> String {
    input.replace("\\\r\n", "\n").replace("\\\n", "\n")
}

/// True when the buffer ends with a continuation backslash.
pub fn is_continued(input: &str) -> bool {
    input.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            Command::parse("What is a closure?"),
            Command::Ask("What is a closure?".to_string())
        );
        assert_eq!(Command::parse("   "), Command::Ask("   ".to_string()));
    }

    #[test]
    fn test_quit_variants() {
        for input in ["quit", "exit", " quit ", "/quit", "/exit"] {
            assert_eq!(Command::parse(input), Command::Quit, "{input}");
        }
    }

    #[test]
    fn test_persona_selection() {
        assert_eq!(
            Command::parse("/persona 2"),
            Command::SelectPersona("2".to_string())
        );
        assert_eq!(
            Command::parse("/persona   旅行ガイド "),
            Command::SelectPersona("旅行ガイド".to_string())
        );
        assert_eq!(Command::parse("/persona"), Command::ListPersonas);
        assert_eq!(Command::parse("/personas"), Command::ListPersonas);
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(Command::parse("/history"), Command::History);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(
            Command::parse("/plan"),
            Command::Unknown("/plan".to_string())
        );
    }

    #[test]
    fn test_continuations() {
        assert!(is_continued("first line \\"));
        assert!(!is_continued("first line\\  "));
        assert!(!is_continued("single line"));
        assert_eq!(join_continuations("one\\\ntwo\\\nthree"), "one\ntwo\nthree");
    }
}
