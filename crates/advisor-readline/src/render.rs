//! Text rendering for the REPL.
//!
//! Every function returns the text to print so output can be checked in tests.

use advisor_core::{AdvisorError, Persona, TranscriptEntry};
use chrono::Local;
use colored::Colorize;

pub const TITLE: &str = "専門家AIアシスタント";
pub const GENERATING: &str = "AIが回答を生成中...";

pub fn banner() -> String {
    let mut out = format!("{}\n", format!("=== {} ===", TITLE).bright_magenta().bold());
    out.push_str(&usage());
    out
}

pub fn usage() -> String {
    let lines = [
        "アプリの使い方",
        "1. /personas で専門家の一覧を表示し、/persona <番号または名前> で相談したい専門家を選択してください",
        "2. 質問を入力してください (行末に \\ を付けると改行して続けられます)",
        "3. Enter で送信すると、選択した専門家としてAIが回答します",
        "/history で過去の会話履歴、/help でこの説明を表示します。quit で終了します。",
    ];
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!("{}\n", line.bright_black()));
    }
    out
}

/// "<persona>に質問します"
pub fn selected_persona(persona: &Persona) -> String {
    format!("{}", format!("{}に質問します", persona.id).bright_yellow().bold())
}

/// Numbered persona list, marking the selected one.
pub fn persona_list(personas: &[Persona], selected: &Persona) -> String {
    let mut out = format!("{}\n", "相談したい専門家を選んでください：".bright_yellow());
    for (index, persona) in personas.iter().enumerate() {
        let line = format!("{}. {}", index + 1, persona.id);
        if persona.id == selected.id {
            out.push_str(&format!("{} {}\n", "*".green(), line.green().bold()));
        } else {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

pub fn answer(text: &str) -> String {
    let mut out = format!("{}\n", "回答:".bright_cyan().bold());
    for line in text.lines() {
        out.push_str(&format!("{}\n", line.bright_blue()));
    }
    out
}

/// Transcript in chronological order; empty when there is nothing recorded.
///
/// Each question header carries the local time the answer arrived.
pub fn transcript(entries: &[TranscriptEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = format!("{}\n", "過去の会話履歴".bright_magenta().bold());
    for (index, entry) in entries.iter().enumerate() {
        let number = index + 1;
        out.push_str(&format!(
            "{} ({}) {}\n",
            format!("質問 {number}").bold(),
            entry.persona_id.bright_magenta(),
            answered_at(entry).bright_black()
        ));
        for line in entry.question.lines() {
            out.push_str(&format!("> {}\n", line.green()));
        }
        out.push_str(&format!("{}\n", format!("回答 {number}").bold()));
        for line in entry.answer.lines() {
            out.push_str(&format!("{}\n", line.bright_blue()));
        }
        out.push_str("---\n");
    }
    out
}

fn answered_at(entry: &TranscriptEntry) -> String {
    entry
        .answered_at
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

pub fn error(err: &AdvisorError) -> String {
    format!("{}", format!("[{}] {}", err.kind(), err).red())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_transcript_format() {
        plain();
        let first_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let second_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 31, 15).unwrap();
        let entries = vec![
            TranscriptEntry {
                answered_at: first_at,
                ..TranscriptEntry::new("プログラミング講師", "What is a closure?", "A closure is...")
            },
            TranscriptEntry {
                answered_at: second_at,
                ..TranscriptEntry::new("栄養士", "朝食は\n必要？", "はい。")
            },
        ];
        let first = first_at.with_timezone(&Local).format("%H:%M:%S");
        let second = second_at.with_timezone(&Local).format("%H:%M:%S");

        let out = transcript(&entries);
        let expected = format!(
            "過去の会話履歴\n\
            質問 1 (プログラミング講師) {first}\n\
            > What is a closure?\n\
            回答 1\n\
            A closure is...\n\
            ---\n\
            質問 2 (栄養士) {second}\n\
            > 朝食は\n\
            > 必要？\n\
            回答 2\n\
            はい。\n\
            ---\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_transcript_renders_nothing() {
        assert_eq!(transcript(&[]), "");
    }

    #[test]
    fn test_persona_list_marks_selection() {
        plain();
        let personas = vec![Persona::new("栄養士", "a"), Persona::new("旅行ガイド", "b")];
        let out = persona_list(&personas, &personas[1]);
        assert!(out.contains("  1. 栄養士\n"));
        assert!(out.contains("* 2. 旅行ガイド\n"));
    }

    #[test]
    fn test_error_shows_kind() {
        plain();
        let out = error(&AdvisorError::rate_limit("HTTP 429: slow down", None));
        assert_eq!(out, "[RateLimitError] Rate limited: HTTP 429: slow down");
    }

    #[test]
    fn test_selected_persona_banner() {
        plain();
        assert_eq!(
            selected_persona(&Persona::new("旅行ガイド", "b")),
            "旅行ガイドに質問します"
        );
    }
}
