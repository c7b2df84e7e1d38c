//! Console output formatter for session data

use colored::Colorize;
use liveqa_domain::{DomainError, QuestionView, SessionState, SessionUpdate, UserId};
use serde::Serialize;

/// Formats questions and push updates for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one question as a single line
    pub fn format_question(question: &QuestionView) -> String {
        let votes = format!("{:>3}", question.votes).yellow().bold();
        let text = if question.answered {
            question.text.dimmed().strikethrough().to_string()
        } else {
            question.text.clone()
        };

        let mut tags = Vec::new();
        if question.owned {
            tags.push("mine".green().to_string());
        }
        if question.anonymous {
            tags.push("anon".magenta().to_string());
        }
        if question.answered {
            tags.push("answered".blue().to_string());
        }

        let author = if question.creator_display.is_empty() {
            "anonymous".dimmed().to_string()
        } else {
            question.creator_display.clone()
        };

        let mut line = format!("{} {} {}", votes, question.id.as_str().dimmed(), text);
        line.push_str(&format!(" {}", format!("({})", author).dimmed()));
        if !tags.is_empty() {
            line.push_str(&format!(" [{}]", tags.join(", ")));
        }
        line
    }

    /// Format a question list in the order given
    pub fn format_questions(questions: &[QuestionView]) -> String {
        if questions.is_empty() {
            return format!("{}", "  (no questions)".dimmed());
        }
        questions
            .iter()
            .map(Self::format_question)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a push update received by `watcher`
    pub fn format_update(watcher: &UserId, update: &SessionUpdate) -> String {
        let mut output = format!(
            "{} {} {}\n",
            format!("[watch {}]", watcher).cyan().bold(),
            format!("revision {}", update.revision).dimmed(),
            Self::format_state(update.state)
        );
        output.push_str(&Self::indent(&Self::format_questions(&update.questions), "  "));
        output
    }

    pub fn format_state(state: SessionState) -> String {
        match state {
            SessionState::Running => state.as_str().green().bold().to_string(),
            SessionState::Stopped => state.as_str().red().bold().to_string(),
            SessionState::NotStarted => state.as_str().dimmed().to_string(),
        }
    }

    /// Format a rejected operation with its boundary status code
    pub fn format_error(error: &DomainError) -> String {
        format!(
            "{} {}",
            format!("error {}:", error.status_code()).red().bold(),
            error
        )
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
