//! REPL command parsing

use liveqa_domain::QuestionId;

const ANON_FLAG: &str = "--anon";

/// One parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    WhoAmI,
    /// Switch the acting identity
    As {
        id: String,
        display_name: Option<String>,
    },
    Start,
    Stop,
    Status,
    List,
    Ask {
        text: String,
        anonymous: bool,
    },
    Edit {
        id: QuestionId,
        text: String,
        anonymous: bool,
    },
    Delete(QuestionId),
    Vote(QuestionId),
    Answer(QuestionId),
    /// Open a push subscription; `None` watches as the acting identity
    Watch(Option<String>),
    Unwatch(String),
}

impl ReplCommand {
    /// Parse one input line. Returns a usage message on malformed input.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "whoami" => Ok(Self::WhoAmI),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "list" | "ls" => Ok(Self::List),
            "as" => {
                let (id, display_name) = split_word(rest);
                let id = required(id, "as <user-id> [display name]")?;
                Ok(Self::As {
                    id: id.to_string(),
                    display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
                })
            }
            "ask" => {
                let (anonymous, text) = take_anon_flag(rest);
                let text = required(text, "ask [--anon] <text>")?;
                Ok(Self::Ask {
                    text: text.to_string(),
                    anonymous,
                })
            }
            "edit" => {
                let (id, rest) = split_word(rest);
                let (anonymous, text) = take_anon_flag(rest);
                let usage = "edit <question-id> [--anon] <text>";
                let id = required(id, usage)?;
                let text = required(text, usage)?;
                Ok(Self::Edit {
                    id: QuestionId::from(id),
                    text: text.to_string(),
                    anonymous,
                })
            }
            "delete" | "rm" => Ok(Self::Delete(question_id(rest, "delete <question-id>")?)),
            "vote" | "upvote" => Ok(Self::Vote(question_id(rest, "vote <question-id>")?)),
            "answer" => Ok(Self::Answer(question_id(rest, "answer <question-id>")?)),
            "watch" => Ok(Self::Watch((!rest.is_empty()).then(|| rest.to_string()))),
            "unwatch" => Ok(Self::Unwatch(
                required(rest, "unwatch <user-id>")?.to_string(),
            )),
            other => Err(format!("Unknown command: {} (type 'help')", other)),
        }
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn take_anon_flag(input: &str) -> (bool, &str) {
    match input.strip_prefix(ANON_FLAG) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            (true, rest.trim())
        }
        _ => (false, input),
    }
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(value)
    }
}

fn question_id(input: &str, usage: &str) -> Result<QuestionId, String> {
    let (id, _) = split_word(input);
    required(id, usage).map(QuestionId::from)
}
