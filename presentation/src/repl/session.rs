//! REPL for interactive session control

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use crate::cli::commands::OutputFormat;
use crate::config::{OutputConfig, ReplConfig};
use liveqa_application::QuestionSessionService;
use liveqa_domain::{DomainError, Identity, QuestionView, UserId};
use liveqa_infrastructure::BroadcastHub;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::debug;

const HOST_ID: &str = "host";

/// Interactive console over one live session
pub struct SessionRepl {
    service: QuestionSessionService,
    hub: BroadcastHub,
    output: OutputConfig,
    config: ReplConfig,
    identity: Identity,
    watchers: HashMap<UserId, JoinHandle<()>>,
}

impl SessionRepl {
    pub fn new(service: QuestionSessionService, hub: BroadcastHub) -> Self {
        Self {
            service,
            hub,
            output: OutputConfig::default(),
            config: ReplConfig::default(),
            identity: Identity::from_id(HOST_ID),
            watchers: HashMap::new(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Identity the next command acts as
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome().await;

        loop {
            let prompt = format!("{}> ", self.identity.id);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(ReplCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => {
                            if let Some(output) = self.execute(command).await {
                                println!("{}", output);
                            }
                        }
                        Err(usage) => println!("{}", usage),
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

        self.unwatch_all().await;

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              live-qa session                │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Session: {}",
            ConsoleFormatter::format_state(self.service.state().await)
        );
        println!("Acting as: {} (use 'as <id>' to switch)", self.identity.id);
        println!("Type 'help' for commands.");
        println!();
    }

    fn help() -> String {
        [
            "Commands:",
            "  as <id> [name]               - Act as another user",
            "  whoami                       - Show the acting user",
            "  start | stop                 - Start or stop the session",
            "  status                       - Session state and subscribers",
            "  list                         - List questions",
            "  ask [--anon] <text>          - Submit a question",
            "  edit <id> [--anon] <text>    - Rewrite your question",
            "  delete <id>                  - Delete your question",
            "  vote <id>                    - Upvote a question",
            "  answer <id>                  - Mark a question answered",
            "  watch [user]                 - Subscribe to live updates",
            "  unwatch <user>               - Close a subscription",
            "  quit                         - Exit",
        ]
        .join("\n")
    }

    /// Execute one command and return what to print, if anything.
    pub async fn execute(&mut self, command: ReplCommand) -> Option<String> {
        match command {
            ReplCommand::Help => Some(Self::help()),
            ReplCommand::Quit => None,
            ReplCommand::WhoAmI => Some(format!(
                "{} ({})",
                self.identity.id, self.identity.display_name
            )),
            ReplCommand::As { id, display_name } => {
                self.identity = match display_name {
                    Some(name) => Identity::new(id, name),
                    None => Identity::from_id(id),
                };
                Some(format!("Acting as {}", self.identity.id))
            }
            ReplCommand::Start => {
                if self.service.start_session().await {
                    Some("Session started".to_string())
                } else {
                    Some("Session already running".to_string())
                }
            }
            ReplCommand::Stop => Some(match self.service.stop_session().await {
                Ok(()) => "Session stopped".to_string(),
                Err(e) => self.render_error(&e),
            }),
            ReplCommand::Status => Some(self.status().await),
            ReplCommand::List => {
                let questions = self.service.list_questions(&self.identity.id).await;
                Some(self.render_questions(&questions))
            }
            ReplCommand::Ask { text, anonymous } => {
                let result = self.service.ask(&self.identity, &text, anonymous).await;
                Some(self.render_result(result))
            }
            ReplCommand::Edit {
                id,
                text,
                anonymous,
            } => {
                let result = self
                    .service
                    .update_question(&self.identity, &id, &text, anonymous)
                    .await;
                Some(self.render_result(result))
            }
            ReplCommand::Delete(id) => Some(
                match self.service.delete_question(&self.identity, &id).await {
                    Ok(()) => format!("Deleted {}", id),
                    Err(e) => self.render_error(&e),
                },
            ),
            ReplCommand::Vote(id) => {
                let result = self.service.upvote(&self.identity, &id).await;
                Some(self.render_result(result))
            }
            ReplCommand::Answer(id) => {
                let result = self.service.mark_answered(&self.identity, &id).await;
                Some(self.render_result(result))
            }
            ReplCommand::Watch(user) => Some(self.watch(user)),
            ReplCommand::Unwatch(user) => Some(self.unwatch(&UserId::new(user)).await),
        }
    }

    async fn status(&self) -> String {
        let state = self.service.state().await;
        let revision = self.hub.latest_revision().unwrap_or(0);
        let mut watched: Vec<_> = self
            .watchers
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(user, _)| user.to_string())
            .collect();
        watched.sort();

        format!(
            "Session: {} (revision {})\nSubscribers: {}\nWatching: {}",
            ConsoleFormatter::format_state(state),
            revision,
            self.hub.subscriber_count(),
            if watched.is_empty() {
                "-".to_string()
            } else {
                watched.join(", ")
            }
        )
    }

    fn watch(&mut self, user: Option<String>) -> String {
        let identity = match user {
            Some(id) if id != self.identity.id.as_str() => Identity::from_id(id),
            _ => self.identity.clone(),
        };

        if let Some(handle) = self.watchers.get(&identity.id)
            && !handle.is_finished()
        {
            return format!("Already watching as {}", identity.id);
        }

        let mut subscription = self.hub.subscribe(&identity);
        let format = self.output.format;
        let watcher = identity.id.clone();
        debug!("Console: watching as {} ({})", watcher, subscription.id());

        let handle = tokio::spawn(async move {
            while let Some(update) = subscription.recv().await {
                match format {
                    OutputFormat::Pretty => {
                        println!("{}", ConsoleFormatter::format_update(&watcher, &update))
                    }
                    OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&update)),
                }
            }
            println!("[watch {}] stream closed", watcher);
        });
        self.watchers.insert(identity.id.clone(), handle);

        format!("Watching as {}", identity.id)
    }

    async fn unwatch(&mut self, user: &UserId) -> String {
        match self.watchers.remove(user) {
            Some(handle) => {
                handle.abort();
                // Cancelled task drops its subscription before the join resolves.
                let _ = handle.await;
                format!("Stopped watching as {}", user)
            }
            None => format!("Not watching as {}", user),
        }
    }

    async fn unwatch_all(&mut self) {
        for (_, handle) in self.watchers.drain() {
            handle.abort();
            let _ = handle.await;
        }
    }

    fn render_result(&self, result: Result<QuestionView, DomainError>) -> String {
        match result {
            Ok(question) => match self.output.format {
                OutputFormat::Pretty => ConsoleFormatter::format_question(&question),
                OutputFormat::Json => ConsoleFormatter::format_json(&question),
            },
            Err(e) => self.render_error(&e),
        }
    }

    fn render_questions(&self, questions: &[QuestionView]) -> String {
        match self.output.format {
            OutputFormat::Pretty => ConsoleFormatter::format_questions(questions),
            OutputFormat::Json => ConsoleFormatter::format_json(&questions),
        }
    }

    fn render_error(&self, error: &DomainError) -> String {
        match self.output.format {
            OutputFormat::Pretty => ConsoleFormatter::format_error(error),
            OutputFormat::Json => ConsoleFormatter::format_json(&serde_json::json!({
                "status": error.status_code(),
                "error": error.to_string(),
            })),
        }
    }
}
