use chrono::NaiveDateTime;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::models::availability::weekly_summary;
use crate::models::{Message, Prompt, Sender};
use crate::services::controller::{
    ConversationController, DateConfirmation, QuickReplyOutcome, TurnOutcome,
};

const SELECTION_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

pub const HELP_TEXT: &str = "Commands:
  <text>                     send a message
  /<n>                       pick quick reply number n
  /date YYYY-MM-DD HH:MM     confirm an appointment time
  /hours                     show clinic hours
  /help                      show this help
  /quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    QuickReply(usize),
    Date(String),
    Hours,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Send(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    if let Ok(n) = name.parse::<usize>() {
        return Command::QuickReply(n);
    }

    match name {
        "date" => Command::Date(arg.to_string()),
        "hours" => Command::Hours,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name.to_string()),
    }
}

/// Parses what a user types into the date picker.
pub fn parse_selection(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    SELECTION_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn render_message(message: &Message) -> String {
    match message.sender {
        Sender::Bot => format!("bot> {}", message.text),
        Sender::User => format!("you> {}", message.text),
    }
}

pub fn render_prompt(prompt: &Prompt) -> String {
    match prompt {
        Prompt::QuickReplies(options) => options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("  [/{}] {option}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
        Prompt::DatePicker(picker) => format!(
            "  pick a date with /date YYYY-MM-DD HH:MM (earliest {})",
            picker.min_selectable.format("%Y-%m-%d %H:%M")
        ),
    }
}

pub const TYPING_INDICATOR: &str = "bot> ...";

/// Tracks what has already been printed so each refresh only emits new output.
#[derive(Debug, Default)]
pub struct Screen {
    printed_messages: usize,
    printed_prompt: Option<Prompt>,
}

impl Screen {
    pub fn refresh(&mut self, controller: &ConversationController) -> Vec<String> {
        let mut lines: Vec<String> = controller.transcript()[self.printed_messages..]
            .iter()
            .map(render_message)
            .collect();
        self.printed_messages = controller.transcript().len();

        let current = controller.prompt().cloned();
        if current != self.printed_prompt {
            if let Some(prompt) = &current {
                lines.push(render_prompt(prompt));
            }
            self.printed_prompt = current;
        }

        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineResult {
    Continue(Vec<String>),
    Quit,
}

fn notices_for(outcome: TurnOutcome) -> Vec<String> {
    match outcome {
        TurnOutcome::Busy => vec!["(still waiting for the previous reply)".to_string()],
        _ => vec![],
    }
}

/// Whether `command` will put a request in flight, so the typing indicator
/// is only printed for lines that reach the backend.
fn sends_request(command: &Command, controller: &ConversationController) -> bool {
    if controller.is_awaiting_reply() {
        return false;
    }

    match command {
        Command::Send(text) => !text.is_empty(),
        Command::QuickReply(n) => controller
            .quick_replies()
            .zip(n.checked_sub(1))
            .map(|(options, i)| i < options.len())
            .unwrap_or(false),
        Command::Date(raw) => match (controller.date_picker(), parse_selection(raw)) {
            (Some(picker), Some(dt)) => {
                picker.accepts(&dt) && controller.hours_policy().evaluate(&dt).is_open
            }
            _ => false,
        },
        _ => false,
    }
}

/// Runs one input line against the controller and returns lines to print.
pub async fn handle_line(
    controller: &mut ConversationController,
    screen: &mut Screen,
    line: &str,
) -> LineResult {
    let command = parse_command(line);

    let mut notices = match command {
        Command::Quit => return LineResult::Quit,
        Command::Help => vec![HELP_TEXT.to_string()],
        Command::Hours => vec![weekly_summary()],
        Command::Unknown(name) => vec![format!("Unknown command /{name}. Try /help.")],
        Command::Send(text) => notices_for(controller.submit(&text).await),
        Command::QuickReply(n) => {
            let option = controller
                .quick_replies()
                .and_then(|options| n.checked_sub(1).and_then(|i| options.get(i)))
                .cloned();
            match option {
                Some(option) => match controller.select_quick_reply(&option).await {
                    QuickReplyOutcome::Sent(outcome) => notices_for(outcome),
                    QuickReplyOutcome::NotOffered => vec!["No such option.".to_string()],
                },
                None => vec!["No such option.".to_string()],
            }
        }
        Command::Date(raw) => confirm_date(controller, &raw).await,
    };

    let mut lines = screen.refresh(controller);
    lines.append(&mut notices);
    LineResult::Continue(lines)
}

async fn confirm_date(controller: &mut ConversationController, raw: &str) -> Vec<String> {
    let Some(picker) = controller.date_picker().cloned() else {
        return vec!["There is no date to pick right now.".to_string()];
    };

    let selection = if raw.is_empty() {
        None
    } else {
        match parse_selection(raw) {
            Some(dt) if !picker.accepts(&dt) => {
                return vec![format!(
                    "Please pick a time no earlier than {}.",
                    picker.min_selectable.format("%Y-%m-%d %H:%M")
                )]
            }
            Some(dt) => Some(dt),
            None => return vec!["Could not read that date. Use YYYY-MM-DD HH:MM.".to_string()],
        }
    };

    match controller.confirm_date(selection).await {
        DateConfirmation::NoPicker => vec!["There is no date to pick right now.".to_string()],
        DateConfirmation::Missing { warning } | DateConfirmation::Closed { warning } => {
            vec![warning]
        }
        DateConfirmation::Accepted { outcome, .. } => notices_for(outcome),
    }
}

/// Interactive loop over stdin until EOF or `/quit`.
pub async fn run(mut controller: ConversationController) -> anyhow::Result<()> {
    let mut screen = Screen::default();
    for line in screen.refresh(&controller) {
        println!("{line}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if sends_request(&parse_command(&line), &controller) {
            println!("{TYPING_INDICATOR}");
        }

        match handle_line(&mut controller, &mut screen, &line).await {
            LineResult::Continue(output) => {
                for out in output {
                    println!("{out}");
                }
            }
            LineResult::Quit => break,
        }
    }

    tracing::info!(session_id = %controller.session_id(), "chat closed");
    Ok(())
}
