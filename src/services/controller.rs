use chrono::NaiveDateTime;

use crate::models::{
    ChatRequest, ChatResponse, DatePicker, HoursPolicy, Message, Prompt, UiAction,
};
use crate::services::backend::ChatBackend;
use crate::services::scheduling::{self, SchedulingError};
use crate::services::session::SessionId;

pub const WELCOME_MESSAGE: &str = "Hello, I am the CN Medical Assistant.\n\nI can help you with:";

pub const QUICK_REPLIES: [&str; 4] = [
    "Information about our services and treatments",
    "Providers and clinic details",
    "Clinic days and hours open",
    "Request appointment",
];

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply { turn: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejected {
    /// Nothing left after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub turn: u64,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Ignored,
    Busy,
    Replied { date_picker: bool },
    Failed,
    /// The completion belonged to a turn that is no longer in flight.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickReplyOutcome {
    NotOffered,
    Sent(TurnOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateConfirmation {
    NoPicker,
    Missing { warning: String },
    Closed { warning: String },
    Accepted { text: String, outcome: TurnOutcome },
}

/// What a renderer draws, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEntry<'a> {
    Message(&'a Message),
    Prompt(&'a Prompt),
    Typing,
}

/// Owns one chat session: transcript, turn state and the transient prompt.
pub struct ConversationController {
    session_id: SessionId,
    backend: Box<dyn ChatBackend>,
    hours_policy: HoursPolicy,
    transcript: Vec<Message>,
    prompt: Option<Prompt>,
    state: TurnState,
    last_turn: u64,
}

impl ConversationController {
    pub fn new(
        session_id: SessionId,
        backend: Box<dyn ChatBackend>,
        hours_policy: HoursPolicy,
    ) -> Self {
        let mut controller = Self {
            session_id,
            backend,
            hours_policy,
            transcript: Vec::new(),
            prompt: None,
            state: TurnState::Idle,
            last_turn: 0,
        };

        controller.transcript.push(Message::bot(WELCOME_MESSAGE));
        controller.show_prompt(Prompt::QuickReplies(
            QUICK_REPLIES.iter().map(|s| s.to_string()).collect(),
        ));
        controller
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn hours_policy(&self) -> HoursPolicy {
        self.hours_policy
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.state, TurnState::AwaitingReply { .. })
    }

    pub fn quick_replies(&self) -> Option<&[String]> {
        match &self.prompt {
            Some(Prompt::QuickReplies(options)) => Some(options),
            _ => None,
        }
    }

    pub fn date_picker(&self) -> Option<&DatePicker> {
        match &self.prompt {
            Some(Prompt::DatePicker(picker)) => Some(picker),
            _ => None,
        }
    }

    pub fn view(&self) -> Vec<ViewEntry<'_>> {
        let mut entries: Vec<ViewEntry<'_>> =
            self.transcript.iter().map(ViewEntry::Message).collect();
        if let Some(prompt) = &self.prompt {
            entries.push(ViewEntry::Prompt(prompt));
        }
        if self.is_awaiting_reply() {
            entries.push(ViewEntry::Typing);
        }
        entries
    }

    fn show_prompt(&mut self, prompt: Prompt) {
        if let Some(previous) = &self.prompt {
            tracing::debug!(evicted = previous.kind(), "replacing prompt");
        }
        tracing::debug!(prompt = prompt.kind(), "showing prompt");
        self.prompt = Some(prompt);
    }

    fn clear_prompt(&mut self) {
        if let Some(previous) = self.prompt.take() {
            tracing::debug!(prompt = previous.kind(), "cleared prompt");
        }
    }

    /// Records the user's message and opens a turn. Sending is left to the caller.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, TurnRejected> {
        let message = text.trim();
        if message.is_empty() {
            return Err(TurnRejected::Empty);
        }

        if let TurnState::AwaitingReply { turn } = self.state {
            tracing::debug!(turn, "turn already in flight, rejecting submit");
            return Err(TurnRejected::Busy);
        }

        self.transcript.push(Message::user(message));
        self.clear_prompt();

        self.last_turn += 1;
        let turn = self.last_turn;
        self.state = TurnState::AwaitingReply { turn };

        tracing::info!(session_id = %self.session_id, turn, "sending message");

        Ok(PendingTurn {
            turn,
            request: ChatRequest {
                message: message.to_string(),
                session_id: self.session_id.to_string(),
            },
        })
    }

    /// Applies the backend result for `turn`. Results for any other turn are dropped.
    pub fn complete_turn(
        &mut self,
        turn: u64,
        result: anyhow::Result<ChatResponse>,
    ) -> TurnOutcome {
        if self.state != (TurnState::AwaitingReply { turn }) {
            tracing::debug!(turn, state = ?self.state, "discarding stale reply");
            return TurnOutcome::Stale;
        }

        self.state = TurnState::Idle;

        match result {
            Ok(response) => {
                self.transcript.push(Message::bot(response.reply));

                let date_picker = match response.ui_action {
                    Some(UiAction::DatePicker) => {
                        self.show_prompt(Prompt::DatePicker(DatePicker::starting_now()));
                        true
                    }
                    Some(UiAction::Unknown) => {
                        tracing::warn!(turn, "ignoring unrecognized ui_action");
                        false
                    }
                    None => false,
                };

                TurnOutcome::Replied { date_picker }
            }
            Err(e) => {
                tracing::error!(session_id = %self.session_id, turn, error = %e, "chat request failed");
                self.transcript.push(Message::bot(FALLBACK_REPLY));
                TurnOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self, text: &str) -> TurnOutcome {
        let pending = match self.begin_turn(text) {
            Ok(pending) => pending,
            Err(TurnRejected::Empty) => return TurnOutcome::Ignored,
            Err(TurnRejected::Busy) => return TurnOutcome::Busy,
        };

        let result = self.backend.send(&pending.request).await;
        self.complete_turn(pending.turn, result)
    }

    pub async fn select_quick_reply(&mut self, option: &str) -> QuickReplyOutcome {
        let offered = self
            .quick_replies()
            .map(|options| options.iter().any(|o| o == option))
            .unwrap_or(false);

        if !offered {
            return QuickReplyOutcome::NotOffered;
        }

        self.clear_prompt();
        QuickReplyOutcome::Sent(self.submit(option).await)
    }

    pub async fn confirm_date(&mut self, selection: Option<NaiveDateTime>) -> DateConfirmation {
        if self.date_picker().is_none() {
            return DateConfirmation::NoPicker;
        }

        let validated = scheduling::validate_appointment_time(selection.as_ref(), self.hours_policy);
        let picked = match validated {
            Ok(picked) => picked,
            Err(e @ SchedulingError::MissingSelection) => {
                return DateConfirmation::Missing {
                    warning: e.to_string(),
                }
            }
            Err(e @ SchedulingError::OutsideBusinessHours { .. }) => {
                tracing::debug!(selection = ?selection, "picked time is outside business hours");
                return DateConfirmation::Closed {
                    warning: e.to_string(),
                };
            }
        };

        let text = scheduling::format_appointment(&picked);
        self.clear_prompt();
        let outcome = self.submit(&text).await;
        DateConfirmation::Accepted { text, outcome }
    }
}
