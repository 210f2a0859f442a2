use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One entry of the durable transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    DatePicker,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub ui_action: Option<UiAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = ChatRequest {
            message: "hi".into(),
            session_id: "sess_abc123def".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "hi", "session_id": "sess_abc123def"})
        );
    }

    #[test]
    fn test_response_without_ui_action() {
        let resp: ChatResponse = serde_json::from_str(r#"{"reply":"Hello"}"#).unwrap();
        assert_eq!(resp.reply, "Hello");
        assert_eq!(resp.ui_action, None);
    }

    #[test]
    fn test_response_with_null_ui_action() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"Hello","ui_action":null}"#).unwrap();
        assert_eq!(resp.ui_action, None);
    }

    #[test]
    fn test_response_with_date_picker() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"Pick a time","ui_action":"date_picker"}"#).unwrap();
        assert_eq!(resp.ui_action, Some(UiAction::DatePicker));
    }

    #[test]
    fn test_response_with_unrecognized_ui_action() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"ok","ui_action":"map_widget"}"#).unwrap();
        assert_eq!(resp.ui_action, Some(UiAction::Unknown));
    }

    #[test]
    fn test_response_missing_reply_is_error() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"ui_action":null}"#).is_err());
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("hi").sender, Sender::User);
        assert_eq!(Message::bot("hello").sender.as_str(), "bot");
    }
}
