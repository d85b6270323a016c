use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::chatmodel::ChatMessage;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatHistoryQueryDto {
    pub match_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordSeenDto {
    pub match_id: Uuid,
    #[validate(range(min = 0))]
    pub last_seen_message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LastSeenQueryDto {
    pub match_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponseDto {
    pub status: String,
    pub data: Vec<ChatMessage>,
}

/// Frames exchanged on the websocket. Tagged by `event` so a single
/// socket carries joins, messages and leaves for any number of rooms.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatClientEvent {
    Join { match_id: Uuid },
    Message { match_id: Uuid, content: String },
    Leave { match_id: Uuid },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatServerEvent {
    Joined { match_id: Uuid },
    Message { data: ChatMessage },
    Left { match_id: Uuid },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_round_trip_json() {
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{"event":"message","match_id":"{}","content":"Olá"}}"#,
            id
        );
        let parsed: ChatClientEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            ChatClientEvent::Message {
                match_id: id,
                content: "Olá".to_string()
            }
        );
    }

    #[test]
    fn unknown_event_is_rejected() {
        let raw = r#"{"event":"typing","match_id":"00000000-0000-0000-0000-000000000000"}"#;
        assert!(serde_json::from_str::<ChatClientEvent>(raw).is_err());
    }

    #[test]
    fn server_error_frame_serializes() {
        let frame = ChatServerEvent::Error {
            message: "message could not be saved".to_string(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"event\":\"error\""));
    }
}
