use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    /// Falls back to `sender_id` when the API sends no name.
    pub sender_name: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        chat_id: impl Into<String>,
        sender_id: impl Into<String>,
        sender_name: Option<String>,
        text: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let sender_id = sender_id.into();
        let sender_name = sender_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| sender_id.clone());
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            sender_id,
            sender_name,
            text: text.into(),
            timestamp,
        }
    }
}
