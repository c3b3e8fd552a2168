use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::display_name::display_name_for_chat;

/// Kind of chat as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// One-to-one conversation.
    #[default]
    Single,
    Group,
}

impl ChatType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Group => "group",
        }
    }
}

/// A chat member as embedded in a chat payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Participant {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub is_self: bool,
}

/// Possibly truncated participant sub-list of a chat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParticipantList {
    pub items: Vec<Participant>,
    pub total: u64,
    pub has_more: bool,
}

impl ParticipantList {
    /// Number of participants actually embedded in the payload.
    pub fn returned_count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub account_id: String,
    pub network: String,
    pub chat_type: ChatType,
    pub unread_count: u64,
    pub is_archived: bool,
    pub is_muted: bool,
    pub is_pinned: bool,
    pub last_activity: Option<DateTime<Utc>>,
    pub preview: Option<String>,
    pub last_read_message_sort_key: Option<String>,
    pub local_chat_id: Option<String>,
    pub participants: ParticipantList,
}

impl Chat {
    pub fn display_name(&self) -> Option<String> {
        display_name_for_chat(self.chat_type, &self.participants.items)
    }
}

/// Chat row returned by list and search operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub account_id: String,
    pub network: String,
    pub unread_count: u64,
    pub is_archived: bool,
    pub is_muted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl ChatSummary {
    pub fn from_chat(chat: Chat) -> Self {
        let display_name = chat.display_name();
        Self {
            id: chat.id,
            title: chat.title,
            display_name,
            chat_type: chat.chat_type,
            account_id: chat.account_id,
            network: chat.network,
            unread_count: chat.unread_count,
            is_archived: chat.is_archived,
            is_muted: chat.is_muted,
            last_activity: chat.last_activity,
            preview: chat.preview,
        }
    }

    /// Resolved display name, falling back to the title.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.title)
    }
}

/// Full chat view returned by `get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatDetail {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub account_id: String,
    pub network: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub unread_count: u64,
    pub is_archived: bool,
    pub is_muted: bool,
    pub is_pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_read_message_sort_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_chat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub participants_total: u64,
    pub participants_returned: usize,
    pub participants_has_more: bool,
}

impl ChatDetail {
    pub fn from_chat(chat: Chat) -> Self {
        let display_name = chat.display_name();
        let participants_returned = chat.participants.returned_count();
        Self {
            id: chat.id,
            title: chat.title,
            display_name,
            account_id: chat.account_id,
            network: chat.network,
            chat_type: chat.chat_type,
            unread_count: chat.unread_count,
            is_archived: chat.is_archived,
            is_muted: chat.is_muted,
            is_pinned: chat.is_pinned,
            last_activity: chat.last_activity,
            last_read_message_sort_key: chat.last_read_message_sort_key,
            local_chat_id: chat.local_chat_id,
            preview: chat.preview,
            participants_total: chat.participants.total,
            participants_returned,
            participants_has_more: chat.participants.has_more,
        }
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.title)
    }
}
