//! JSON shapes of the desktop API and their mapping into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        account::Account,
        chat::{Chat, ChatType, Participant, ParticipantList},
        message::Message,
        page::{Cursor, Page},
    },
    usecases::contracts::SearchBuckets,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct WirePage<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub oldest_cursor: Option<String>,
    #[serde(default)]
    pub newest_cursor: Option<String>,
}

impl<T> WirePage<T> {
    pub fn into_page<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            oldest_cursor: self.oldest_cursor.and_then(Cursor::new),
            newest_cursor: self.newest_cursor.and_then(Cursor::new),
        }
    }
}

impl<T> Default for WirePage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            oldest_cursor: None,
            newest_cursor: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_self: bool,
}

impl From<WireUser> for Participant {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.unwrap_or_default(),
            username: user.username.unwrap_or_default(),
            is_self: user.is_self,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireParticipants {
    #[serde(default)]
    pub items: Vec<WireUser>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct WirePreview {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireChat {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "accountID", alias = "accountId")]
    pub account_id: String,
    #[serde(default)]
    pub network: String,
    #[serde(default, rename = "type")]
    pub chat_type: String,
    #[serde(default)]
    pub unread_count: u64,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preview: Option<WirePreview>,
    #[serde(default)]
    pub last_read_message_sort_key: Option<Value>,
    #[serde(default, rename = "localChatID", alias = "localChatId")]
    pub local_chat_id: Option<String>,
    #[serde(default)]
    pub participants: WireParticipants,
}

impl From<WireChat> for Chat {
    fn from(chat: WireChat) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            account_id: chat.account_id,
            network: chat.network,
            chat_type: chat_type_from_wire(&chat.chat_type),
            unread_count: chat.unread_count,
            is_archived: chat.is_archived,
            is_muted: chat.is_muted,
            is_pinned: chat.is_pinned,
            last_activity: non_zero(chat.last_activity),
            preview: chat
                .preview
                .and_then(|preview| preview.text)
                .filter(|text| !text.is_empty()),
            last_read_message_sort_key: chat
                .last_read_message_sort_key
                .and_then(sort_key_to_string),
            local_chat_id: chat.local_chat_id.filter(|id| !id.is_empty()),
            participants: ParticipantList {
                items: chat
                    .participants
                    .items
                    .into_iter()
                    .map(Participant::from)
                    .collect(),
                total: chat.participants.total,
                has_more: chat.participants.has_more,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub id: String,
    #[serde(default, rename = "chatID", alias = "chatId")]
    pub chat_id: String,
    #[serde(default, rename = "senderID", alias = "senderId")]
    pub sender_id: String,
    #[serde(default, rename = "senderName")]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<WireMessage> for Message {
    fn from(message: WireMessage) -> Self {
        Message::new(
            message.id,
            message.chat_id,
            message.sender_id,
            message.sender_name,
            message.text.unwrap_or_default(),
            non_zero(message.timestamp),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct WireSearchResponse {
    #[serde(default)]
    pub results: WireSearchResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireSearchResults {
    #[serde(default)]
    pub chats: Vec<WireChat>,
    #[serde(default, alias = "inGroups")]
    pub in_groups: Vec<WireChat>,
    #[serde(default)]
    pub messages: WirePage<WireMessage>,
}

impl From<WireSearchResponse> for SearchBuckets {
    fn from(response: WireSearchResponse) -> Self {
        let results = response.results;
        Self {
            chats: results.chats.into_iter().map(Chat::from).collect(),
            in_groups: results.in_groups.into_iter().map(Chat::from).collect(),
            messages: results.messages.into_page(Message::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireAccount {
    #[serde(rename = "accountID", alias = "accountId")]
    pub account_id: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub user: WireUser,
}

impl From<WireAccount> for Account {
    fn from(account: WireAccount) -> Self {
        Account::new(
            account.account_id,
            account.network,
            account.user.full_name.as_deref().unwrap_or_default(),
            account.user.username.as_deref().unwrap_or_default(),
        )
    }
}

fn chat_type_from_wire(raw: &str) -> ChatType {
    match raw {
        "single" => ChatType::Single,
        _ => ChatType::Group,
    }
}

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`, the zero time the
/// desktop API emits for unset timestamps.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// The zero time and the Unix epoch mean "absent"; anything else is kept.
fn non_zero(timestamp: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    timestamp.filter(|ts| !matches!(ts.timestamp(), 0 | ZERO_TIME_SECS))
}

fn sort_key_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(key) if !key.is_empty() => Some(key),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
