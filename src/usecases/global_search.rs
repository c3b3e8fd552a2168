//! Combined search across chats, group memberships and messages.
//!
//! The combined endpoint returns all three buckets but cannot page messages.
//! When the caller supplies any message pagination control, a second
//! `messages.search` call is issued and its page replaces the inline bucket.

use serde::Serialize;

use crate::{
    domain::{
        chat::ChatSummary,
        message::Message,
        page::{Page, PageRequest},
    },
    usecases::{
        contracts::ChatGateway,
        error::QueryError,
        search_messages::{search_messages, validate_limit, MessageSearchQuery},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobalSearchQuery {
    pub query: String,
    pub messages_page: PageRequest,
    pub messages_limit: Option<u32>,
}

impl GlobalSearchQuery {
    fn pages_messages(&self) -> bool {
        self.messages_page.is_specified() || self.messages_limit.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSearchResult {
    pub chats: Vec<ChatSummary>,
    pub in_groups: Vec<ChatSummary>,
    pub messages: Page<Message>,
}

impl GlobalSearchResult {
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty() && self.in_groups.is_empty() && self.messages.is_empty()
    }
}

/// Runs the combined search. The query text is forwarded as given.
pub fn global_search(
    gateway: &dyn ChatGateway,
    mut query: GlobalSearchQuery,
) -> Result<GlobalSearchResult, QueryError> {
    // A zero limit means unset and does not page messages on its own.
    query.messages_limit = query.messages_limit.filter(|limit| *limit > 0);
    if query.messages_limit.is_some() {
        validate_limit(query.messages_limit)?;
    }

    let buckets = gateway.search(&query.query)?;
    let mut result = GlobalSearchResult {
        chats: buckets
            .chats
            .into_iter()
            .map(ChatSummary::from_chat)
            .collect(),
        in_groups: buckets
            .in_groups
            .into_iter()
            .map(ChatSummary::from_chat)
            .collect(),
        messages: buckets.messages,
    };

    if query.pages_messages() {
        tracing::debug!(
            cursor = query.messages_page.cursor.as_ref().map(|c| c.as_str()),
            direction = ?query.messages_page.direction,
            "replacing inline message bucket with a dedicated message search"
        );
        result.messages = search_messages(
            gateway,
            MessageSearchQuery {
                query: query.query,
                limit: query.messages_limit,
                page: query.messages_page,
            },
        )?;
    }

    Ok(result)
}
