use crate::{
    domain::{
        chat::ChatSummary,
        filters::{ChatTypeFilter, Inbox, SearchScope},
        page::{Page, PageRequest},
    },
    usecases::{
        contracts::{ChatGateway, ChatSearchRequest},
        error::QueryError,
    },
};

pub const DEFAULT_CHAT_SEARCH_LIMIT: u32 = 50;
pub const MAX_CHAT_SEARCH_LIMIT: u32 = 200;

/// Caller-side chat search filter. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: String,
    pub inbox: Inbox,
    pub unread_only: bool,
    pub chat_type: ChatTypeFilter,
    pub scope: SearchScope,
    pub limit: u32,
    pub page: PageRequest,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            inbox: Inbox::Unset,
            unread_only: false,
            chat_type: ChatTypeFilter::Unset,
            scope: SearchScope::Unset,
            limit: DEFAULT_CHAT_SEARCH_LIMIT,
            page: PageRequest::default(),
        }
    }
}

impl SearchFilter {
    fn into_request(self) -> Result<ChatSearchRequest, QueryError> {
        if !(1..=MAX_CHAT_SEARCH_LIMIT).contains(&self.limit) {
            return Err(QueryError::usage(format!(
                "invalid --limit {} (expected 1-{MAX_CHAT_SEARCH_LIMIT})",
                self.limit
            )));
        }

        Ok(ChatSearchRequest {
            query: Some(self.query).filter(|query| !query.is_empty()),
            inbox: self.inbox,
            unread_only: self.unread_only.then_some(true),
            chat_type: self.chat_type,
            scope: self.scope,
            limit: Some(self.limit),
            page: self.page,
        })
    }
}

pub fn search_chats(
    gateway: &dyn ChatGateway,
    filter: SearchFilter,
) -> Result<Page<ChatSummary>, QueryError> {
    let request = filter.into_request()?;

    let page = gateway.search_chats(&request)?;
    tracing::debug!(
        items = page.items.len(),
        has_more = page.has_more,
        "chat search page received"
    );

    Ok(page.map(ChatSummary::from_chat))
}
