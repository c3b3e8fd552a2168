use crate::{
    domain::{
        message::Message,
        page::{Page, PageRequest},
    },
    usecases::{
        contracts::{ChatGateway, MessageSearchRequest},
        error::QueryError,
    },
};

pub const DEFAULT_MESSAGE_SEARCH_LIMIT: u32 = 20;
pub const MAX_MESSAGE_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSearchQuery {
    pub query: String,
    /// `None` uses the default page size.
    pub limit: Option<u32>,
    pub page: PageRequest,
}

pub fn search_messages(
    gateway: &dyn ChatGateway,
    query: MessageSearchQuery,
) -> Result<Page<Message>, QueryError> {
    let limit = validate_limit(query.limit)?;
    let request = MessageSearchRequest {
        query: Some(query.query).filter(|text| !text.is_empty()),
        limit: Some(limit),
        page: query.page,
    };

    let page = gateway.search_messages(&request)?;
    tracing::debug!(
        items = page.items.len(),
        has_more = page.has_more,
        "message search page received"
    );

    Ok(page)
}

pub(crate) fn validate_limit(limit: Option<u32>) -> Result<u32, QueryError> {
    match limit {
        None => Ok(DEFAULT_MESSAGE_SEARCH_LIMIT),
        Some(value) if (1..=MAX_MESSAGE_SEARCH_LIMIT).contains(&value) => Ok(value),
        Some(value) => Err(QueryError::usage(format!(
            "invalid message limit {value} (expected 1-{MAX_MESSAGE_SEARCH_LIMIT})"
        ))),
    }
}
