use crate::{
    domain::{
        chat::ChatSummary,
        page::{Page, PageRequest},
    },
    usecases::{
        contracts::{ChatGateway, ChatListRequest},
        error::QueryError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListChatsQuery {
    /// Restricts the listing to these accounts; empty means all accounts.
    pub account_ids: Vec<String>,
    pub page: PageRequest,
}

pub fn list_chats(
    gateway: &dyn ChatGateway,
    query: ListChatsQuery,
) -> Result<Page<ChatSummary>, QueryError> {
    let request = ChatListRequest {
        account_ids: query
            .account_ids
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect(),
        page: query.page,
    };

    let page = gateway.list_chats(&request)?;
    tracing::debug!(
        items = page.items.len(),
        has_more = page.has_more,
        "chat list page received"
    );

    Ok(page.map(ChatSummary::from_chat))
}
