use crate::{
    domain::{
        account::Account,
        chat::Chat,
        filters::{ChatTypeFilter, Inbox, SearchScope},
        message::Message,
        page::{Page, PageRequest},
    },
    usecases::error::GatewayError,
};

/// Outbound parameters for `chats.list`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatListRequest {
    pub account_ids: Vec<String>,
    pub page: PageRequest,
}

/// Outbound parameters for `chats.search`. `None`/unset fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSearchRequest {
    pub query: Option<String>,
    pub inbox: Inbox,
    pub unread_only: Option<bool>,
    pub chat_type: ChatTypeFilter,
    pub scope: SearchScope,
    pub limit: Option<u32>,
    pub page: PageRequest,
}

/// Outbound parameters for `messages.search`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSearchRequest {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub page: PageRequest,
}

/// The three independent buckets returned by the combined search call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchBuckets {
    pub chats: Vec<Chat>,
    pub in_groups: Vec<Chat>,
    pub messages: Page<Message>,
}

/// Timeout-scoped call dispatch to the desktop API.
///
/// Each method is exactly one request/response exchange with its own deadline.
pub trait ChatGateway {
    fn list_accounts(&self) -> Result<Vec<Account>, GatewayError>;

    fn list_chats(&self, request: &ChatListRequest) -> Result<Page<Chat>, GatewayError>;

    fn search_chats(&self, request: &ChatSearchRequest) -> Result<Page<Chat>, GatewayError>;

    fn get_chat(&self, chat_id: &str) -> Result<Chat, GatewayError>;

    fn archive_chat(&self, chat_id: &str, archived: bool) -> Result<(), GatewayError>;

    fn search_messages(
        &self,
        request: &MessageSearchRequest,
    ) -> Result<Page<Message>, GatewayError>;

    fn search(&self, query: &str) -> Result<SearchBuckets, GatewayError>;
}

impl<T> ChatGateway for &T
where
    T: ChatGateway + ?Sized,
{
    fn list_accounts(&self) -> Result<Vec<Account>, GatewayError> {
        (*self).list_accounts()
    }

    fn list_chats(&self, request: &ChatListRequest) -> Result<Page<Chat>, GatewayError> {
        (*self).list_chats(request)
    }

    fn search_chats(&self, request: &ChatSearchRequest) -> Result<Page<Chat>, GatewayError> {
        (*self).search_chats(request)
    }

    fn get_chat(&self, chat_id: &str) -> Result<Chat, GatewayError> {
        (*self).get_chat(chat_id)
    }

    fn archive_chat(&self, chat_id: &str, archived: bool) -> Result<(), GatewayError> {
        (*self).archive_chat(chat_id, archived)
    }

    fn search_messages(
        &self,
        request: &MessageSearchRequest,
    ) -> Result<Page<Message>, GatewayError> {
        (*self).search_messages(request)
    }

    fn search(&self, query: &str) -> Result<SearchBuckets, GatewayError> {
        (*self).search(query)
    }
}
