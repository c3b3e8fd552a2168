//! Use case layer: chat queries, searches and mutations over the gateway.

pub mod archive_chat;
pub mod bootstrap;
pub mod confirm;
pub mod context;
pub mod contracts;
pub mod error;
pub mod get_chat;
pub mod global_search;
pub mod list_accounts;
pub mod list_chats;
pub mod search_chats;
pub mod search_messages;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
