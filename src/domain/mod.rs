//! Domain layer: chats, messages, accounts and cursor pagination.

pub mod account;
pub mod chat;
pub mod display_name;
pub mod filters;
pub mod message;
pub mod page;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
