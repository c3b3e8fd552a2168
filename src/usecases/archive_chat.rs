use serde::Serialize;

use crate::usecases::{contracts::ChatGateway, error::QueryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveChatCommand {
    pub chat_id: String,
    pub archived: bool,
}

/// Echo of a completed archive toggle, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveOutcome {
    pub chat_id: String,
    pub archived: bool,
}

/// Archives or unarchives a chat. Repeating the same toggle is a no-op upstream.
pub fn archive_chat(
    gateway: &dyn ChatGateway,
    command: ArchiveChatCommand,
) -> Result<ArchiveOutcome, QueryError> {
    if command.chat_id.trim().is_empty() {
        return Err(QueryError::usage("chat id must not be empty"));
    }

    gateway.archive_chat(&command.chat_id, command.archived)?;
    tracing::info!(
        chat_id = %command.chat_id,
        archived = command.archived,
        "chat archive state updated"
    );

    Ok(ArchiveOutcome {
        chat_id: command.chat_id,
        archived: command.archived,
    })
}
