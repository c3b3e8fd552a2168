use crate::{
    domain::chat::ChatDetail,
    usecases::{contracts::ChatGateway, error::QueryError},
};

/// Fetches one chat with participant counts. Unknown ids surface as `NotFound`.
pub fn get_chat(gateway: &dyn ChatGateway, chat_id: &str) -> Result<ChatDetail, QueryError> {
    if chat_id.trim().is_empty() {
        return Err(QueryError::usage("chat id must not be empty"));
    }

    let chat = gateway.get_chat(chat_id)?;
    Ok(ChatDetail::from_chat(chat))
}
