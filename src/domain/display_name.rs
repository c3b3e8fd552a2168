use crate::domain::chat::{ChatType, Participant};

/// Derives a label for a one-to-one chat from its participants.
///
/// Group chats always return `None` and keep their title. For single chats the
/// participants are scanned in API order, skipping the current user; the first
/// remaining participant with a non-empty full name, username or id (in that
/// priority) decides the result. Later participants are never consulted once
/// an earlier one produced a candidate.
pub fn display_name_for_chat(chat_type: ChatType, participants: &[Participant]) -> Option<String> {
    if chat_type != ChatType::Single {
        return None;
    }

    participants
        .iter()
        .filter(|participant| !participant.is_self)
        .find_map(|participant| {
            [
                &participant.full_name,
                &participant.username,
                &participant.id,
            ]
            .into_iter()
            .find(|field| !field.is_empty())
            .cloned()
        })
}
