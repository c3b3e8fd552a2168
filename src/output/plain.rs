//! Tab-separated records, one per line, each led by its record kind.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::{
    domain::{chat::ChatSummary, message::Message, page::Page},
    output::Report,
};

pub(super) fn render(out: &mut dyn Write, report: &Report<'_>) -> io::Result<()> {
    match report {
        Report::Accounts(accounts) => {
            for account in accounts.iter() {
                record(out, &["account", &account.id, &account.network, &account.display_name])?;
            }
            Ok(())
        }
        Report::Chats(page) => {
            for chat in &page.items {
                chat_record(out, "chat", chat)?;
            }
            page_record(out, "chats", page)
        }
        Report::Chat(detail) => record(
            out,
            &[
                "chat",
                &detail.id,
                detail.chat_type.as_str(),
                detail.label(),
                &detail.network,
                &detail.unread_count.to_string(),
                flag(detail.is_archived),
                &timestamp(detail.last_activity),
                &detail.participants_total.to_string(),
                &detail.participants_returned.to_string(),
            ],
        ),
        Report::Archive(outcome) => {
            let state = if outcome.archived { "archived" } else { "unarchived" };
            record(out, &[&outcome.chat_id, state])
        }
        Report::Messages(page) => {
            for message in &page.items {
                message_record(out, message)?;
            }
            page_record(out, "messages", page)
        }
        Report::Search(result) => {
            for chat in &result.chats {
                chat_record(out, "chat", chat)?;
            }
            for chat in &result.in_groups {
                chat_record(out, "group", chat)?;
            }
            for message in &result.messages.items {
                message_record(out, message)?;
            }
            page_record(out, "messages", &result.messages)
        }
    }
}

fn chat_record(out: &mut dyn Write, kind: &str, chat: &ChatSummary) -> io::Result<()> {
    record(
        out,
        &[
            kind,
            &chat.id,
            chat.chat_type.as_str(),
            chat.label(),
            &chat.network,
            &chat.unread_count.to_string(),
            flag(chat.is_archived),
            &timestamp(chat.last_activity),
        ],
    )
}

fn message_record(out: &mut dyn Write, message: &Message) -> io::Result<()> {
    record(
        out,
        &[
            "message",
            &message.id,
            &message.chat_id,
            &message.sender_name,
            &timestamp(message.timestamp),
            &message.text,
        ],
    )
}

fn page_record<T>(out: &mut dyn Write, kind: &str, page: &Page<T>) -> io::Result<()> {
    let cursor = |cursor: Option<&crate::domain::page::Cursor>| {
        cursor.map(|c| c.as_str().to_owned()).unwrap_or_default()
    };
    record(
        out,
        &[
            "page",
            kind,
            flag(page.has_more),
            &cursor(page.oldest_cursor.as_ref()),
            &cursor(page.newest_cursor.as_ref()),
        ],
    )
}

fn record(out: &mut dyn Write, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| sanitize(field))
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{line}")
}

/// Tabs and line breaks inside a field would break the record layout.
fn sanitize(field: &str) -> String {
    field
        .chars()
        .map(|ch| if matches!(ch, '\t' | '\n' | '\r') { ' ' } else { ch })
        .collect()
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|ts| ts.to_rfc3339()).unwrap_or_default()
}
