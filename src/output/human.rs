//! Aligned, terminal-oriented rendering.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    domain::{
        chat::ChatSummary,
        message::Message,
        page::{Page, PageRequest},
    },
    output::{PagingFlags, Report, MESSAGE_PAGE_FLAGS, PAGE_FLAGS},
};

const NAME_WIDTH: usize = 28;
const NETWORK_WIDTH: usize = 12;
const SENDER_WIDTH: usize = 16;
const TEXT_WIDTH: usize = 60;
const ELLIPSIS: &str = "...";

pub(super) fn render(out: &mut dyn Write, report: &Report<'_>) -> io::Result<()> {
    match report {
        Report::Accounts(accounts) => {
            if accounts.is_empty() {
                return writeln!(out, "No accounts connected.");
            }
            for account in accounts.iter() {
                writeln!(
                    out,
                    "{}  {}  {}",
                    fit(&account.display_name, NAME_WIDTH),
                    fit(&account.network, NETWORK_WIDTH),
                    account.id
                )?;
            }
            Ok(())
        }
        Report::Chats(page) => {
            if page.items.is_empty() {
                writeln!(out, "No chats.")?;
            }
            for chat in &page.items {
                chat_line(out, chat)?;
            }
            paging_hint(out, page, PAGE_FLAGS)
        }
        Report::Chat(detail) => {
            writeln!(out, "{}", detail.label())?;
            if detail.display_name.is_some() {
                writeln!(out, "  title:        {}", detail.title)?;
            }
            writeln!(out, "  id:           {}", detail.id)?;
            writeln!(out, "  type:         {}", detail.chat_type.as_str())?;
            writeln!(out, "  network:      {} ({})", detail.network, detail.account_id)?;
            writeln!(out, "  unread:       {}", detail.unread_count)?;
            writeln!(
                out,
                "  state:        {}",
                chat_state(detail.is_archived, detail.is_muted, detail.is_pinned)
            )?;
            if let Some(ts) = detail.last_activity {
                writeln!(out, "  last active:  {}", local_time(ts))?;
            }
            if let Some(preview) = &detail.preview {
                writeln!(out, "  preview:      {}", fit(preview, TEXT_WIDTH).trim_end())?;
            }
            let more = if detail.participants_has_more {
                ", more available"
            } else {
                ""
            };
            writeln!(
                out,
                "  participants: {} of {}{more}",
                detail.participants_returned, detail.participants_total
            )
        }
        Report::Archive(outcome) => {
            let verb = if outcome.archived { "Archived" } else { "Unarchived" };
            writeln!(out, "{verb} chat {}.", outcome.chat_id)
        }
        Report::Messages(page) => {
            message_lines(out, page)?;
            paging_hint(out, page, PAGE_FLAGS)
        }
        Report::Search(result) => {
            if result.is_empty() {
                return writeln!(out, "No results.");
            }
            section(out, "Chats", &result.chats)?;
            section(out, "In groups", &result.in_groups)?;
            writeln!(out, "-- Messages --")?;
            message_lines(out, &result.messages)?;
            paging_hint(out, &result.messages, MESSAGE_PAGE_FLAGS)
        }
    }
}

fn section(out: &mut dyn Write, title: &str, chats: &[ChatSummary]) -> io::Result<()> {
    if chats.is_empty() {
        return Ok(());
    }
    writeln!(out, "-- {title} --")?;
    for chat in chats {
        chat_line(out, chat)?;
    }
    Ok(())
}

fn chat_line(out: &mut dyn Write, chat: &ChatSummary) -> io::Result<()> {
    let time = chat.last_activity.map(local_time).unwrap_or_default();
    let unread = if chat.unread_count > 0 {
        format!(" [{}]", chat.unread_count)
    } else {
        String::new()
    };
    let archived = if chat.is_archived { " (archived)" } else { "" };

    writeln!(
        out,
        "{:>16}  {}  {}  {}{unread}{archived}",
        time,
        fit(chat.label(), NAME_WIDTH),
        fit(&chat.network, NETWORK_WIDTH),
        chat.id
    )?;
    if let Some(preview) = &chat.preview {
        writeln!(out, "{:>16}  {}", "", fit(&single_line(preview), TEXT_WIDTH).trim_end())?;
    }
    Ok(())
}

fn message_lines(out: &mut dyn Write, page: &Page<Message>) -> io::Result<()> {
    if page.items.is_empty() {
        return writeln!(out, "No messages.");
    }
    for message in &page.items {
        let time = message.timestamp.map(local_time).unwrap_or_default();
        writeln!(
            out,
            "{:>16}  {}  {}",
            time,
            fit(&message.sender_name, SENDER_WIDTH),
            fit(&single_line(&message.text), TEXT_WIDTH).trim_end()
        )?;
    }
    Ok(())
}

/// Prints the flags that fetch the neighbouring pages.
fn paging_hint<T>(out: &mut dyn Write, page: &Page<T>, flags: PagingFlags) -> io::Result<()> {
    if let Some(older) = page.older().filter(|_| page.has_more) {
        writeln!(out, "More results: {}", page_flags(&older, flags))?;
    }
    if let Some(newer) = page.newer() {
        writeln!(out, "Newer results: {}", page_flags(&newer, flags))?;
    }
    Ok(())
}

fn page_flags(request: &PageRequest, flags: PagingFlags) -> String {
    let mut rendered = Vec::new();
    if let Some(cursor) = &request.cursor {
        rendered.push(format!("{}={cursor}", flags.cursor));
    }
    if let Some(direction) = request.direction.api_value() {
        rendered.push(format!("{}={direction}", flags.direction));
    }
    rendered.join(" ")
}

fn chat_state(archived: bool, muted: bool, pinned: bool) -> String {
    let flags: Vec<&str> = [(archived, "archived"), (muted, "muted"), (pinned, "pinned")]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();
    if flags.is_empty() {
        "active".to_owned()
    } else {
        flags.join(", ")
    }
}

fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pads or truncates `text` to exactly `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }

    let budget = width.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut cut = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        cut.push(ch);
    }
    cut.push_str(ELLIPSIS);
    format!("{cut}{}", " ".repeat(width.saturating_sub(used + ELLIPSIS.len())))
}
