//! Output layer: renders operation results for a terminal or a pipe.

mod human;
mod plain;

use std::io::{self, Write};

use serde::Serialize;

use crate::{
    domain::{
        account::Account,
        chat::{ChatDetail, ChatSummary},
        message::Message,
        page::Page,
    },
    usecases::{archive_chat::ArchiveOutcome, global_search::GlobalSearchResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
    Plain,
}

/// Flag names that fetch the next page, echoed in human pagination hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingFlags {
    pub cursor: &'static str,
    pub direction: &'static str,
}

pub const PAGE_FLAGS: PagingFlags = PagingFlags {
    cursor: "--cursor",
    direction: "--direction",
};

pub const MESSAGE_PAGE_FLAGS: PagingFlags = PagingFlags {
    cursor: "--messages-cursor",
    direction: "--messages-direction",
};

/// A finished operation result ready for rendering.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Accounts(&'a [Account]),
    Chats(&'a Page<ChatSummary>),
    Chat(&'a ChatDetail),
    Archive(&'a ArchiveOutcome),
    Messages(&'a Page<Message>),
    Search(&'a GlobalSearchResult),
}

pub fn render(out: &mut dyn Write, mode: OutputMode, report: &Report<'_>) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        OutputMode::Plain => plain::render(out, report),
        OutputMode::Human => human::render(out, report),
    }
}

/// Returns the output module name for smoke checks.
pub fn module_name() -> &'static str {
    "output"
}


#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};

    fn rendered(mode: OutputMode, report: &Report<'_>) -> String {
        let mut out = Vec::new();
        render(&mut out, mode, report).expect("render into memory");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn json_page_uses_snake_case_and_omits_absent_fields() {
        let page = chat_page(true);

        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputMode::Json, &Report::Chats(&page)))
                .expect("valid json");

        assert_eq!(value["has_more"], true);
        assert_eq!(value["oldest_cursor"], "old-1");
        assert_eq!(value["items"][0]["display_name"], "Bob");
        assert_eq!(value["items"][0]["type"], "single");
        assert!(value["items"][1].get("display_name").is_none());
        assert!(value["items"][1].get("preview").is_none());
    }

    #[test]
    fn json_report_is_the_bare_result() {
        let outcome = ArchiveOutcome {
            chat_id: "c1".to_owned(),
            archived: true,
        };

        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputMode::Json, &Report::Archive(&outcome)))
                .expect("valid json");

        assert_eq!(value, serde_json::json!({"chat_id": "c1", "archived": true}));
    }

    #[test]
    fn json_search_keeps_all_three_buckets() {
        let result = GlobalSearchResult {
            chats: vec![summary("c1", "Bob chat", Some("Bob"))],
            in_groups: Vec::new(),
            messages: message_page(false),
        };

        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputMode::Json, &Report::Search(&result)))
                .expect("valid json");

        assert_eq!(value["chats"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["in_groups"], serde_json::json!([]));
        assert_eq!(value["messages"]["items"][0]["sender_name"], "Bob");
    }
}
