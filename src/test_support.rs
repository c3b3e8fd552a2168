use std::{
    cell::RefCell,
    collections::{HashSet, VecDeque},
    io,
};

use crate::{
    domain::{
        account::Account,
        chat::{Chat, ChatType, Participant, ParticipantList},
        message::Message,
        page::{Cursor, Direction, Page, PageRequest},
    },
    usecases::{
        confirm::ConfirmTerminal,
        contracts::{
            ChatGateway, ChatListRequest, ChatSearchRequest, MessageSearchRequest, SearchBuckets,
        },
        error::GatewayError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListAccounts,
    ListChats(ChatListRequest),
    SearchChats(ChatSearchRequest),
    GetChat(String),
    ArchiveChat { chat_id: String, archived: bool },
    SearchMessages(MessageSearchRequest),
    Search(String),
}

/// In-memory desktop API double.
///
/// Chats and messages are stored newest first and paginated with cursors of
/// the form `c<index>`, so `Before`/`After` walk the backing list exactly the
/// way the real API walks its timeline.
pub struct FakeGateway {
    pub accounts: Vec<Account>,
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    pub buckets: SearchBuckets,
    pub page_size: usize,
    failing: HashSet<&'static str>,
    archived: RefCell<HashSet<String>>,
    calls: RefCell<Vec<GatewayCall>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            chats: Vec::new(),
            messages: Vec::new(),
            buckets: SearchBuckets::default(),
            page_size: 2,
            failing: HashSet::new(),
            archived: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn with_chats(chats: Vec<Chat>) -> Self {
        Self {
            chats,
            ..Self::default()
        }
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_buckets(buckets: SearchBuckets) -> Self {
        Self {
            buckets,
            ..Self::default()
        }
    }

    /// Makes every call with the given name fail with an HTTP 500.
    pub fn failing(mut self, call: &'static str) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_archived(&self, chat_id: &str) -> bool {
        self.archived.borrow().contains(chat_id)
    }

    fn record(&self, call: GatewayCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, call: &'static str) -> Result<(), GatewayError> {
        if self.failing.contains(call) {
            return Err(GatewayError::Status {
                call,
                status: 500,
                body: "injected failure".to_owned(),
            });
        }
        Ok(())
    }
}

impl ChatGateway for FakeGateway {
    fn list_accounts(&self) -> Result<Vec<Account>, GatewayError> {
        self.record(GatewayCall::ListAccounts);
        self.check("accounts.list")?;
        Ok(self.accounts.clone())
    }

    fn list_chats(&self, request: &ChatListRequest) -> Result<Page<Chat>, GatewayError> {
        self.record(GatewayCall::ListChats(request.clone()));
        self.check("chats.list")?;
        let chats: Vec<Chat> = self
            .chats
            .iter()
            .filter(|chat| {
                request.account_ids.is_empty() || request.account_ids.contains(&chat.account_id)
            })
            .cloned()
            .collect();
        Ok(paginate(&chats, &request.page, self.page_size))
    }

    fn search_chats(&self, request: &ChatSearchRequest) -> Result<Page<Chat>, GatewayError> {
        self.record(GatewayCall::SearchChats(request.clone()));
        self.check("chats.search")?;
        let size = request.limit.map_or(self.page_size, |limit| limit as usize);
        let chats: Vec<Chat> = self
            .chats
            .iter()
            .filter(|chat| {
                request
                    .query
                    .as_deref()
                    .map_or(true, |query| chat.title.contains(query))
            })
            .cloned()
            .collect();
        Ok(paginate(&chats, &request.page, size))
    }

    fn get_chat(&self, chat_id: &str) -> Result<Chat, GatewayError> {
        self.record(GatewayCall::GetChat(chat_id.to_owned()));
        self.check("chats.get")?;
        self.chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .cloned()
            .ok_or(GatewayError::NotFound { call: "chats.get" })
    }

    fn archive_chat(&self, chat_id: &str, archived: bool) -> Result<(), GatewayError> {
        self.record(GatewayCall::ArchiveChat {
            chat_id: chat_id.to_owned(),
            archived,
        });
        self.check("chats.archive")?;
        let mut set = self.archived.borrow_mut();
        if archived {
            set.insert(chat_id.to_owned());
        } else {
            set.remove(chat_id);
        }
        Ok(())
    }

    fn search_messages(
        &self,
        request: &MessageSearchRequest,
    ) -> Result<Page<Message>, GatewayError> {
        self.record(GatewayCall::SearchMessages(request.clone()));
        self.check("messages.search")?;
        let size = request.limit.map_or(self.page_size, |limit| limit as usize);
        Ok(paginate(&self.messages, &request.page, size))
    }

    fn search(&self, query: &str) -> Result<SearchBuckets, GatewayError> {
        self.record(GatewayCall::Search(query.to_owned()));
        self.check("search")?;
        Ok(self.buckets.clone())
    }
}

fn paginate<T: Clone>(items: &[T], request: &PageRequest, size: usize) -> Page<T> {
    let len = items.len();
    let anchor = request
        .cursor
        .as_ref()
        .and_then(|cursor| cursor.as_str().strip_prefix('c'))
        .and_then(|index| index.parse::<usize>().ok());

    let (range, has_more) = match (request.direction, anchor) {
        (Direction::After, Some(index)) => {
            let end = index.min(len);
            let start = end.saturating_sub(size);
            (start..end, start > 0)
        }
        (Direction::Before, Some(index)) => {
            let start = (index + 1).min(len);
            let end = (start + size).min(len);
            (start..end, end < len)
        }
        _ => {
            let end = size.min(len);
            (0..end, end < len)
        }
    };

    let (oldest_cursor, newest_cursor) = if range.is_empty() {
        (None, None)
    } else {
        (
            Cursor::new(format!("c{}", range.end - 1)),
            Cursor::new(format!("c{}", range.start)),
        )
    };

    Page {
        items: items[range].to_vec(),
        has_more,
        oldest_cursor,
        newest_cursor,
    }
}

pub fn participant(id: &str, full_name: &str, username: &str, is_self: bool) -> Participant {
    Participant {
        id: id.to_owned(),
        full_name: full_name.to_owned(),
        username: username.to_owned(),
        is_self,
    }
}

pub fn single_chat(id: &str, title: &str, other_name: &str) -> Chat {
    let items = vec![
        participant("me", "Me", "me", true),
        participant(&format!("{id}-peer"), other_name, "", false),
    ];
    Chat {
        id: id.to_owned(),
        title: title.to_owned(),
        account_id: "acc-1".to_owned(),
        network: "signal".to_owned(),
        chat_type: ChatType::Single,
        participants: ParticipantList {
            total: items.len() as u64,
            items,
            has_more: false,
        },
        ..Chat::default()
    }
}

pub fn group_chat(id: &str, title: &str) -> Chat {
    Chat {
        id: id.to_owned(),
        title: title.to_owned(),
        account_id: "acc-1".to_owned(),
        network: "whatsapp".to_owned(),
        chat_type: ChatType::Group,
        ..Chat::default()
    }
}

pub fn message(id: &str, text: &str) -> Message {
    Message::new(id, "c1", "u2", Some("Bob".to_owned()), text, None)
}

/// Scripted confirmation answers; records every prompt shown.
#[derive(Debug, Default)]
pub struct FakeTerminal {
    pub interactive: bool,
    pub inputs: VecDeque<Option<String>>,
    pub prompts: Vec<String>,
}

impl FakeTerminal {
    pub fn answering(answer: &str) -> Self {
        Self {
            interactive: true,
            inputs: VecDeque::from([Some(answer.to_owned())]),
            prompts: Vec::new(),
        }
    }
}

impl ConfirmTerminal for FakeTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_owned());
        Ok(self.inputs.pop_front().flatten())
    }
}
