use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    domain::{
        filters::{ChatTypeFilter, Inbox, SearchScope},
        page::{Cursor, Direction, PageRequest},
    },
    output::OutputMode,
    usecases::{
        bootstrap::ConfigOverrides, confirm::ConfirmPolicy,
        search_chats::DEFAULT_CHAT_SEARCH_LIMIT,
    },
};

#[derive(Debug, Parser)]
#[command(
    name = "deskchat",
    version,
    about = "Query and manage chats through the local messaging desktop API"
)]
pub struct Cli {
    /// Path to config file (default: $XDG_CONFIG_HOME/deskchat/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, conflicts_with = "plain")]
    pub json: bool,

    /// Print results as tab-separated records
    #[arg(long, global = true)]
    pub plain: bool,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Desktop API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-call deadline in seconds (0 disables it)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Run destructive commands without asking for confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never prompt; commands that need confirmation fail unless --force is given
    #[arg(long, global = true)]
    pub no_input: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Connected messaging accounts
    #[command(subcommand)]
    Accounts(AccountsCommand),
    /// List, search, inspect and archive chats
    #[command(subcommand)]
    Chats(ChatsCommand),
    /// Search messages with cursor paging
    #[command(subcommand)]
    Messages(MessagesCommand),
    /// Search chats, group memberships and messages at once
    Search(GlobalSearchArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum AccountsCommand {
    /// List connected accounts
    List,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ChatsCommand {
    /// List chats, newest activity first
    List(ChatListArgs),
    /// Search chats by title, participants and state
    Search(ChatSearchArgs),
    /// Show one chat
    Get {
        /// Chat id
        id: String,
    },
    /// Archive a chat, or unarchive it with --unarchive
    Archive {
        /// Chat id
        id: String,
        #[arg(long)]
        unarchive: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum MessagesCommand {
    /// Search messages
    Search(MessageSearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Opaque cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Paging direction relative to the cursor: before (older) or after (newer)
    #[arg(long, value_name = "before|after")]
    pub direction: Option<Direction>,
}

impl PageArgs {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.cursor.as_deref(), self.direction)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ChatListArgs {
    /// Only list chats of these accounts (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub account_ids: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ChatSearchArgs {
    /// Text matched against chat titles or participants
    pub query: Option<String>,

    /// primary, low-priority or archive
    #[arg(long)]
    pub inbox: Option<Inbox>,

    /// Only chats with unread messages
    #[arg(long)]
    pub unread_only: bool,

    /// direct, group or any
    #[arg(long = "type", value_name = "TYPE")]
    pub chat_type: Option<ChatTypeFilter>,

    /// titles or participants
    #[arg(long)]
    pub scope: Option<SearchScope>,

    /// Page size, 1-200
    #[arg(long, default_value_t = DEFAULT_CHAT_SEARCH_LIMIT)]
    pub limit: u32,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, Args)]
pub struct MessageSearchArgs {
    pub query: String,

    /// Page size, 1-20 (default 20)
    #[arg(long)]
    pub limit: Option<u32>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalSearchArgs {
    pub query: String,

    /// Page messages from this cursor with a dedicated message search
    #[arg(long)]
    pub messages_cursor: Option<String>,

    /// Message paging direction: before or after
    #[arg(long, value_name = "before|after")]
    pub messages_direction: Option<Direction>,

    /// Message page size, 1-20
    #[arg(long)]
    pub messages_limit: Option<u32>,
}

impl GlobalSearchArgs {
    pub fn messages_page(&self) -> PageRequest {
        page_request(self.messages_cursor.as_deref(), self.messages_direction)
    }
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        match (self.json, self.plain) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Plain,
            (false, false) => OutputMode::Human,
        }
    }

    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            verbose: self.verbose,
        }
    }

    pub fn confirm_policy(&self) -> ConfirmPolicy {
        ConfirmPolicy {
            force: self.force,
            no_input: self.no_input,
        }
    }
}

fn page_request(cursor: Option<&str>, direction: Option<Direction>) -> PageRequest {
    PageRequest {
        cursor: cursor.and_then(Cursor::new),
        direction: direction.unwrap_or_default(),
    }
}
