use std::io::{self, Write};

use anyhow::Result;

use crate::{
    cli::{AccountsCommand, ChatsCommand, Cli, Command, MessagesCommand},
    domain,
    gateway::{self, http::HttpGateway},
    infra, output,
    output::Report,
    usecases::{
        self,
        archive_chat::{archive_chat, ArchiveChatCommand},
        bootstrap,
        confirm::{confirm, ConfirmTerminal, StdConfirmTerminal},
        contracts::ChatGateway,
        error::QueryError,
        get_chat::get_chat,
        global_search::{global_search, GlobalSearchQuery},
        list_accounts::list_accounts,
        list_chats::{list_chats, ListChatsQuery},
        search_chats::{search_chats, SearchFilter},
        search_messages::{search_messages, MessageSearchQuery},
    },
};

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref(), &cli.config_overrides())?;

    tracing::debug!(
        domain = domain::module_name(),
        gateway = gateway::module_name(),
        usecases = usecases::module_name(),
        output = output::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );
    tracing::debug!(api = ?context.config.api, "resolved API configuration");

    let gateway = HttpGateway::from_config(&context.config.api)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    execute(&gateway, &cli, &mut StdConfirmTerminal, &mut out)
}

/// Runs one command against the gateway and renders its result.
fn execute(
    gateway: &dyn ChatGateway,
    cli: &Cli,
    terminal: &mut dyn ConfirmTerminal,
    out: &mut dyn Write,
) -> Result<()> {
    let mode = cli.output_mode();
    match &cli.command {
        Command::Accounts(AccountsCommand::List) => {
            let accounts = list_accounts(gateway)?;
            output::render(out, mode, &Report::Accounts(&accounts))?;
        }
        Command::Chats(ChatsCommand::List(args)) => {
            let page = list_chats(
                gateway,
                ListChatsQuery {
                    account_ids: args.account_ids.clone(),
                    page: args.page.page_request(),
                },
            )?;
            output::render(out, mode, &Report::Chats(&page))?;
        }
        Command::Chats(ChatsCommand::Search(args)) => {
            let page = search_chats(
                gateway,
                SearchFilter {
                    query: args.query.clone().unwrap_or_default(),
                    inbox: args.inbox.unwrap_or_default(),
                    unread_only: args.unread_only,
                    chat_type: args.chat_type.unwrap_or_default(),
                    scope: args.scope.unwrap_or_default(),
                    limit: args.limit,
                    page: args.page.page_request(),
                },
            )?;
            output::render(out, mode, &Report::Chats(&page))?;
        }
        Command::Chats(ChatsCommand::Get { id }) => {
            let detail = get_chat(gateway, id)?;
            output::render(out, mode, &Report::Chat(&detail))?;
        }
        Command::Chats(ChatsCommand::Archive { id, unarchive }) => {
            let verb = if *unarchive { "Unarchive" } else { "Archive" };
            confirm(terminal, cli.confirm_policy(), &format!("{verb} chat {id}"))?;
            let outcome = archive_chat(
                gateway,
                ArchiveChatCommand {
                    chat_id: id.clone(),
                    archived: !unarchive,
                },
            )?;
            output::render(out, mode, &Report::Archive(&outcome))?;
        }
        Command::Messages(MessagesCommand::Search(args)) => {
            let page = search_messages(
                gateway,
                MessageSearchQuery {
                    query: args.query.clone(),
                    limit: args.limit,
                    page: args.page.page_request(),
                },
            )?;
            output::render(out, mode, &Report::Messages(&page))?;
        }
        Command::Search(args) => {
            let result = global_search(
                gateway,
                GlobalSearchQuery {
                    query: args.query.clone(),
                    messages_page: args.messages_page(),
                    messages_limit: args.messages_limit,
                },
            )?;
            output::render(out, mode, &Report::Search(&result))?;
        }
    }

    Ok(())
}

/// Usage errors exit with 2, every other failure with 1.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<QueryError>() {
        Some(query_error) if query_error.is_usage() => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}
