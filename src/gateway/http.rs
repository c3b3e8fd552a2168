use std::{
    future::Future,
    time::{Duration, Instant},
};

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::{account::Account, chat::Chat, message::Message, page::Page, page::PageRequest},
    gateway::wire::{WireAccount, WireChat, WireMessage, WirePage, WireSearchResponse},
    infra::{config::ApiConfig, error::AppError},
    usecases::{
        contracts::{
            ChatGateway, ChatListRequest, ChatSearchRequest, MessageSearchRequest, SearchBuckets,
        },
        error::GatewayError,
    },
};

const BODY_EXCERPT_CHARS: usize = 200;

type QueryPairs = Vec<(&'static str, String)>;

/// Desktop API client. Each call blocks on a private current-thread runtime
/// and gets its own deadline.
pub struct HttpGateway {
    base_url: Url,
    token: String,
    timeout: Option<Duration>,
    http: Client,
    runtime: Runtime,
}

impl HttpGateway {
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let token = config
            .token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or(AppError::MissingToken)?;
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));

        Self::new(&config.base_url, token, timeout)
    }

    pub fn new(base_url: &str, token: String, timeout: Option<Duration>) -> Result<Self, AppError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(concat!("deskchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::HttpClientInit)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::RuntimeInit)?;

        Ok(Self {
            base_url,
            token,
            timeout,
            http,
            runtime,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    fn get<T: DeserializeOwned>(
        &self,
        call: &'static str,
        url: Url,
        query: &[(&'static str, String)],
    ) -> Result<T, GatewayError> {
        let request = self.http.get(url).query(query);
        let body = self.dispatch(call, request)?;
        decode(call, &body)
    }

    fn dispatch(&self, call: &'static str, request: RequestBuilder) -> Result<String, GatewayError> {
        let request = request.bearer_auth(&self.token);
        let started = Instant::now();

        let exchange = async move {
            let response = request
                .send()
                .await
                .map_err(|source| GatewayError::Transport { call, source })?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|source| GatewayError::Transport { call, source })?;
            Ok::<_, GatewayError>((status, body))
        };

        let outcome = self.block_on_with_deadline(call, exchange);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let (status, body) = match outcome {
            Ok(pair) => pair,
            Err(error) => {
                tracing::warn!(call, elapsed_ms, error = %error, "gateway call failed");
                return Err(error);
            }
        };
        tracing::debug!(call, status = status.as_u16(), elapsed_ms, "gateway call completed");

        check_status(call, status, body)
    }

    fn block_on_with_deadline<F>(
        &self,
        call: &'static str,
        exchange: F,
    ) -> Result<(StatusCode, String), GatewayError>
    where
        F: Future<Output = Result<(StatusCode, String), GatewayError>>,
    {
        match self.timeout {
            // The timer must be armed inside the runtime context.
            Some(timeout) => self
                .runtime
                .block_on(async { tokio::time::timeout(timeout, exchange).await })
                .map_err(|_| GatewayError::Timeout { call, timeout })?,
            None => self.runtime.block_on(exchange),
        }
    }
}

impl ChatGateway for HttpGateway {
    fn list_accounts(&self) -> Result<Vec<Account>, GatewayError> {
        let accounts: Vec<WireAccount> =
            self.get("accounts.list", self.endpoint(&["accounts"]), &[])?;
        Ok(accounts.into_iter().map(Account::from).collect())
    }

    fn list_chats(&self, request: &ChatListRequest) -> Result<Page<Chat>, GatewayError> {
        let page: WirePage<WireChat> = self.get(
            "chats.list",
            self.endpoint(&["chats"]),
            &chat_list_query(request),
        )?;
        Ok(page.into_page(Chat::from))
    }

    fn search_chats(&self, request: &ChatSearchRequest) -> Result<Page<Chat>, GatewayError> {
        let page: WirePage<WireChat> = self.get(
            "chats.search",
            self.endpoint(&["chats", "search"]),
            &chat_search_query(request),
        )?;
        Ok(page.into_page(Chat::from))
    }

    fn get_chat(&self, chat_id: &str) -> Result<Chat, GatewayError> {
        let chat: WireChat = self.get("chats.get", self.endpoint(&["chats", chat_id]), &[])?;
        Ok(Chat::from(chat))
    }

    fn archive_chat(&self, chat_id: &str, archived: bool) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.endpoint(&["chats", chat_id, "archive"]))
            .json(&json!({ "archived": archived }));
        self.dispatch("chats.archive", request).map(|_| ())
    }

    fn search_messages(
        &self,
        request: &MessageSearchRequest,
    ) -> Result<Page<Message>, GatewayError> {
        let page: WirePage<WireMessage> = self.get(
            "messages.search",
            self.endpoint(&["messages", "search"]),
            &message_search_query(request),
        )?;
        Ok(page.into_page(Message::from))
    }

    fn search(&self, query: &str) -> Result<SearchBuckets, GatewayError> {
        let response: WireSearchResponse = self.get(
            "search",
            self.endpoint(&["search"]),
            &[("query", query.to_owned())],
        )?;
        Ok(SearchBuckets::from(response))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let invalid = |reason: String| AppError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_owned()));
    }
    Ok(url)
}

fn check_status(call: &'static str, status: StatusCode, body: String) -> Result<String, GatewayError> {
    if status.is_success() {
        return Ok(body);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Unauthorized {
            call,
            status: status.as_u16(),
        }),
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound { call }),
        _ => Err(GatewayError::Status {
            call,
            status: status.as_u16(),
            body: excerpt(&body),
        }),
    }
}

fn decode<T: DeserializeOwned>(call: &'static str, body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|source| GatewayError::Decode { call, source })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_owned();
    }
    let mut cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}

fn push_page(pairs: &mut QueryPairs, page: &PageRequest) {
    if let Some(cursor) = &page.cursor {
        pairs.push(("cursor", cursor.to_string()));
    }
    if let Some(direction) = page.direction.api_value() {
        pairs.push(("direction", direction.to_owned()));
    }
}

fn chat_list_query(request: &ChatListRequest) -> QueryPairs {
    let mut pairs: QueryPairs = request
        .account_ids
        .iter()
        .map(|id| ("accountIDs", id.clone()))
        .collect();
    push_page(&mut pairs, &request.page);
    pairs
}

fn chat_search_query(request: &ChatSearchRequest) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    if let Some(query) = &request.query {
        pairs.push(("query", query.clone()));
    }
    if let Some(inbox) = request.inbox.api_value() {
        pairs.push(("inbox", inbox.to_owned()));
    }
    if let Some(unread_only) = request.unread_only {
        pairs.push(("unreadOnly", unread_only.to_string()));
    }
    if let Some(chat_type) = request.chat_type.api_value() {
        pairs.push(("type", chat_type.to_owned()));
    }
    if let Some(scope) = request.scope.api_value() {
        pairs.push(("scope", scope.to_owned()));
    }
    if let Some(limit) = request.limit {
        pairs.push(("limit", limit.to_string()));
    }
    push_page(&mut pairs, &request.page);
    pairs
}

fn message_search_query(request: &MessageSearchRequest) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    if let Some(query) = &request.query {
        pairs.push(("query", query.clone()));
    }
    if let Some(limit) = request.limit {
        pairs.push(("limit", limit.to_string()));
    }
    push_page(&mut pairs, &request.page);
    pairs
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    use super::*;
    use crate::domain::{
        filters::{ChatTypeFilter, Inbox, SearchScope},
        page::{Cursor, Direction},
    };

    /// Serves exactly one HTTP exchange and reports the request head and body.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
                head.push_str(&line);
            }
            let mut request_body = vec![0u8; content_length];
            let _ = reader.read_exact(&mut request_body);
            head.push_str(&String::from_utf8_lossy(&request_body));

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let _ = tx.send(head);
        });

        (base, rx)
    }

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(base, "test-token".to_owned(), Some(Duration::from_secs(5)))
            .expect("gateway builds")
    }

    #[test]
    fn list_chats_decodes_page_and_sends_bearer_token() {
        let (base, request) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"items":[{"id":"c1","title":"Team","type":"group"}],"hasMore":true,"oldestCursor":"o1","newestCursor":"n1"}"#,
        );

        let page = gateway(&base)
            .list_chats(&ChatListRequest {
                account_ids: vec!["signal".to_owned()],
                page: PageRequest::before(Cursor::new("x").expect("cursor")),
            })
            .expect("list decodes");

        let head = request.recv().expect("request captured");
        assert!(head.starts_with("GET /v1/chats?accountIDs=signal&cursor=x&direction=before "));
        assert!(head.to_ascii_lowercase().contains("authorization: bearer test-token"));
        assert_eq!(page.items[0].id, "c1");
        assert!(page.has_more);
        assert_eq!(page.oldest_cursor, Cursor::new("o1"));
    }

    #[test]
    fn get_chat_escapes_the_id_and_maps_404_to_not_found() {
        let (base, request) = serve_once("HTTP/1.1 404 Not Found", "{}");

        let err = gateway(&base)
            .get_chat("!room:beeper.local")
            .expect_err("must fail");

        let head = request.recv().expect("request captured");
        assert!(head.starts_with("GET /v1/chats/!room:beeper.local "));
        assert!(matches!(err, GatewayError::NotFound { call: "chats.get" }));
    }

    #[test]
    fn archive_posts_the_flag() {
        let (base, request) = serve_once("HTTP/1.1 200 OK", r#"{"success":true}"#);

        gateway(&base)
            .archive_chat("c1", false)
            .expect("archive succeeds");

        let head = request.recv().expect("request captured");
        assert!(head.starts_with("POST /v1/chats/c1/archive "));
        assert!(head.ends_with(r#"{"archived":false}"#));
    }

    #[test]
    fn malformed_body_is_a_decode_error_naming_the_call() {
        let (base, _request) = serve_once("HTTP/1.1 200 OK", "not json");

        let err = gateway(&base)
            .search_messages(&MessageSearchRequest::default())
            .expect_err("must fail");

        assert!(matches!(err, GatewayError::Decode { call: "messages.search", .. }));
    }

    #[test]
    fn unauthorized_status_is_reported_as_such() {
        let (base, _request) = serve_once("HTTP/1.1 401 Unauthorized", "{}");

        let err = gateway(&base).list_accounts().expect_err("must fail");

        assert!(matches!(
            err,
            GatewayError::Unauthorized { call: "accounts.list", status: 401 }
        ));
    }

    #[test]
    fn server_error_keeps_a_body_excerpt() {
        let (base, _request) = serve_once("HTTP/1.1 500 Internal Server Error", "boom");

        let err = gateway(&base).search("hello").expect_err("must fail");

        assert!(matches!(
            err,
            GatewayError::Status { call: "search", status: 500, ref body } if body == "boom"
        ));
    }

    #[test]
    fn stalled_server_hits_the_deadline() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let holder = thread::spawn(move || {
            let accepted = listener.accept();
            thread::sleep(Duration::from_millis(600));
            drop(accepted);
        });

        let gateway = HttpGateway::new(&base, "t".to_owned(), Some(Duration::from_millis(150)))
            .expect("gateway builds");
        let err = gateway.search("slow").expect_err("must time out");

        assert!(matches!(err, GatewayError::Timeout { call: "search", .. }));
        let _ = holder.join();
    }

    #[test]
    fn search_query_omits_unset_filters() {
        let pairs = chat_search_query(&ChatSearchRequest::default());

        assert!(pairs.is_empty());
    }

    #[test]
    fn search_query_translates_set_filters() {
        let pairs = chat_search_query(&ChatSearchRequest {
            query: Some("team".to_owned()),
            inbox: Inbox::LowPriority,
            unread_only: Some(true),
            chat_type: ChatTypeFilter::Direct,
            scope: SearchScope::Participants,
            limit: Some(25),
            page: PageRequest {
                cursor: None,
                direction: Direction::After,
            },
        });

        assert_eq!(
            pairs,
            vec![
                ("query", "team".to_owned()),
                ("inbox", "low-priority".to_owned()),
                ("unreadOnly", "true".to_owned()),
                ("type", "single".to_owned()),
                ("scope", "participants".to_owned()),
                ("limit", "25".to_owned()),
                ("direction", "after".to_owned()),
            ]
        );
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(matches!(
            parse_base_url("ftp://localhost"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn endpoint_keeps_a_base_path_prefix() {
        let gateway = HttpGateway::new("http://localhost:23373/desk/", "t".to_owned(), None)
            .expect("gateway builds");

        assert_eq!(
            gateway.endpoint(&["chats", "search"]).as_str(),
            "http://localhost:23373/desk/v1/chats/search"
        );
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = HttpGateway::from_config(&ApiConfig::default()).err();

        assert!(matches!(err, Some(AppError::MissingToken)));
    }
}
