//! Deriv WebSocket client.
//!
//! One authorized socket is shared by every request. Replies are matched to
//! requests by `req_id`, so several fetches can be in flight at once. A
//! reader task routes replies and a keep-alive task pings the provider so the
//! socket survives the idle time between scan cycles. A session is dead once
//! the socket closes, a request times out, or pings go unanswered; the next
//! request then reconnects and re-authorizes.

use backon::{ExponentialBuilder, Retryable};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};
use url::Url;

use super::messages::{AuthorizeRequest, Envelope};
use crate::services::market_data::MarketDataError;

pub const DEFAULT_ENDPOINT: &str = "wss://ws.derivws.com/websockets/v3";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;
type PendingReplies = Arc<Mutex<HashMap<u64, oneshot::Sender<Value>>>>;

/// Pings that may go unanswered before the session is declared dead.
const MAX_UNANSWERED_PINGS: usize = 2;

#[derive(Clone)]
pub struct DerivSettings {
    pub endpoint: String,
    pub app_id: String,
    pub token: String,
    pub request_timeout: Duration,
    pub keepalive_interval: Duration,
    pub reconnect_attempts: usize,
}

impl DerivSettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_id: "1".to_string(),
            token: token.into(),
            request_timeout: Duration::from_secs(30),
            keepalive_interval: Duration::from_secs(30),
            reconnect_attempts: 3,
        }
    }

    pub fn connection_url(&self) -> Result<Url, MarketDataError> {
        Url::parse_with_params(&self.endpoint, &[("app_id", self.app_id.as_str())])
            .map_err(|e| MarketDataError::Connection(format!("invalid endpoint '{}': {}", self.endpoint, e)))
    }
}

impl fmt::Debug for DerivSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivSettings")
            .field("endpoint", &self.endpoint)
            .field("app_id", &self.app_id)
            .field("token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("keepalive_interval", &self.keepalive_interval)
            .field("reconnect_attempts", &self.reconnect_attempts)
            .finish()
    }
}

struct Session {
    writer: Arc<Mutex<WsWriter>>,
    pending: PendingReplies,
    alive: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Session {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn mark_dead(&self) {
        mark_dead(&self.alive, &self.pending).await;
    }

    async fn send<T: Serialize>(
        &self,
        req_id: u64,
        request: &T,
        timeout: Duration,
    ) -> Result<Value, MarketDataError> {
        let text = serde_json::to_string(request)
            .map_err(|e| MarketDataError::Protocol(format!("failed to encode request: {}", e)))?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(req_id, tx);

        // `mark_dead` clears the table after flagging the session dead, so
        // checking after the insert never leaves an orphaned waiter.
        if !self.is_alive() {
            self.pending.lock().await.remove(&req_id);
            return Err(MarketDataError::SessionClosed);
        }

        if let Err(e) = self.writer.lock().await.send(Message::Text(text)).await {
            self.mark_dead().await;
            return Err(MarketDataError::Connection(e.to_string()));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(MarketDataError::SessionClosed),
            Err(_) => {
                warn!(
                    req_id = req_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "Deriv request timed out, dropping session"
                );
                self.mark_dead().await;
                Err(MarketDataError::Timeout(timeout))
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

pub struct DerivClient {
    settings: DerivSettings,
    session: RwLock<Option<Arc<Session>>>,
    next_req_id: AtomicU64,
}

impl DerivClient {
    pub fn new(settings: DerivSettings) -> Self {
        Self {
            settings,
            session: RwLock::new(None),
            next_req_id: AtomicU64::new(1),
        }
    }

    pub fn settings(&self) -> &DerivSettings {
        &self.settings
    }

    /// Open the socket and authorize with the configured token.
    pub async fn authorize(&self) -> Result<(), MarketDataError> {
        let session = self.open_session().await?;
        *self.session.write().await = Some(session);
        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .is_some_and(|session| session.is_alive())
    }

    /// Send a request built around a fresh `req_id` and wait for its reply.
    ///
    /// A reply carrying an `error` object becomes `MarketDataError::Api`.
    pub async fn request<T, F>(&self, build: F) -> Result<Value, MarketDataError>
    where
        T: Serialize,
        F: FnOnce(u64) -> T,
    {
        let session = self.active_session().await?;
        let req_id = self.next_req_id.fetch_add(1, Ordering::Relaxed);
        let reply = session
            .send(req_id, &build(req_id), self.settings.request_timeout)
            .await?;

        if let Some(err) = envelope(&reply)?.error {
            return Err(MarketDataError::Api {
                code: err.code,
                message: err.message,
            });
        }
        Ok(reply)
    }

    async fn active_session(&self) -> Result<Arc<Session>, MarketDataError> {
        if let Some(session) = self.session.read().await.as_ref().filter(|s| s.is_alive()) {
            return Ok(session.clone());
        }

        let mut guard = self.session.write().await;
        if let Some(session) = guard.as_ref().filter(|s| s.is_alive()) {
            return Ok(session.clone());
        }

        info!("Deriv session is not connected, reconnecting...");
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_times(self.settings.reconnect_attempts);

        let session = (|| self.open_session())
            .retry(backoff)
            .when(|e: &MarketDataError| !e.is_authentication())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(error = %e, delay_ms = delay.as_millis() as u64, "Deriv reconnect failed, retrying");
            })
            .await?;

        *guard = Some(session.clone());
        Ok(session)
    }

    async fn open_session(&self) -> Result<Arc<Session>, MarketDataError> {
        let url = self.settings.connection_url()?;
        debug!(endpoint = %self.settings.endpoint, "Connecting to Deriv WebSocket");

        let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| MarketDataError::Connection(e.to_string()))?;
        let (writer, reader) = stream.split();

        let writer = Arc::new(Mutex::new(writer));
        let pending: PendingReplies = Arc::new(Mutex::new(HashMap::new()));
        let alive = Arc::new(AtomicBool::new(true));
        let unanswered_pings = Arc::new(AtomicUsize::new(0));

        let reader_task = tokio::spawn(read_replies(
            reader,
            pending.clone(),
            alive.clone(),
            unanswered_pings.clone(),
        ));
        let keepalive_task = tokio::spawn(keep_alive(
            writer.clone(),
            pending.clone(),
            alive.clone(),
            unanswered_pings,
            self.settings.keepalive_interval,
        ));

        let session = Session {
            writer,
            pending,
            alive,
            tasks: vec![reader_task, keepalive_task],
        };

        let req_id = self.next_req_id.fetch_add(1, Ordering::Relaxed);
        let request = AuthorizeRequest {
            authorize: &self.settings.token,
            req_id,
        };
        let reply = session
            .send(req_id, &request, self.settings.request_timeout)
            .await?;

        if let Some(err) = envelope(&reply)?.error {
            return Err(MarketDataError::Authentication(format!("{}: {}", err.code, err.message)));
        }

        info!("Deriv session authorized");
        Ok(Arc::new(session))
    }
}

fn envelope(reply: &Value) -> Result<Envelope, MarketDataError> {
    Envelope::deserialize(reply).map_err(|e| MarketDataError::Protocol(e.to_string()))
}

async fn mark_dead(alive: &AtomicBool, pending: &PendingReplies) {
    alive.store(false, Ordering::SeqCst);
    pending.lock().await.clear();
}

async fn read_replies(
    mut reader: WsReader,
    pending: PendingReplies,
    alive: Arc<AtomicBool>,
    unanswered_pings: Arc<AtomicUsize>,
) {
    while let Some(frame) = reader.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch_reply(&pending, &unanswered_pings, &text).await,
            Ok(Message::Close(frame)) => {
                debug!(frame = ?frame, "Deriv closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Deriv WebSocket read error");
                break;
            }
        }
    }

    mark_dead(&alive, &pending).await;
}

async fn dispatch_reply(pending: &PendingReplies, unanswered_pings: &AtomicUsize, text: &str) {
    let reply: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Ignoring undecodable Deriv message");
            return;
        }
    };

    if reply.get("msg_type").and_then(Value::as_str) == Some("ping") {
        unanswered_pings.store(0, Ordering::SeqCst);
    }

    let Some(req_id) = reply.get("req_id").and_then(Value::as_u64) else {
        trace!(msg_type = ?reply.get("msg_type"), "Ignoring unsolicited Deriv message");
        return;
    };

    match pending.lock().await.remove(&req_id) {
        Some(tx) => {
            let _ = tx.send(reply);
        }
        None => debug!(req_id = req_id, "Reply for an abandoned request"),
    }
}

async fn keep_alive(
    writer: Arc<Mutex<WsWriter>>,
    pending: PendingReplies,
    alive: Arc<AtomicBool>,
    unanswered_pings: Arc<AtomicUsize>,
    every: Duration,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if !alive.load(Ordering::SeqCst) {
            break;
        }

        let outstanding = unanswered_pings.fetch_add(1, Ordering::SeqCst);
        if outstanding >= MAX_UNANSWERED_PINGS {
            warn!(outstanding = outstanding, "Deriv stopped answering pings, dropping session");
            mark_dead(&alive, &pending).await;
            break;
        }

        let ping = json!({ "ping": 1 }).to_string();
        if let Err(e) = writer.lock().await.send(Message::Text(ping)).await {
            warn!(error = %e, "Deriv keep-alive failed");
            mark_dead(&alive, &pending).await;
            break;
        }
    }
}
