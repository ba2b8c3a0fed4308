//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::page::CdpPage;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(super) type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

pub(super) struct PendingRequest {
    pub tx: oneshot::Sender<Result<Value, CdpError>>,
}

/// Shared command-dispatch state between the client and its page sessions.
pub(super) struct Dispatch {
    pub ws_tx: tokio::sync::Mutex<WsSink>,
    pub pending: Mutex<HashMap<u64, PendingRequest>>,
    pub request_id: AtomicU64,
}

impl Dispatch {
    /// Send a command and wait (bounded) for its response.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await?;
        }

        match tokio::time::timeout(std::time::Duration::from_secs(30), rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// Client connected to a browser's debugging endpoint.
pub struct CdpClient {
    http_endpoint: String,
    dispatch: Arc<Dispatch>,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to a browser at `endpoint` (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::BrowserNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::BrowserNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Connected to browser: {}", version.browser);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(e.to_string()))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let dispatch = Arc::new(Dispatch {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            pending: Mutex::new(HashMap::new()),
            request_id: AtomicU64::new(1),
        });

        let recv_task = {
            let dispatch = dispatch.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, dispatch).await;
            })
        };

        Ok(Self {
            http_endpoint,
            dispatch,
            recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, dispatch: Arc<Dispatch>) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => {
                            let Some(id) = resp.id else {
                                // Unsolicited event; nothing here subscribes.
                                continue;
                            };
                            let pending_req = dispatch.pending.lock().remove(&id);
                            if let Some(req) = pending_req {
                                let result = if let Some(error) = resp.error {
                                    Err(CdpError::Protocol {
                                        code: error.code,
                                        message: error.message,
                                    })
                                } else {
                                    Ok(resp.result.unwrap_or(Value::Null))
                                };
                                let _ = req.tx.send(result);
                            }
                        }
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("CDP WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("CDP WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// List open pages via the HTTP discovery endpoint.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
        Ok(pages.into_iter().filter(|p| p.kind == "page").collect())
    }

    /// Attach to an existing page and enable the DOM domains.
    pub async fn attach_page(&self, target_id: &str) -> Result<CdpPage, CdpError> {
        let result = self
            .dispatch
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
                None,
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let page = CdpPage::new(self.dispatch.clone(), session_id);
        page.enable_domains().await?;

        debug!("Attached to page {}", target_id);
        Ok(page)
    }

    /// Attach to the first open page whose URL contains `fragment`.
    pub async fn attach_page_matching(&self, fragment: &str) -> Result<CdpPage, CdpError> {
        let pages = self.list_pages().await?;
        let info = pages
            .iter()
            .find(|p| p.url.contains(fragment))
            .or_else(|| pages.first())
            .ok_or_else(|| CdpError::InvalidResponse("No open pages".to_string()))?;
        self.attach_page(&info.id).await
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
