//! Newline-delimited JSON-RPC server loop.
//!
//! Responsibilities:
//! - Read one JSON-RPC message per line and reply on the writer, one line each.
//! - Run every `tools/call` as its own task so a long search does not block
//!   `ping`, `tools/list` or other calls.
//! - Honor `notifications/cancelled` by cancelling the matching call's token.
//! - Shut down on EOF or when the shutdown token fires, then close the client.
//!
//! Does NOT handle:
//! - Tool semantics or argument validation (see `handlers`).
//!
//! Invariants:
//! - Only the writer task touches the output stream.
//! - Every spawned call is joined before the client is closed.
//! - A call cancelled by the peer produces no response.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use splunk_client::{CancellationToken, SplunkClient};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::handlers;
use crate::protocol::{INVALID_REQUEST, PARSE_ERROR, Request, Response};

/// MCP server owning the connected Splunk client.
pub struct McpServer {
    client: Arc<SplunkClient>,
}

/// Per-run dispatch state.
struct Dispatcher {
    client: Arc<SplunkClient>,
    responses: UnboundedSender<Response>,
    shutdown: CancellationToken,
    calls: JoinSet<String>,
    /// Cancellation handle per in-flight `tools/call`, keyed by the JSON text of its id.
    in_flight: HashMap<String, CancellationToken>,
}

impl McpServer {
    pub fn new(client: SplunkClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Serve until `reader` reaches EOF or `shutdown` is cancelled.
    ///
    /// Outstanding calls are cancelled (their search jobs are still deleted),
    /// then the client is closed, whatever the outcome of the read loop.
    pub async fn run<R, W>(self, reader: R, writer: W, shutdown: CancellationToken) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!("Splunk MCP server starting on stdio");

        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(writer, rx));

        let mut dispatcher = Dispatcher {
            client: Arc::clone(&self.client),
            responses: tx,
            shutdown: shutdown.clone(),
            calls: JoinSet::new(),
            in_flight: HashMap::new(),
        };
        let read_result = dispatcher.read_loop(reader).await;
        dispatcher.drain().await;
        drop(dispatcher);

        let write_result = writer_task.await;
        self.close_client();

        read_result?;
        write_result.context("Response writer task failed")??;
        info!("Splunk MCP server stopped");
        Ok(())
    }

    fn close_client(self) {
        match Arc::try_unwrap(self.client) {
            Ok(mut client) => client.close(),
            Err(shared) => warn!(
                references = Arc::strong_count(&shared),
                "Splunk client still shared at shutdown; releasing on last drop"
            ),
        }
    }
}

impl Dispatcher {
    async fn read_loop<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> anyhow::Result<()> {
        let mut lines = reader.lines();
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested");
                    return Ok(());
                }
                Some(joined) = self.calls.join_next(), if !self.calls.is_empty() => {
                    self.reap(joined);
                }
                line = lines.next_line() => {
                    match line.context("Failed to read request line")? {
                        Some(line) => self.dispatch_line(&line).await,
                        None => {
                            info!("Input closed");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn dispatch_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse request");
                self.send(Response::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)));
                return;
            }
        };
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                self.send(Response::error(id, INVALID_REQUEST, format!("Invalid request: {}", e)));
                return;
            }
        };
        debug!(method = %request.method, "Received request");

        match (request.method.as_str(), request.id.clone()) {
            ("notifications/cancelled", None) => self.cancel_call(request.params.as_ref()),
            ("tools/call", Some(id)) => self.spawn_call(id, request.params),
            _ => {
                if let Some(response) =
                    handlers::handle_request(request, &self.client, &self.shutdown).await
                {
                    self.send(response);
                }
            }
        }
    }

    fn spawn_call(&mut self, id: Value, params: Option<Value>) {
        let key = id.to_string();
        let token = self.shutdown.child_token();
        self.in_flight.insert(key.clone(), token.clone());

        let client = Arc::clone(&self.client);
        let responses = self.responses.clone();
        self.calls.spawn(async move {
            let response = handlers::handle_tools_call(id, params, &client, &token).await;
            if token.is_cancelled() {
                debug!(request_id = %key, "Dropping response for cancelled call");
            } else if responses.send(response).is_err() {
                debug!(request_id = %key, "Response writer closed");
            }
            key
        });
    }

    fn cancel_call(&mut self, params: Option<&Value>) {
        let Some(request_id) = params.and_then(|p| p.get("requestId")) else {
            debug!("Cancellation notification without requestId");
            return;
        };
        let key = request_id.to_string();
        match self.in_flight.get(&key) {
            Some(token) => {
                let reason = params
                    .and_then(|p| p.get("reason"))
                    .and_then(Value::as_str)
                    .unwrap_or("unspecified");
                info!(request_id = %key, reason, "Cancelling tool call");
                token.cancel();
            }
            None => debug!(request_id = %key, "No in-flight call to cancel"),
        }
    }

    fn reap(&mut self, joined: Result<String, tokio::task::JoinError>) {
        match joined {
            Ok(key) => {
                self.in_flight.remove(&key);
            }
            Err(e) => error!(error = %e, "Tool call task failed"),
        }
    }

    /// Cancel every outstanding call and wait for each to finish its teardown.
    async fn drain(&mut self) {
        if !self.calls.is_empty() {
            info!(count = self.calls.len(), "Cancelling in-flight tool calls");
        }
        self.shutdown.cancel();
        while let Some(joined) = self.calls.join_next().await {
            self.reap(joined);
        }
    }

    fn send(&self, response: Response) {
        if self.responses.send(response).is_err() {
            debug!("Response writer closed");
        }
    }
}

async fn write_responses<W>(mut writer: W, mut rx: UnboundedReceiver<Response>) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let line = serde_json::to_string(&response).context("Failed to serialize response")?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
