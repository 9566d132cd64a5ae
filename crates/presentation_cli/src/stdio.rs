//! Line-delimited tool runner
//!
//! Reads one JSON request per line, `{"id": .., "tool": "..", "arguments": {..}}`,
//! runs each on its own task and writes `{"id": .., "result": {..}}` lines
//! in completion order. `id` is echoed back verbatim so callers can match
//! responses to requests.

use std::sync::Arc;

use application::{RequestContext, ToolDispatcher, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// A tool call read from the input stream
#[derive(Debug, Deserialize)]
pub struct StdioRequest {
    /// Caller-chosen correlation value
    #[serde(default)]
    pub id: Value,
    /// Tool name
    pub tool: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Value,
}

/// A tool result written to the output stream
#[derive(Debug, Serialize)]
pub struct StdioResponse {
    /// The `id` of the request this answers (`null` for unreadable requests)
    pub id: Value,
    /// The tool result
    pub result: ToolResult,
}

/// Serve requests from `input` until EOF or `shutdown`
///
/// Calls still running when the input ends are awaited; on shutdown they
/// are canceled and answered with an error result.
///
/// # Errors
///
/// Returns an error if reading the input or writing the output fails.
pub async fn serve<R, W>(
    dispatcher: Arc<ToolDispatcher>,
    input: R,
    output: W,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<StdioResponse>();
    let writer = tokio::spawn(write_responses(rx, output));

    let mut calls = JoinSet::new();
    let mut lines = input.lines();

    loop {
        let line = tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                info!("Shutdown requested, no longer reading requests");
                break;
            },
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let request = match serde_json::from_str::<StdioRequest>(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed request line");
                let _ = tx.send(StdioResponse {
                    id: Value::Null,
                    result: ToolResult::error(format!("Malformed request: {e}")),
                });
                continue;
            },
        };

        let dispatcher = Arc::clone(&dispatcher);
        let ctx = RequestContext::child_of(&shutdown);
        let tx = tx.clone();
        calls.spawn(async move {
            let result = dispatcher
                .call(&ctx, &request.tool, request.arguments)
                .await;
            let _ = tx.send(StdioResponse {
                id: request.id,
                result,
            });
        });
    }

    while let Some(joined) = calls.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Tool task failed");
        }
    }
    drop(tx);

    writer.await??;
    Ok(())
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<StdioResponse>,
    mut output: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        output.write_all(&line).await?;
        output.flush().await?;
    }
    output.shutdown().await
}
