use std::convert::Infallible;
use std::fmt::Display;

use axum::body::Body;
use bytes::Bytes;
use futures::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;
use tracing::warn;
use tracing::Instrument;

const CHANNEL_CAPACITY: usize = 16;

/// Wraps an upstream byte stream in a response body without buffering it.
///
/// Chunks are forwarded verbatim as they arrive. When the caller goes away the
/// forwarding task stops and drops `upstream` right away, even while the
/// upstream is idle, which closes the outbound connection. If `upstream` fails
/// part way through, a single `event: error` frame is appended and the body
/// ends.
pub fn passthrough_body<S, E>(upstream: S) -> Body
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<Result<Bytes, Infallible>>(CHANNEL_CAPACITY);
    tokio::spawn(
        async move {
            tokio::pin!(upstream);
            loop {
                let chunk = tokio::select! {
                    _ = tx.closed() => {
                        debug!("client disconnected, dropping upstream stream");
                        return;
                    }
                    chunk = upstream.next() => chunk,
                };
                let Some(chunk) = chunk else { return };
                match chunk {
                    Ok(bytes) => {
                        if tx.send(Ok(bytes)).await.is_err() {
                            debug!("client disconnected, dropping upstream stream");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("upstream stream failed mid-transfer: {e}");
                        let _ = tx.send(Ok(error_frame(&e.to_string()))).await;
                        return;
                    }
                }
            }
        }
        .in_current_span(),
    );
    Body::from_stream(ReceiverStream::new(rx))
}

fn error_frame(message: &str) -> Bytes {
    let payload = serde_json::json!({ "error": message });
    Bytes::from(format!("event: error\ndata: {payload}\n\n"))
}
