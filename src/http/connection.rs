use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::writer::ResponseWriter;
use crate::server::router::Router;

/// Largest request accepted; whatever one read returns is the request.
pub const BUFFER_SIZE: usize = 30720;

/// One established (post-handshake) inbound session.
///
/// The connection reads once, dispatches once, writes once and is then
/// shut down. It owns its stream, so the session cannot outlive
/// [`Connection::run`].
pub struct Connection<'r, S, R> {
    stream: S,
    router: &'r R,
    state: ConnectionState,
}

pub enum ConnectionState {
    Established,
    Dispatching(Vec<u8>),
    Responding(ResponseWriter),
    Closed,
}

/// How a connection ended when no I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A response was written
    Responded,
    /// The peer closed without sending anything
    PeerClosed,
}

impl<'r, S, R> Connection<'r, S, R>
where
    S: AsyncRead + AsyncWrite + Unpin,
    R: Router,
{
    pub fn new(stream: S, router: &'r R) -> Self {
        Self {
            stream,
            router,
            state: ConnectionState::Established,
        }
    }

    /// Drives the connection to completion and tears it down, whatever the
    /// result.
    pub async fn run(mut self) -> anyhow::Result<Outcome> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<Outcome> {
        let mut outcome = Outcome::PeerClosed;

        loop {
            match &mut self.state {
                ConnectionState::Established => {
                    let mut buf = vec![0u8; BUFFER_SIZE];
                    let n = self.stream.read(&mut buf).await?;

                    if n == 0 {
                        // Client closed connection
                        self.state = ConnectionState::Closed;
                    } else {
                        buf.truncate(n);
                        tracing::debug!(bytes = n, "Received request");
                        self.state = ConnectionState::Dispatching(buf);
                    }
                }

                ConnectionState::Dispatching(raw) => {
                    let response = self.router.dispatch(raw).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Responding(writer);
                }

                ConnectionState::Responding(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(bytes = writer.len(), "Response sent");

                    outcome = Outcome::Responded;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(outcome)
    }
}
