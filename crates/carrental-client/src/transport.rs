//! TCP transport for the client.
//!
//! Provides [`ConnectedClient`] which handles socket I/O for frame transport.
//! This is a thin layer that just sends/receives frames - protocol logic
//! remains in the Sans-IO [`Client`](crate::Client).

use std::time::Duration;

use carrental_proto::Frame;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Transport tuning.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Capacity of each frame channel.
    pub channel_capacity: usize,
    /// Upper bound on the TCP connect.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { channel_capacity: 32, connect_timeout: Duration::from_secs(10) }
    }
}

/// Handle to a connected client with TCP transport.
///
/// Provides channels for frame transport. Frames are sent/received via
/// the channels, and an internal task handles the socket I/O. When the server
/// closes the stream, `from_server` yields `None`.
pub struct ConnectedClient {
    /// Send frames to the server.
    pub to_server: mpsc::Sender<Frame>,
    /// Receive frames from the server.
    pub from_server: mpsc::Receiver<Frame>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect to a reservation server with default settings.
///
/// Returns a [`ConnectedClient`] with channels for frame transport.
///
/// # Errors
///
/// - `TransportError::Connection` if the address cannot be reached
pub async fn connect(server_addr: &str) -> Result<ConnectedClient, TransportError> {
    connect_with_config(server_addr, TransportConfig::default()).await
}

/// Connect to a reservation server.
///
/// # Errors
///
/// - `TransportError::Connection` if the connect fails or times out
pub async fn connect_with_config(
    server_addr: &str,
    config: TransportConfig,
) -> Result<ConnectedClient, TransportError> {
    let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(server_addr))
        .await
        .map_err(|_| TransportError::Connection(format!("timed out connecting to {server_addr}")))?
        .map_err(|e| TransportError::Connection(format!("connect to {server_addr} failed: {e}")))?;

    stream
        .set_nodelay(true)
        .map_err(|e| TransportError::Connection(format!("set_nodelay failed: {e}")))?;

    let (read, write) = stream.into_split();

    let (to_server_tx, to_server_rx) = mpsc::channel::<Frame>(config.channel_capacity);
    let (from_server_tx, from_server_rx) = mpsc::channel::<Frame>(config.channel_capacity);

    let handle = tokio::spawn(run_connection(read, write, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    read: OwnedReadHalf,
    mut write: OwnedWriteHalf,
    mut to_server: mpsc::Receiver<Frame>,
    from_server: mpsc::Sender<Frame>,
) {
    let recv_handle = tokio::spawn(async move {
        if let Err(e) = read_frames(read, from_server).await {
            tracing::warn!(error = %e, "inbound stream ended");
        }
    });

    while let Some(frame) = to_server.recv().await {
        if let Err(e) = send_frame(&mut write, &frame).await {
            tracing::warn!(error = %e, command = %frame.command, "send failed");
            break;
        }
    }

    let _ = write.shutdown().await;
    recv_handle.abort();
}

/// Read NUL-terminated frames until the server closes the stream.
async fn read_frames(
    read: OwnedReadHalf,
    tx: mpsc::Sender<Frame>,
) -> Result<(), TransportError> {
    let mut reader = BufReader::new(read);
    let mut buf = Vec::with_capacity(4096);

    loop {
        buf.clear();
        let n = reader
            .read_until(Frame::TERMINATOR, &mut buf)
            .await
            .map_err(|e| TransportError::Stream(format!("read failed: {e}")))?;

        if n == 0 {
            return Ok(());
        }

        if buf.last() != Some(&Frame::TERMINATOR) {
            // Trailing heart-beat newlines before close are not a frame.
            if buf.iter().all(|b| matches!(b, b'\n' | b'\r')) {
                return Ok(());
            }
            return Err(TransportError::Stream("connection closed mid-frame".into()));
        }

        let frame = Frame::decode(&buf)
            .map_err(|e| TransportError::Protocol(format!("frame decode failed: {e}")))?;

        tracing::trace!(command = %frame.command, "frame received");

        tx.send(frame)
            .await
            .map_err(|e| TransportError::Stream(format!("channel send failed: {e}")))?;
    }
}

/// Encode and write one frame.
async fn send_frame(write: &mut OwnedWriteHalf, frame: &Frame) -> Result<(), TransportError> {
    let mut buf = Vec::new();
    frame.encode(&mut buf).map_err(|e| TransportError::Protocol(format!("encode failed: {e}")))?;

    write.write_all(&buf).await.map_err(|e| TransportError::Stream(format!("write failed: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use carrental_proto::{Command, headers};
    use tokio::{io::AsyncReadExt, net::TcpListener};

    use super::*;

    #[tokio::test]
    async fn frames_cross_the_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr").to_string();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");

            let mut received = Vec::new();
            let mut byte = [0u8; 1];
            loop {
                socket.read_exact(&mut byte).await.expect("read");
                received.push(byte[0]);
                if byte[0] == 0 {
                    break;
                }
            }

            socket.write_all(b"\n\nCONNECTED\nversion:1.2\n\n\0").await.expect("write");
            received
        });

        let mut client = connect(&addr).await.expect("connect");
        client
            .to_server
            .send(Frame::new(Command::Connect).with_header(headers::HOST, "localhost"))
            .await
            .expect("queue");

        let reply = client.from_server.recv().await.expect("reply");
        assert_eq!(reply.command, Command::Connected);
        assert_eq!(reply.header(headers::VERSION), Some("1.2"));

        let received = server.await.expect("server task");
        let decoded = Frame::decode(&received).expect("decode");
        assert_eq!(decoded.command, Command::Connect);

        client.stop();
    }

    #[tokio::test]
    async fn closed_server_ends_inbound_channel() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr").to_string();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept");
            drop(socket);
        });

        let mut client = connect(&addr).await.expect("connect");
        assert!(client.from_server.recv().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr").to_string();
        drop(listener);

        let result = connect(&addr).await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
