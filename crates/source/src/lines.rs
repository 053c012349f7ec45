use crate::Source;
use async_trait::async_trait;
use bytes::BytesMut;
use feed_core::{FeedError, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpStream;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder};
use tracing::{debug, info, warn};

/// Longest line accepted by default; longer lines are dropped whole.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

const READ_CHUNK: usize = 4 * 1024;

/// Newline-delimited messages over any byte stream.
///
/// Lines are handed over as raw bytes, so invalid UTF-8 surfaces later as a
/// parse error instead of killing the connection. Blank lines are skipped.
/// A line longer than the limit is discarded up to its newline and reading
/// carries on, so the read buffer never grows past the limit.
pub struct LineSource<R> {
    reader:   R,
    codec:    AnyDelimiterCodec,
    buf:      BytesMut,
    eof:      bool,
    endpoint: String,
}

impl<R> LineSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, endpoint: impl Into<String>) -> Self {
        Self::with_max_length(reader, endpoint, MAX_LINE_BYTES)
    }

    pub fn with_max_length(reader: R, endpoint: impl Into<String>, max_length: usize) -> Self {
        Self {
            reader,
            codec: AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), max_length),
            buf: BytesMut::new(),
            eof: false,
            endpoint: endpoint.into(),
        }
    }
}

impl LineSource<TcpStream> {
    /// Connect to `addr` (`host:port`).
    pub async fn connect_tcp(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| FeedError::Source(format!("connect {addr}: {e}")))?;

        info!("Connected to line source at {addr}");
        Ok(Self::new(stream, addr))
    }
}

#[cfg(unix)]
impl LineSource<tokio::net::UnixStream> {
    /// Connect to the Unix socket at `path`.
    pub async fn connect_unix(path: &str) -> Result<Self> {
        let stream = tokio::net::UnixStream::connect(path)
            .await
            .map_err(|e| FeedError::Source(format!("connect {path}: {e}")))?;

        info!("Connected to line source at {path}");
        Ok(Self::new(stream, path))
    }
}

#[async_trait]
impl<R> Source for LineSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let decoded = if self.eof {
                self.codec.decode_eof(&mut self.buf)
            } else {
                self.codec.decode(&mut self.buf)
            };

            match decoded {
                Ok(Some(line)) => {
                    let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);
                    if line.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    return Ok(Some(line.to_vec()));
                }
                Ok(None) if self.eof => {
                    debug!("Line source {} reached EOF", self.endpoint);
                    return Ok(None);
                }
                Ok(None) => {}
                Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                    warn!(
                        "Dropping line over {} bytes from {}",
                        self.codec.max_length(),
                        self.endpoint
                    );
                    continue;
                }
                Err(AnyDelimiterCodecError::Io(e)) => {
                    return Err(FeedError::Source(format!("read {}: {e}", self.endpoint)));
                }
            }

            self.buf.reserve(READ_CHUNK);
            let n = self
                .reader
                .read_buf(&mut self.buf)
                .await
                .map_err(|e| FeedError::Source(format!("read {}: {e}", self.endpoint)))?;
            if n == 0 {
                self.eof = true;
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
