use std::path::PathBuf;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::config::Config;
use crate::fs::{FileReader, FileStat, FileSystem, Resolution, resolve, resolve_target};
use crate::http::mime::content_type;
use crate::http::parser::{MAX_REQUEST_LINE, ReadError, parse_request_line, strip_terminator};
use crate::http::request::RequestLine;
use crate::http::response::StatusCode;
use crate::http::writer::ResponseWriter;

/// One client connection, owned from accept until close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    config: Arc<Config>,
    fs: Arc<dyn FileSystem>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsing(String),
    Resolving(String, RequestLine),
    Responding(String, Reply),
    Closed,
}

/// What goes back to the client.
pub enum Reply {
    Error(StatusCode),
    File {
        path: PathBuf,
        file: FileReader,
        stat: FileStat,
    },
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            config,
            fs,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`, sending exactly one response.
    ///
    /// Request problems become error responses. The returned error only
    /// reports a failure to write that response to the client.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut result = Ok(());

        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_line().await {
                    Ok(line) => ConnectionState::Parsing(line),
                    Err(e) => {
                        debug!("Failed to read request line: {}", e);
                        let partial = String::from_utf8_lossy(&self.buffer);
                        let partial = strip_terminator(&partial).to_string();
                        ConnectionState::Responding(partial, Reply::Error(StatusCode::BadRequest))
                    }
                },

                ConnectionState::Parsing(line) => match parse_request_line(&line) {
                    Ok(request) if !request.method.is_supported() => ConnectionState::Responding(
                        line,
                        Reply::Error(StatusCode::NotImplemented),
                    ),
                    Ok(request) => ConnectionState::Resolving(line, request),
                    Err(e) => {
                        debug!("Rejected request line {:?}: {}", line, e);
                        ConnectionState::Responding(line, Reply::Error(StatusCode::BadRequest))
                    }
                },

                ConnectionState::Resolving(line, request) => {
                    let reply = lookup(&self.config, self.fs.as_ref(), &request).await;
                    ConnectionState::Responding(line, reply)
                }

                ConnectionState::Responding(line, reply) => {
                    result = self.respond(&line, reply).await;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    break;
                }
            };
        }

        // The client may already be gone; the stream is dropped either way.
        let _ = self.stream.shutdown().await;
        result
    }

    async fn read_line(&mut self) -> Result<String, ReadError> {
        match self.config.read_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.read_until_newline())
                .await
                .map_err(|_| ReadError::TimedOut)?,
            None => self.read_until_newline().await,
        }
    }

    async fn read_until_newline(&mut self) -> Result<String, ReadError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                if pos + 1 > MAX_REQUEST_LINE {
                    return Err(ReadError::TooLong);
                }

                let line = std::str::from_utf8(&self.buffer[..=pos])
                    .map_err(|_| ReadError::NotUtf8)?
                    .to_string();
                self.buffer.advance(pos + 1);
                return Ok(strip_terminator(&line).to_string());
            }

            if self.buffer.len() >= MAX_REQUEST_LINE {
                return Err(ReadError::TooLong);
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                return Err(ReadError::ClosedEarly);
            }
        }
    }

    async fn respond(&mut self, line: &str, reply: Reply) -> anyhow::Result<()> {
        let mut writer = ResponseWriter::new(&mut self.stream, line);

        match reply {
            Reply::Error(status) => writer.send_error(status).await,
            Reply::File {
                path,
                mut file,
                stat,
            } => {
                let sent = writer
                    .send_file(content_type(&path), stat.size, &mut file)
                    .await?;
                if sent != stat.size {
                    warn!(
                        "{} changed while sending: expected {} bytes, sent {}",
                        path.display(),
                        stat.size,
                        sent
                    );
                }
                Ok(())
            }
        }
    }
}

async fn lookup(config: &Config, fs: &dyn FileSystem, request: &RequestLine) -> Reply {
    let path = resolve_target(&config.document_root, &request.target);

    match resolve(fs, &path).await {
        Resolution::Found { file, stat } => Reply::File { path, file, stat },
        Resolution::OpenFailed(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            Reply::Error(StatusCode::InternalServerError)
        }
        other => Reply::Error(other.status()),
    }
}
