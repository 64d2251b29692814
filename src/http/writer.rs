use std::time::SystemTime;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::http::request::DEFAULT_PROTOCOL;
use crate::http::response::{ERROR_CONTENT_TYPE, StatusCode, error_page};

/// Value of the `Connection` header on every response.
const CONNECTION_STATUS: &str = "Close";

/// Status line plus the headers every response carries.
pub fn status_head(status: StatusCode, date: SystemTime) -> String {
    format!(
        "{} {} {}\r\nConnection: {}\r\nDate: {}\r\n",
        DEFAULT_PROTOCOL,
        status.as_u16(),
        status.reason_phrase(),
        CONNECTION_STATUS,
        httpdate::fmt_http_date(date),
    )
}

/// Content headers and the blank line that ends the header block.
pub fn content_head(content_type: &str, content_length: u64) -> String {
    format!("Content-Type: {content_type}\r\nContent-Length: {content_length}\r\n\r\n")
}

/// Writes responses onto a client stream.
///
/// Every response goes out as status head, then content head, then body.
/// The request is logged once, before the first byte is written.
pub struct ResponseWriter<'a, S> {
    stream: &'a mut S,
    request_line: &'a str,
}

impl<'a, S> ResponseWriter<'a, S>
where
    S: AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut S, request_line: &'a str) -> Self {
        Self {
            stream,
            request_line,
        }
    }

    async fn send_basic_headers(&mut self, status: StatusCode) -> anyhow::Result<()> {
        info!("\"{}\" - {}", self.request_line, status.as_u16());

        let head = status_head(status, SystemTime::now());
        self.stream.write_all(head.as_bytes()).await?;
        Ok(())
    }

    async fn send_content_headers(
        &mut self,
        content_type: &str,
        content_length: u64,
    ) -> anyhow::Result<()> {
        let head = content_head(content_type, content_length);
        self.stream.write_all(head.as_bytes()).await?;
        Ok(())
    }

    /// Sends an error response with the rendered HTML page as body.
    pub async fn send_error(&mut self, status: StatusCode) -> anyhow::Result<()> {
        let body = error_page(status);

        self.send_basic_headers(status).await?;
        self.send_content_headers(ERROR_CONTENT_TYPE, body.len() as u64).await?;
        self.stream.write_all(body.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Sends a 200 response and copies `body` through unchanged.
    ///
    /// Returns the number of body bytes copied.
    pub async fn send_file<R>(
        &mut self,
        content_type: &str,
        content_length: u64,
        body: &mut R,
    ) -> anyhow::Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.send_basic_headers(StatusCode::Ok).await?;
        self.send_content_headers(content_type, content_length).await?;

        let copied = tokio::io::copy(body, &mut *self.stream).await?;
        self.stream.flush().await?;
        Ok(copied)
    }
}
