#![allow(dead_code)]

use std::sync::Arc;

use statik::config::Config;
use statik::fs::FileSystem;
use statik::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(raw: &[u8]) -> Self {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no header terminator");
        let head = std::str::from_utf8(&raw[..split]).expect("head is not utf-8");
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default().to_string();
        let headers = lines
            .map(|line| {
                let (k, v) = line.split_once(": ").expect("malformed header");
                (k.to_string(), v.to_string())
            })
            .collect();

        Self {
            status_line,
            headers,
            body: raw[split + 4..].to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Runs one connection over an in-memory pipe and returns everything the
/// server wrote. With `close_after_write` the client half-closes after
/// sending, as a client that gives up would.
pub async fn exchange(
    cfg: Config,
    fs: Arc<dyn FileSystem>,
    request: &[u8],
    close_after_write: bool,
) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let handle = tokio::spawn(Connection::new(server, Arc::new(cfg), fs).run());

    client.write_all(request).await.unwrap();
    if close_after_write {
        client.shutdown().await.unwrap();
    }

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    handle.await.unwrap().unwrap();
    out
}

/// Collects everything a `fmt` subscriber writes, for asserting on log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<std::sync::Mutex<Vec<u8>>>);

impl LogCapture {
    /// Installs a subscriber for the current thread until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// How many lines carry the access-log entry for `request_line` and `code`.
    pub fn access_entries(&self, request_line: &str, code: u16) -> usize {
        let entry = format!("\"{}\" - {}", request_line, code);
        self.contents()
            .lines()
            .filter(|line| line.ends_with(&entry))
            .count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
