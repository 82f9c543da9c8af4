#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use momentum_core::{Momentum, PlanGenerator, Profile, Result, SqliteStore};
use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

/// Generator answering every request with the same body.
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    body: String,
    calls: Arc<AtomicUsize>,
}

impl CannedGenerator {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PlanGenerator for CannedGenerator {
    async fn generate(&self, _profile: &Profile) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

pub fn plan_body(weeks: usize) -> String {
    let weeks = (1..=weeks)
        .map(|i| format!(r#"{{"week":"Week {i}","youtubeVideos":[],"learningArticles":[]}}"#))
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"weeks":[{weeks}]}}"#)
}

pub fn guitar_profile() -> Profile {
    Profile {
        hobby_name: "Guitar".to_string(),
        current_skill_level: "beginner".to_string(),
        desired_skill_level: "hobby".to_string(),
        time_commitment: "casual".to_string(),
    }
}

/// Helper function to create a session over a temporary SQLite database
pub async fn create_test_session(
    generator: CannedGenerator,
) -> (TempDir, Momentum<SqliteStore, CannedGenerator>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(temp_dir.path().join("test.db"))
        .await
        .expect("Failed to open store");
    let momentum = Momentum::new(store, generator);
    momentum.load().await;
    (temp_dir, momentum)
}

/// Serves a single HTTP response on a local port and hands back the raw
/// request it received.
pub async fn serve_once(status: u16, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");
    let response = format!(
        "HTTP/1.1 {status} Status\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let request = read_request(&mut socket).await;
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        socket.shutdown().await.ok();
        tx.send(request).ok();
    });

    (format!("http://{addr}/generate-personalized-learning"), rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.expect("Failed to read request");
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}
