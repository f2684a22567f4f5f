//! Scripted single-threaded HTTP/1.1 server for adapter tests.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// One request as received by [`StubServer`].
#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) body: String,
    /// Header pairs with lower-cased names.
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) method: String,
    /// Request target, path plus query string.
    pub(crate) target: String,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header_name, _)| header_name == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Answers connections with canned `(status, body)` responses, one
/// connection per response, in order.
pub(crate) struct StubServer {
    pub(crate) base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl StubServer {
    pub(crate) async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let address = listener.local_addr().expect("stub server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                recorded
                    .lock()
                    .expect("stub request log poisoned")
                    .push(request);
                write_response(&mut stream, status, &body).await;
            }
        });

        Self {
            base_url: format!("http://{address}"),
            requests,
            task,
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("stub request log poisoned")
            .clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    let header_len = loop {
        if let Some(position) = buffer
            .windows(HEADER_END.len())
            .position(|window| window == HEADER_END)
        {
            break position + HEADER_END.len();
        }
        let read = stream.read(&mut chunk).await.expect("failed to read request");
        assert!(read > 0, "connection closed before headers ended");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_len]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split(' ');
    let method = request_parts.next().unwrap_or_default().to_string();
    let target = request_parts.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = buffer[header_len..].to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await.expect("failed to read body");
        assert!(read > 0, "connection closed before body ended");
        body.extend_from_slice(&chunk[..read]);
    }

    RecordedRequest {
        body: String::from_utf8_lossy(&body).into_owned(),
        headers,
        method,
        target,
    }
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
