//! Minimal HTTP/1.1 server for integration tests.
//!
//! Every connection gets one response from a caller-supplied handler, then
//! the connection is closed. Requests are recorded so tests can assert on
//! method, path, headers and body. A TLS ClientHello is answered with a
//! plain-text response, which makes the client's handshake fail fast.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub location: Option<String>,
    pub delay: Option<Duration>,
    /// Declared body length and pause before each 10-byte chunk; replaces `body`.
    pub trickle: Option<(usize, Duration)>,
}

impl Response {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            location: None,
            delay: None,
            trickle: None,
        }
    }

    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::status(status)
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::status(301)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sends the headers at once, then the body slowly.
    pub fn trickled(mut self, len: usize, every: Duration) -> Self {
        self.trickle = Some((len, every));
        self
    }
}

pub struct TestServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    pub port: u16,
    pub(crate) requests: Arc<Mutex<Vec<Request>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start<F>(handler: F) -> TestServer
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let handler = Arc::clone(&handler);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, handler.as_ref(), &recorded));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        port,
        requests,
    }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

fn handle<F>(mut stream: TcpStream, handler: &F, recorded: &Mutex<Vec<Request>>)
where
    F: Fn(&Request) -> Response + ?Sized,
{
    set_timeouts(&stream);
    serve(&mut stream, handler, recorded, true);
}

pub(crate) fn set_timeouts(stream: &TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
}

/// Reads one request from `stream` and writes the handler's response.
/// With `reject_tls`, a TLS ClientHello gets a plain-text answer.
pub(crate) fn serve<S, F>(stream: &mut S, handler: &F, recorded: &Mutex<Vec<Request>>, reject_tls: bool)
where
    S: Read + Write,
    F: Fn(&Request) -> Response + ?Sized,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        // TLS handshake record: not HTTP.
        if reject_tls && buf.is_empty() && chunk[0] == 0x16 {
            let _ = stream.write_all(b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\n\r\n");
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        body.extend_from_slice(&chunk[..n]);
    }

    let request = Request {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    };
    recorded.lock().unwrap().push(request.clone());

    let response = handler(&request);
    if let Some(delay) = response.delay {
        thread::sleep(delay);
    }
    let location = response
        .location
        .as_deref()
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let body_len = response
        .trickle
        .map(|(len, _)| len)
        .unwrap_or(response.body.len());
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        response.status,
        reason(response.status),
        body_len,
        location,
    );
    if stream.write_all(head.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    match response.trickle {
        Some((len, every)) => {
            let mut sent = 0;
            while sent < len {
                thread::sleep(every);
                let n = (len - sent).min(10);
                if stream.write_all(&vec![b'x'; n]).is_err() || stream.flush().is_err() {
                    return;
                }
                sent += n;
            }
        }
        None => {
            let _ = stream.write_all(response.body.as_bytes());
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
