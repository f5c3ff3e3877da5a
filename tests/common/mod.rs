//! Mock cover generator for integration tests
//!
//! A plain `TcpListener` on an ephemeral port that answers one canned HTTP
//! response per connection and hands back what the client sent.
#![allow(dead_code)] // Each test file uses a different subset of helpers.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A request as seen by the mock generator.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// First header value with this name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the multipart body has a text field `name` holding `value`.
    pub fn has_field(&self, name: &str, value: &str) -> bool {
        let needle = format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            name, value
        );
        contains(&self.body, needle.as_bytes())
    }
}

/// Canned response served for one connection.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl CannedResponse {
    pub fn pdf(body: &[u8]) -> Self {
        CannedResponse {
            status: 200,
            reason: "OK",
            headers: vec![
                ("Content-Type", "application/pdf".to_string()),
                ("Content-Disposition", "attachment; filename=\"kth-cover.pdf\"".to_string()),
            ],
            body: body.to_vec(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        CannedResponse {
            status: 302,
            reason: "Found",
            headers: vec![("Location", location.to_string())],
            body: Vec::new(),
        }
    }

    pub fn error(status: u16, reason: &'static str, body: &str) -> Self {
        CannedResponse {
            status,
            reason,
            headers: vec![("Content-Type", "text/plain; charset=utf-8".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }
}

pub struct MockGenerator {
    url: String,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl MockGenerator {
    /// Serve `responses` in order, one connection each.
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock generator");
        let addr = listener.local_addr().expect("mock generator address");
        let url = format!("http://{}/kth-cover/kth-cover.pdf", addr);

        let handle = thread::spawn(move || {
            let mut captured = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().expect("accept");
                captured.push(read_request(&mut stream));
                write_response(&mut stream, &response);
            }
            captured
        });

        MockGenerator { url, handle }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for all canned responses to be served.
    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().expect("mock generator thread panicked")
    }
}

/// Accepts one connection and never answers it.
pub fn silent_endpoint(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent endpoint");
    let addr = listener.local_addr().expect("silent endpoint address");
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });
    format!("http://{}/kth-cover/kth-cover.pdf", addr)
}

/// An address nothing listens on.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{}/kth-cover/kth-cover.pdf", addr)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    stream.set_read_timeout(Some(Duration::from_secs(10))).expect("read timeout");
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).expect("read request head");
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    let mut body = buf[head_end + 4..].to_vec();
    let header = |name: &str| {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    if let Some(len) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        while body.len() < len {
            let n = stream.read(&mut chunk).expect("read request body");
            assert!(n > 0, "connection closed before request body");
            body.extend_from_slice(&chunk[..n]);
        }
        body.truncate(len);
    } else if header("transfer-encoding").map_or(false, |v| v.eq_ignore_ascii_case("chunked")) {
        while !body.ends_with(b"0\r\n\r\n") {
            let n = stream.read(&mut chunk).expect("read chunked body");
            assert!(n > 0, "connection closed before final chunk");
            body.extend_from_slice(&chunk[..n]);
        }
        body = dechunk(&body);
    }

    CapturedRequest {
        request_line,
        headers,
        body,
    }
}

fn write_response(stream: &mut TcpStream, response: &CannedResponse) {
    let mut out = format!("HTTP/1.1 {} {}\r\n", response.status, response.reason);
    for (name, value) in &response.headers {
        out.push_str(&format!("{}: {}\r\n", name, value));
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body.len()
    ));

    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(&response.body);
    stream.write_all(&bytes).expect("write response");
    stream.flush().expect("flush response");
}

fn dechunk(mut data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(line_end) = find(data, b"\r\n") {
        let size_text = String::from_utf8_lossy(&data[..line_end]);
        let size_hex = size_text.split(';').next().unwrap_or("0").trim();
        let size = usize::from_str_radix(size_hex, 16).unwrap_or(0);
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        out.extend_from_slice(&data[start..start + size]);
        data = &data[start + size + 2..];
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}
