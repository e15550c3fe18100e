//! Minimal HTTP/1.1 server standing in for the API and for probed hosts.
//!
//! GET answers `get_status` with the configured JSON body; HEAD answers
//! `head_status` with no body. With `redirect_head`, HEAD to any path other
//! than [`FINAL_PATH`] is answered `301` with `Location: /final`. Every
//! request line is recorded.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Redirect target used when `redirect_head` is set.
pub const FINAL_PATH: &str = "/final";

#[derive(Debug, Clone)]
pub struct ApiServerOptions {
    pub get_status: u16,
    pub head_status: u16,
    pub body: String,
    pub redirect_head: bool,
}

impl Default for ApiServerOptions {
    fn default() -> Self {
        Self {
            get_status: 200,
            head_status: 200,
            body: "{}".to_string(),
            redirect_head: false,
        }
    }
}

pub struct ApiServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ApiServer {
    /// Request lines seen so far, e.g. "GET /api?domain=example.com HTTP/1.1".
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(opts: ApiServerOptions) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &opts, &seen));
        }
    });
    ApiServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

/// A localhost URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, opts: &ApiServerOptions, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let request_line = request.lines().next().unwrap_or("").to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    seen.lock().unwrap().push(request_line);

    if method.eq_ignore_ascii_case("HEAD") {
        if opts.redirect_head && path != FINAL_PATH {
            let response = format!(
                "HTTP/1.1 301 Moved Permanently\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                FINAL_PATH
            );
            let _ = stream.write_all(response.as_bytes());
            return;
        }
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            opts.head_status,
            reason(opts.head_status)
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            opts.get_status,
            reason(opts.get_status),
            opts.body.len(),
            opts.body
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
