//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned GET responses keyed by request path. Each route fixes status,
//! headers and body; a route can also omit `Content-Length` (body ends on
//! close), stall before answering, or stop after the first chunk of its body.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Send `Content-Length: <body.len()>` (ignored if `declared_length` is set).
    pub with_length: bool,
    /// Explicit `Content-Length` value, independent of the body actually sent.
    pub declared_length: Option<String>,
    /// Sleep this long before writing anything.
    pub stall: Option<Duration>,
}

impl Route {
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
            with_length: true,
            declared_length: None,
            stall: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: "302 Found",
            headers: vec![
                ("Location".to_string(), location.to_string()),
                ("Content-Type".to_string(), "text/html".to_string()),
            ],
            body: Vec::new(),
            with_length: true,
            declared_length: None,
            stall: None,
        }
    }

    pub fn status(status: &'static str, content_type: &str) -> Self {
        Self {
            status,
            ..Self::ok(content_type, b"error".to_vec())
        }
    }

    pub fn without_length(mut self) -> Self {
        self.with_length = false;
        self
    }

    pub fn declared(mut self, value: &str) -> Self {
        self.declared_length = Some(value.to_string());
        self
    }

    pub fn stalled(mut self, d: Duration) -> Self {
        self.stall = Some(d);
        self
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on localhost where nothing is listening.
pub fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
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
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");

    let route = match routes.get(path) {
        Some(r) => r,
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
    };

    if let Some(d) = route.stall {
        thread::sleep(d);
    }

    let mut head = format!("HTTP/1.1 {}\r\nConnection: close\r\n", route.status);
    for (name, value) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    if let Some(declared) = &route.declared_length {
        head.push_str(&format!("Content-Length: {}\r\n", declared));
    } else if route.with_length {
        head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}
