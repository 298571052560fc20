//! Logger module
//!
//! Console logging helpers for server lifecycle, request and access
//! logging. Handlers log through these functions rather than formatting
//! output themselves, so their HTTP contract stays testable independently
//! of log output.

use chrono::{DateTime, Local};
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

/// Diagnostic line noting a handler invocation
pub fn log_handler_invoked(name: &str) {
    println!("[Handler] Invoke {name}");
}

/// Access log line in a common-log-format style with a local timestamp
pub fn log_access(method: &Method, path: &str, status: u16, body_bytes: u64) {
    println!(
        "{}",
        format_access_line(method.as_str(), path, status, body_bytes, &Local::now())
    );
}

fn format_access_line(
    method: &str,
    path: &str,
    status: u16,
    body_bytes: u64,
    time: &DateTime<Local>,
) -> String {
    format!(
        "[{}] \"{method} {path}\" {status} {body_bytes}",
        time.format("%d/%b/%Y:%H:%M:%S %z")
    )
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_access_line() {
        let line = format_access_line("GET", "/tree", 200, 42, &Local::now());
        assert!(line.contains("\"GET /tree\""));
        assert!(line.contains(" 200 42"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_format_access_line_error_status() {
        let line = format_access_line("POST", "/tree", 405, 0, &Local::now());
        assert!(line.contains("\"POST /tree\""));
        assert!(line.contains(" 405 0"));
    }
}
