//! Server module
//!
//! TCP listener construction and the accept/serve loop. Each accepted
//! connection is served on its own task; requests share only the read-only
//! `AppState`, so no coordination is needed between them.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::config::AppState;
use crate::logger;
use crate::router::{self, Router};

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled,
/// so a restarted process can rebind without waiting out `TIME_WAIT`.
pub fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking is required before handing the socket to tokio
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Accept loop. Runs until the listener fails; an accept error terminates
/// the loop and propagates so the process exits reporting it.
pub async fn run(
    listener: TcpListener,
    router: Arc<Router>,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;

        if state.config.logging.access_log {
            logger::log_connection_accepted(&peer_addr);
        }

        handle_connection(stream, Arc::clone(&router), Arc::clone(&state));
    }
}

/// Serve a single connection in a spawned task: HTTP/1.1 with keep-alive
/// per configuration, under a whole-connection timeout.
fn handle_connection(stream: TcpStream, router: Arc<Router>, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive = state.config.performance.keep_alive_timeout > 0;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive {
            builder.keep_alive(true);
        }

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let router = Arc::clone(&router);
                let state = Arc::clone(&state);
                async move { router::handle_request(req, router, state).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection timeout after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
