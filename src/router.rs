//! Request routing dispatch module
//!
//! Maintains the (method, path) -> handler table and dispatches incoming
//! requests. The table is built once at startup and read-only afterwards;
//! construction cannot fail.

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler;
use crate::logger;
use crate::response;

/// A handler produces a complete response from the shared state
pub type HandlerFn = fn(&AppState) -> Response<Full<Bytes>>;

struct Route {
    method: Method,
    path: &'static str,
    handler: HandlerFn,
}

/// Route table with strict-slash normalization
pub struct Router {
    routes: Vec<Route>,
    strict_slash: bool,
}

impl Router {
    pub const fn new() -> Self {
        Self {
            routes: Vec::new(),
            strict_slash: true,
        }
    }

    /// Register a route for an exact method and path
    #[must_use]
    pub fn route(mut self, method: Method, path: &'static str, handler: HandlerFn) -> Self {
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        self
    }

    /// Dispatch a request to the matching handler.
    ///
    /// Match order: exact method+path; trailing-slash redirect when strict
    /// slash applies; 405 when the path is registered under other methods;
    /// 404 otherwise.
    pub fn dispatch(&self, method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
        if let Some(route) = self
            .routes
            .iter()
            .find(|r| r.path == path && r.method == *method)
        {
            return (route.handler)(state);
        }

        // Strict slash: "/tree/" is redirected to "/tree", never silently
        // matched.
        if self.strict_slash && path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            if let Some(route) = self.routes.iter().find(|r| r.path == trimmed) {
                return response::build_redirect_response(route.path);
            }
        }

        let allowed: Vec<&str> = self
            .routes
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.method.as_str())
            .collect();
        if !allowed.is_empty() {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return response::build_405_response(&allowed.join(", "));
        }

        response::build_404_response()
    }
}

/// Routing table for the service: a single GET endpoint
pub fn build_router() -> Router {
    Router::new().route(Method::GET, "/tree", handler::get_favourite_trees)
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    router: Arc<Router>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let response = router.dispatch(&method, &path, &state);

    if access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_access(&method, &path, response.status().as_u16(), body_bytes);
    }

    Ok(response)
}
