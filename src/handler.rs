//! Endpoint handlers
//!
//! Handlers receive the shared state and produce a complete response; the
//! router has already matched method and path, and request body and query
//! parameters are ignored.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::logger;
use crate::response;

/// Handler for `GET /tree`.
///
/// Returns the favourite-tree record set as JSON. The set is read-only
/// process state, so the body is byte-identical across invocations.
pub fn get_favourite_trees(state: &AppState) -> Response<Full<Bytes>> {
    logger::log_handler_invoked("get_favourite_trees");
    response::build_json_response(StatusCode::OK, &state.trees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, PerformanceConfig, ServerConfig};
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let cfg = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
            trees: None,
        };
        AppState::new(&cfg)
    }

    #[test]
    fn test_status_and_content_type() {
        let state = test_state();
        let resp = get_favourite_trees(&state);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_body_matches_record_set() {
        let state = test_state();
        let expected = serde_json::to_vec(&state.trees).unwrap();

        let resp = get_favourite_trees(&state);
        let body = resp.into_body().collect().await.unwrap().to_bytes();

        assert_eq!(body.as_ref(), expected.as_slice());
        assert_ne!(body.as_ref(), b"{}");
    }
}
