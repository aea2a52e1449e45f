// src/test_support.rs
// =============================================================================
// Test helpers: a tiny canned-response HTTP server standing in for GitHub and
// Anthropic, plus a Config that points at it.
//
// Routes are matched on the exact path + query string. Unknown routes get
// GitHub's 404 error object. Every request is recorded so tests can check
// headers and bodies.
//
// For transport failures there is a closed port (connection refused) and a
// silent listener (accepts, never answers) to run into the request deadline.
// =============================================================================

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hyper::header::CONTENT_TYPE;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use url::Url;

use crate::config::{Config, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

type Routes = Arc<Vec<(&'static str, u16, &'static str)>>;
type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: String,
}

pub struct MockServer {
    pub base_url: String,
    recorded: Recorded,
}

impl MockServer {
    /// Starts serving `(path_and_query, status, body)` routes on a random port
    pub async fn start(routes: Vec<(&'static str, u16, &'static str)>) -> Self {
        let routes: Routes = Arc::new(routes);
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));

        let make_svc = {
            let recorded = recorded.clone();
            make_service_fn(move |_conn| {
                let routes = routes.clone();
                let recorded = recorded.clone();
                async move {
                    Ok::<_, Infallible>(service_fn(move |req| {
                        respond(routes.clone(), recorded.clone(), req)
                    }))
                }
            })
        };

        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_svc);
        let addr = server.local_addr();
        tokio::spawn(server);

        MockServer {
            base_url: format!("http://{}", addr),
            recorded,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn respond(
    routes: Routes,
    recorded: Recorded,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let (method, path, authorization, api_key) = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        (
            req.method().to_string(),
            path,
            header("authorization"),
            header("x-api-key"),
        )
    };

    let body = hyper::body::to_bytes(req.into_body())
        .await
        .unwrap_or_default();

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        authorization,
        api_key,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, body) = routes
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, status, body)| (*status, *body))
        .unwrap_or((404, r#"{"message": "Not Found"}"#));

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::from_u16(status).unwrap();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, "application/json".parse().unwrap());
    Ok(response)
}

/// Base URL of a local port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Starts a listener that accepts connections and never answers
///
/// Sockets are held open for the life of the runtime, so a client only gets
/// out through its own deadline.
pub async fn start_silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// A Config pointing both upstreams at local mock servers, no credentials
pub fn test_config(github_base: &str, anthropic_base: &str) -> Config {
    Config {
        github_token: None,
        claude_api_key: None,
        github_api_url: Url::parse(github_base).unwrap(),
        anthropic_api_url: Url::parse(anthropic_base).unwrap(),
        model: DEFAULT_MODEL.to_string(),
        max_tokens: DEFAULT_MAX_TOKENS,
        timeout: Duration::from_secs(5),
    }
}
