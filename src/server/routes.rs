// src/server/routes.rs
// =============================================================================
// Request handlers.
//
//   GET /tree?repo=<url>  -> 200 text/plain, streamed ASCII tree
//   GET /ai?repo=<url>    -> 200 application/json {"diagram": "..."}
//   OPTIONS on either     -> 204 CORS preflight
//
// Contract of /tree: once the 200 headers are out, failures can only be
// reported in the body ("Error: ..."). So everything that can be checked up
// front (missing/unparsable repo, unknown source) is checked before we
// commit to a 200; everything else happens in a spawned task that writes
// into the body channel.
//
// /ai buffers everything, so it can still use proper status codes.
// =============================================================================

use std::convert::Infallible;
use std::sync::Arc;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::cors;
use super::sink::ChannelSink;
use crate::app::{App, TreeOutcome};
use crate::github::{parse_github_repo, ListingSource};

const MISSING_REPO: &str =
    "Missing 'repo' query param, e.g. ?repo=https://github.com/owner/repo";

#[derive(Debug, Serialize)]
struct DiagramResponse {
    diagram: String,
}

/// Entry point for every request: routing + CORS
pub async fn handle(app: Arc<App>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    info!(method = %req.method(), uri = %req.uri(), "request");

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = match (&method, path.as_str()) {
        (&Method::OPTIONS, "/tree" | "/ai") => return Ok(cors::preflight()),
        (&Method::GET, "/tree") => handle_tree(app, &req),
        (&Method::GET, "/ai") => handle_describe_repo(app, req).await,
        (_, "/tree" | "/ai") => text_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        _ => text_response(StatusCode::NOT_FOUND, "404 page not found"),
    };

    cors::apply(&mut response);
    Ok(response)
}

/// Owner, repo and listing source from the query string, or a 400 response
fn parse_request(req: &Request<Body>) -> Result<(String, String, ListingSource), Response<Body>> {
    let repo_url = query_param(req, "repo")
        .ok_or_else(|| text_response(StatusCode::BAD_REQUEST, MISSING_REPO))?;

    let source = match query_param(req, "source") {
        None => ListingSource::default(),
        Some(value) => ListingSource::parse(&value).ok_or_else(|| {
            text_response(
                StatusCode::BAD_REQUEST,
                &format!("Unknown 'source' {:?}, expected git-tree or contents", value),
            )
        })?,
    };

    let (owner, repo) =
        parse_github_repo(&repo_url).map_err(|e| text_response(e.status_code(), &e.to_string()))?;

    Ok((owner, repo, source))
}

/// Streams the ASCII tree of a repository
fn handle_tree(app: Arc<App>, req: &Request<Body>) -> Response<Body> {
    let (owner, repo, source) = match parse_request(req) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let (sender, body) = Body::channel();
    tokio::spawn(async move {
        let mut sink = ChannelSink::new(sender);
        match app.stream_tree(&mut sink, &owner, &repo, source).await {
            Ok(TreeOutcome::Rendered { .. }) => {}
            Ok(TreeOutcome::Failed(e)) => {
                warn!(%owner, %repo, error = %e, "tree request failed")
            }
            Err(e) => debug!(%owner, %repo, error = %e, "client went away mid-stream"),
        }
    });

    let mut response = Response::new(body);
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Generates a Mermaid architecture diagram for a repository
async fn handle_describe_repo(app: Arc<App>, req: Request<Body>) -> Response<Body> {
    let (owner, repo, source) = match parse_request(&req) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let diagram = match app.describe_repo(&owner, &repo, source).await {
        Ok(diagram) => diagram,
        Err(e) => {
            warn!(%owner, %repo, error = %e, "diagram request failed");
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    match serde_json::to_vec(&DiagramResponse { diagram }) {
        Ok(json) => {
            let mut response = Response::new(Body::from(json));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => text_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// Value of the first occurrence of a query parameter
///
/// Later occurrences are never consulted, and an empty first value counts
/// as missing: `?repo=&repo=x` has no repo.
fn query_param(req: &Request<Body>, name: &str) -> Option<String> {
    let query = req.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Plain-text response with a trailing newline
fn text_response(status: StatusCode, message: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(format!("{}\n", message)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Body::channel()?
//    - Creates a response body plus a Sender we can push chunks into
//    - hyper starts sending the response as soon as we return it, and
//      forwards chunks while our spawned task is still producing them
//
// 2. Why tokio::spawn for /tree?
//    - The handler must return the Response (headers) right away
//    - The actual GitHub work continues on its own task and writes into
//      the channel; when the task ends, the Sender drops and the body ends
//
// 3. Why Infallible?
//    - hyper services return Result<Response, E>
//    - We turn every failure into a response ourselves, so our error type
//      is one that can never be constructed
// -----------------------------------------------------------------------------
