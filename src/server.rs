use crate::config::{Config, SourceSettings};
use crate::lead::Lead;
use crate::source::{self, auth::TokenCache, LocalReadError, SourceError};
use anyhow::{Context, Result};
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response, Server};
use tokio::runtime::Handle;

const GENERIC_FAILURE_BODY: &str = r#"{"error":"lead source fetch failed"}"#;

/// Read-only feed endpoint. Each request re-resolves the active source and
/// re-normalizes from scratch; there is no shared mutable state between
/// requests and no caching layer.
pub struct FeedServer {
    server: Server,
    config: Arc<Config>,
    settings: Arc<SourceSettings>,
    client: reqwest::Client,
    tokens: Arc<TokenCache>,
    handle: Handle,
}

impl FeedServer {
    /// Bind the listener. `handle` drives the async remote fetch from the
    /// blocking serve thread.
    pub fn bind(
        addr: &str,
        config: Arc<Config>,
        settings: Arc<SourceSettings>,
        handle: Handle,
    ) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| anyhow::anyhow!("failed to bind feed server on {}: {}", addr, e))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.source.request_timeout_ms))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            server,
            config,
            settings,
            client,
            tokens: Arc::new(TokenCache::new()),
            handle,
        })
    }

    pub fn addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Request loop. Runs until the listener is dropped.
    pub fn serve(self) {
        for request in self.server.incoming_requests() {
            self.handle_request(request);
        }
    }

    fn handle_request(&self, request: Request) {
        let outcome = match (request.method(), request.url()) {
            (Method::Get, "/api/leads") => request.respond(self.leads_response()),
            (Method::Options, _) => request.respond(with_cors(Response::empty(204))),
            _ => request.respond(with_cors(Response::empty(404))),
        };
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "failed to write response");
        }
    }

    fn leads_response(&self) -> Response<Cursor<Vec<u8>>> {
        let leads = match self.fetch_current() {
            Ok(leads) => leads,
            Err(e) => {
                // Generic body only: the cause may name credential paths.
                tracing::error!(error = %e, "remote lead fetch failed");
                return json_response(500, GENERIC_FAILURE_BODY.to_string());
            }
        };
        match serde_json::to_string(&leads) {
            Ok(body) => json_response(200, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize leads");
                json_response(500, GENERIC_FAILURE_BODY.to_string())
            }
        }
    }

    /// Resolve and read the active source. Local-file problems degrade to an
    /// empty list; only remote failures propagate.
    fn fetch_current(&self) -> Result<Vec<Lead>, SourceError> {
        let source = source::resolve(&self.config, &self.settings, &self.client, &self.tokens);
        match self.handle.block_on(source.fetch_leads()) {
            Ok(leads) => Ok(leads),
            Err(SourceError::Local(LocalReadError::Missing)) => {
                tracing::debug!("local leads file absent, serving empty list");
                Ok(Vec::new())
            }
            Err(SourceError::Local(e)) => {
                tracing::warn!(error = %e, "local leads file unusable, serving empty list");
                Ok(Vec::new())
            }
            Err(e @ SourceError::Remote(_)) => Err(e),
        }
    }
}

fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    with_cors(
        Response::from_data(body.into_bytes())
            .with_status_code(status)
            .with_header(header("Content-Type", "application/json")),
    )
}

/// The feed is consumed cross-origin by a browser client; the endpoint is
/// read-only and unauthenticated, so a wildcard origin is acceptable.
fn with_cors<R: std::io::Read>(response: Response<R>) -> Response<R> {
    response
        .with_header(header("Access-Control-Allow-Origin", "*"))
        .with_header(header("Access-Control-Allow-Methods", "GET, OPTIONS"))
}

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header")
}
