//! tiny_http server adapter
//!
//! Handles routing, body limits and response conversion for tiny_http.

use std::fmt;
use std::io::{Cursor, Read as _};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, anyhow};
use chrono::Utc;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{self, ApiError, ErrorBody, ServiceMetrics};
use crate::config::ServiceConfig;
use crate::core::services::{CommitmentService, Sha256Commitment};

type HttpResponse = Response<Cursor<Vec<u8>>>;

// =============================================================================
// SERVER LIFECYCLE
// =============================================================================

/// Commitment service bound to a socket, not yet serving
pub struct CommitmentServer {
    server: Arc<Server>,
    state: Arc<ServerState>,
    workers: usize,
}

#[derive(Debug)]
struct ServerState {
    service: CommitmentService<Sha256Commitment>,
    max_body_bytes: usize,
    metrics: ServiceMetrics,
}

/// A server running on background threads
pub struct RunningServer {
    addr: SocketAddr,
    server: Arc<Server>,
    workers: Vec<JoinHandle<()>>,
}

impl fmt::Debug for CommitmentServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentServer")
            .field("state", &self.state)
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RunningServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningServer")
            .field("addr", &self.addr)
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

impl CommitmentServer {
    /// Bind to `config.listen_addr`
    pub fn bind(config: &ServiceConfig) -> anyhow::Result<Self> {
        let server = Server::http(&config.listen_addr)
            .map_err(|e| anyhow!("failed to bind {}: {e}", config.listen_addr))?;
        let service = CommitmentService::new(
            Sha256Commitment::new(config.secret.clone()),
            config.service_name.clone(),
            config.pod_name.clone(),
        );
        Ok(Self {
            server: Arc::new(server),
            state: Arc::new(ServerState {
                service,
                max_body_bytes: config.max_body_bytes,
                metrics: ServiceMetrics::default(),
            }),
            workers: config.workers.max(1),
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .server_addr()
            .to_ip()
            .context("server is not listening on an IP socket")
    }

    /// Start the worker threads and return immediately
    pub fn start(self) -> anyhow::Result<RunningServer> {
        let addr = self.local_addr()?;
        let mut workers = Vec::with_capacity(self.workers);
        for i in 0..self.workers {
            let server = Arc::clone(&self.server);
            let state = Arc::clone(&self.state);
            let handle = thread::Builder::new()
                .name(format!("poe-http-{i}"))
                .spawn(move || worker_loop(&server, &state))
                .context("failed to spawn server worker")?;
            workers.push(handle);
        }
        log::info!("commitment service listening on {addr} ({} workers)", workers.len());
        Ok(RunningServer {
            addr,
            server: self.server,
            workers,
        })
    }

    /// Serve until the process exits
    pub fn run(self) -> anyhow::Result<()> {
        self.start()?.join();
        Ok(())
    }
}

impl RunningServer {
    /// Bound address
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:8089`
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Wait for every worker to exit
    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                log::error!("server worker panicked");
            }
        }
    }

    /// Stop accepting requests and wait for the workers
    pub fn shutdown(self) {
        for _ in &self.workers {
            self.server.unblock();
        }
        self.join();
    }
}

fn worker_loop(server: &Server, state: &ServerState) {
    for mut request in server.incoming_requests() {
        let response = handle_request(&mut request, state);
        log::debug!(
            "{} {} -> {}",
            request.method(),
            request.url(),
            response.status_code().0
        );
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

fn handle_request(request: &mut Request, state: &ServerState) -> HttpResponse {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("");

    match path {
        "/health" | "/healthz" => json_response(&api::health(), 200),
        "/prove" => {
            let result = if *request.method() == Method::Post {
                read_body(request, state.max_body_bytes)
                    .and_then(|body| api::prove(&state.service, &body, Utc::now()))
            } else {
                Err(ApiError::method_not_allowed())
            };
            match result {
                Ok(receipt) => {
                    state.metrics.record_proved();
                    json_response(&receipt, 200)
                },
                Err(e) => {
                    state.metrics.record_rejected(&e);
                    error_response(&e)
                },
            }
        },
        "/metrics" if *request.method() == Method::Get => {
            json_response(&state.metrics.snapshot(), 200)
        },
        "/metrics" => error_response(&ApiError::method_not_allowed()),
        _ => error_response(&ApiError::not_found("not found")),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read the body, refusing anything over `limit` bytes
fn read_body(request: &mut Request, limit: usize) -> Result<Vec<u8>, ApiError> {
    if request.body_length().is_some_and(|len| len > limit) {
        return Err(ApiError::payload_too_large());
    }

    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut body = Vec::new();
    request
        .as_reader()
        .take(cap)
        .read_to_end(&mut body)
        .map_err(|e| ApiError::bad_request(format!("failed to read request body: {e}")))?;
    if body.len() > limit {
        return Err(ApiError::payload_too_large());
    }
    Ok(body)
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Create an error response with appropriate status code
fn error_response(error: &ApiError) -> HttpResponse {
    let status = StatusCode(error.status_code());
    if !error.code.has_body() {
        return Response::from_data(Vec::new()).with_status_code(status);
    }
    // A single string field always encodes
    let body = serde_json::to_vec(&ErrorBody::from(error)).unwrap_or_default();
    with_json_header(Response::from_data(body).with_status_code(status))
}

/// Serialize data to JSON response with status code, or 500 if it cannot be
fn json_response<T: Serialize>(data: &T, status: u16) -> HttpResponse {
    match serde_json::to_vec(data) {
        Ok(body) => with_json_header(Response::from_data(body).with_status_code(StatusCode(status))),
        Err(e) => {
            log::error!("failed to encode response: {e}");
            error_response(&ApiError::internal("internal error"))
        },
    }
}

fn with_json_header(response: HttpResponse) -> HttpResponse {
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
