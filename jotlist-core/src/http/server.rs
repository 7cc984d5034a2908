//! Async HTTP server using Hyper: accept loop and route dispatch.

use super::{api, log_access, not_found_response, Req, Resp};
use crate::frontend;
use crate::store::TaskStore;
use anyhow::{Context, Result};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

/// HTTP server owning the shared task store.
pub struct HttpServer {
    store: Arc<TaskStore>,
}

impl HttpServer {
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    /// Bind the listening socket.
    ///
    /// Returns the bound server so callers can read the local address
    /// before serving; tests bind port 0.
    pub async fn bind(self, addr: &str) -> Result<BoundServer> {
        let addr: SocketAddr =
            addr.parse().with_context(|| format!("invalid listen address {addr}"))?;
        let listener =
            TcpListener::bind(addr).await.with_context(|| format!("failed to bind {addr}"))?;
        let local_addr = listener.local_addr().context("failed to read local address")?;
        Ok(BoundServer { listener, local_addr, store: self.store })
    }
}

/// A server with its socket bound but not yet accepting.
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<TaskStore>,
}

impl BoundServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections forever, one spawned task per connection.
    pub async fn serve(self) -> Result<()> {
        log::info!("jotlist listening on http://{}", self.local_addr);

        loop {
            let (stream, remote_addr) =
                self.listener.accept().await.context("failed to accept connection")?;
            let store = Arc::clone(&self.store);

            tokio::spawn(async move {
                let service = service_fn(move |req: Req| {
                    let store = Arc::clone(&store);
                    async move { Ok::<Resp, Infallible>(route(req, remote_addr, store).await) }
                });

                if let Err(err) =
                    http1::Builder::new().serve_connection(TokioIo::new(stream), service).await
                {
                    log::error!("connection error from {remote_addr}: {err}");
                }
            });
        }
    }
}

/// Flat dispatch: the two API paths, then embedded frontend assets for GET,
/// then 404. Verb checks live in the handlers so a wrong-verb request to an
/// API path gets 405, not 404.
async fn route(req: Req, remote_addr: SocketAddr, store: Arc<TaskStore>) -> Resp {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();

    let resp = match path.as_str() {
        "/api/getTasks" => api::get_tasks(req, store).await,
        "/api/addTask" => api::add_task(req, store).await,
        _ if req.method() == http::Method::GET => frontend::serve_asset(&path),
        _ => not_found_response("resource"),
    };

    log_access(Some(remote_addr), &method, &path, &resp, start);
    resp
}
