//! Serving an [`App`] over TCP.
//!
//! Each accepted connection runs on its own task, speaking HTTP/1.1 or
//! HTTP/2 as the client negotiates. Request bodies are buffered whole before
//! the pipeline sees them. When the shutdown future resolves the listener
//! stops accepting, open connections are drained, and the serve call returns.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::error::Error;
use crate::response::Response;
use crate::status::Status;

/// The posts-api HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then serves `app` until SIGTERM or Ctrl-C.
    pub async fn serve(self, app: App) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve_listener(listener, app, shutdown_signal()).await
    }
}

/// Serves `app` on an already-bound `listener` until `shutdown` resolves,
/// then waits for in-flight connections to finish.
pub async fn serve_listener(
    listener: TcpListener,
    app: App,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Error> {
    let addr = listener.local_addr()?;
    let app = Arc::new(app);
    let mut connections = JoinSet::new();
    tokio::pin!(shutdown);

    info!(%addr, "posts-api listening");

    loop {
        let (stream, peer) = tokio::select! {
            // Shutdown wins over a queued accept.
            biased;

            () = &mut shutdown => break,

            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("accept failed: {e}");
                    continue;
                }
            },

            Some(_) = connections.join_next(), if !connections.is_empty() => continue,
        };
        connections.spawn(connection(Arc::clone(&app), stream, peer));
    }

    info!(in_flight = connections.len(), "draining connections");
    while connections.join_next().await.is_some() {}
    info!(%addr, "posts-api stopped");
    Ok(())
}

async fn connection(app: Arc<App>, stream: TcpStream, peer: SocketAddr) {
    let svc = service_fn(move |req| respond(Arc::clone(&app), req));
    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(stream), svc)
        .await
    {
        debug!(%peer, "connection ended with error: {e}");
    }
}

/// Every outcome, an unreadable body included, is a response; hyper never
/// sees an error from the service.
async fn respond(
    app: Arc<App>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let res = match body.collect().await {
        Ok(collected) => app.handle(http::Request::from_parts(parts, collected.to_bytes())).await,
        Err(e) => Response::message(Status::BadRequest, &format!("could not read request body: {e}")),
    };
    Ok(res.into_inner())
}

/// Resolves on SIGTERM (Unix) or Ctrl-C. A signal that cannot be listened
/// for is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("interrupt received"),
        () = terminate => info!("SIGTERM received"),
    }
}
