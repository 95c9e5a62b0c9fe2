use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration, time::Instant};

use futures_util::{SinkExt, StreamExt};
use http::{
    header::{CONNECTION, USER_AGENT},
    HeaderValue,
};
use tokio::{
    net::{TcpListener, TcpStream, ToSocketAddrs},
    sync::{OwnedSemaphorePermit, Semaphore},
};
use tokio_util::codec::Decoder;

use crate::http::{codec::ConnectionCodec, Request, Response};

type Handler<A, F> = fn(Request, A) -> F;

pub struct Server<A, F> {
    state: A,
    handler: Handler<A, F>,
    semaphore: Arc<Semaphore>,
}

const PERMITS: usize = 1_000;

impl<S, F> Server<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Future<Output = Response> + Send + 'static,
{
    pub fn new(state: S, handler: Handler<S, F>) -> Self {
        Self {
            state,
            handler,
            semaphore: Arc::new(Semaphore::new(PERMITS)),
        }
    }

    pub async fn bind<A: ToSocketAddrs>(self, addr: A) -> io::Result<()> {
        let server = Arc::new(self);

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!(target: "listener", ?addr, "server is running");

        loop {
            let (socket, addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::warn!(target: "listener", %err, "failed to accept connection");
                    continue;
                }
            };

            let permit = server.acquire_permit().await;
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let handled = tokio::time::timeout(
                    crate::TIMEOUT_DURATION,
                    server.handle_request(socket, addr, permit),
                )
                .await;

                if handled.is_err() {
                    tracing::warn!(?addr, "connection timed out");
                }
            });
        }
    }

    #[tracing::instrument(skip(self, socket, permit))]
    async fn handle_request(
        self: Arc<Self>,
        socket: TcpStream,
        addr: SocketAddr,
        permit: OwnedSemaphorePermit,
    ) {
        let mut codec = ConnectionCodec::default().framed(socket);
        let req = match codec.next().await.transpose() {
            Ok(Some(req)) => {
                tracing::debug!(?req, "received request");
                req
            }
            Ok(None) => {
                tracing::error!("connection ended before request");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read request");
                return;
            }
        };

        let user = req.headers().get(USER_AGENT).unwrap_or_else(|| {
            static UNKNOWN_AGENT: HeaderValue = HeaderValue::from_static("Unknown");
            &UNKNOWN_AGENT
        });

        let path = req.uri().to_string();
        tracing::info!(
            target: "requests",
            method = %req.method(),
            %path,
            ?user,
            r#""{} {path}" by {user:?}"#, req.method()
        );

        let now = Instant::now();
        let mut resp = (self.handler)(req, self.state.clone()).await;
        tracing::debug!(
            status = %resp.status(),
            "handled in {:?}, sending response",
            now.elapsed()
        );

        const CLOSE: HeaderValue = HeaderValue::from_static("close");
        resp.headers_mut().insert(CONNECTION, CLOSE);

        drop(permit);

        if let Err(err) = codec.send(resp).await {
            tracing::warn!(%err, "failed to send response");
        }
    }

    async fn acquire_permit(&self) -> OwnedSemaphorePermit {
        loop {
            if let Ok(permit) = Arc::clone(&self.semaphore).try_acquire_owned() {
                break permit;
            }

            let mut factor = 1;
            loop {
                const BACKOFF: Duration = Duration::from_millis(50);
                tokio::time::sleep(factor * BACKOFF).await;
                factor *= 2;
                if self.semaphore.available_permits() >= PERMITS / 100 {
                    break;
                }
            }
        }
    }
}
