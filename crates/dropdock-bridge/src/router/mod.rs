//! Cross-context message router
//!
//! The single entry point UI contexts talk to. The router drains a
//! mailbox of tagged requests and spawns an independent task per message:
//! no cross-message ordering, no shared in-memory state between handlers.
//! Every handler rereads tokens from the store per invocation.

mod handlers;
mod messages;

pub use messages::{Request, Response};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use dropdock_core::TokenRepository;

use crate::downloads::DownloadsService;
use crate::dropbox::DropboxClient;
use crate::vc::VcClient;

/// Mailbox depth before senders back-pressure.
const MAILBOX_CAPACITY: usize = 64;

/// Everything a handler needs; holds no mutable state of its own.
pub struct BridgeServices {
    pub tokens: Arc<dyn TokenRepository>,
    pub dropbox: DropboxClient,
    pub vc: VcClient,
    pub downloads: DownloadsService,
    /// Pause used when simulating demo-startup uploads
    pub upload_simulation_delay: Duration,
}

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// The background router task.
pub struct Router;

impl Router {
    /// Spawn the router over its mailbox and return the sending handle.
    pub fn spawn(services: Arc<BridgeServices>) -> RouterHandle {
        let (tx, mut rx) = mpsc::channel::<Envelope>(MAILBOX_CAPACITY);

        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                // Each message is its own unit of work; a slow handler
                // never blocks the mailbox.
                let services = services.clone();
                tokio::spawn(async move {
                    let action = envelope.request.action();
                    let response = handlers::dispatch(&services, envelope.request).await;
                    if envelope.reply.send(response).is_err() {
                        debug!(action, "Requester went away before the response");
                    }
                });
            }
            debug!("Router mailbox closed");
        });

        RouterHandle { tx }
    }
}

/// Cheaply cloneable handle UI contexts use to reach the router.
#[derive(Clone)]
pub struct RouterHandle {
    tx: mpsc::Sender<Envelope>,
}

impl RouterHandle {
    /// Send one request and await its response.
    pub async fn send(&self, request: Request) -> Response {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Envelope { request, reply }).await.is_err() {
            return Response::failure("Router is not running");
        }
        rx.await
            .unwrap_or_else(|_| Response::failure("Router dropped the request"))
    }
}
