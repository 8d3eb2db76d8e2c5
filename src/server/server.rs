//! WebSocket server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::data::{builtin_seed, load_seed_from_json, Seed};
use crate::error::Error;
use crate::protocol::{ClientMessage, Envelope, ServerMessage};
use crate::service::TriviaService;
use crate::store::{MemoryStore, QuestionStore, SqliteStore};

use super::handler::dispatch;

/// Service shared by every connection.
pub type SharedService = Arc<TriviaService>;

/// Run the trivia server until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = Arc::new(open_service(&config)?);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    serve(listener, service, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    })
    .await;

    info!("Server stopped");
    Ok(())
}

/// Build the service from the configured store and seed.
pub fn open_service(config: &ServerConfig) -> Result<TriviaService, Box<dyn std::error::Error>> {
    let seed = load_seed(config)?;

    let store: Box<dyn QuestionStore> = if config.in_memory {
        info!("Using in-memory question store");
        Box::new(MemoryStore::new(seed))
    } else {
        let store = SqliteStore::open(&config.database)?;
        store.seed_if_empty(&seed)?;
        Box::new(store)
    };

    let service = TriviaService::new(store)?;
    info!(
        "Serving {} questions in {} categories",
        service.store().count()?,
        service.catalog().count()
    );
    Ok(service)
}

fn load_seed(config: &ServerConfig) -> Result<Seed, crate::data::LoadError> {
    match &config.seed {
        Some(path) => {
            info!("Loading seed data from {}", path.display());
            load_seed_from_json(path)
        }
        None => builtin_seed(),
    }
}

/// Accept connections on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, service: SharedService, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    tokio::spawn(handle_connection(stream, addr, Arc::clone(&service)));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }
}

/// Handle a single WebSocket connection.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, service: SharedService) {
    let span = info_span!("connection", id = %Uuid::new_v4(), peer = %addr);

    async move {
        let ws_stream = match tokio_tungstenite::accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                warn!("WebSocket handshake failed: {}", e);
                return;
            }
        };
        debug!("Client connected");

        let (mut ws_sender, mut ws_receiver) = ws_stream.split();

        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    debug!("Connection error: {}", e);
                    break;
                }
                _ => continue,
            };

            let response = respond(&service, &text).await;
            let json = match serde_json::to_string(&response) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to encode response: {}", e);
                    break;
                }
            };

            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }

        debug!("Client disconnected");
    }
    .instrument(span)
    .await
}

/// Decode one request frame and run it on the blocking pool.
async fn respond(service: &SharedService, text: &str) -> Envelope {
    let request: ClientMessage = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejecting malformed request: {}", e);
            return ServerMessage::bad_request().into();
        }
    };
    debug!("Handling {:?}", request);

    let service = Arc::clone(service);
    match tokio::task::spawn_blocking(move || dispatch(&service, request)).await {
        Ok(body) => body.into(),
        Err(e) => {
            error!("Request handler failed: {}", e);
            ServerMessage::from(&Error::Store(e.to_string())).into()
        }
    }
}
