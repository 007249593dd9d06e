use std::{
    collections::HashMap,
    io,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_util::{future, pin_mut, stream::TryStreamExt, StreamExt};
use log::{debug, error, info, warn};
use thiserror::Error;

use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::Message;

use link_board_frontend::query_result::QueryResult;
use link_board_frontend::request::Request;

use crate::board::VoteLedger;
use crate::config::ConfigError;
use crate::link_board::LinkBoard;
use crate::store::StoreError;

type Tx = UnboundedSender<Message>;
type PeerMap = Arc<Mutex<HashMap<SocketAddr, Tx>>>;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),
    #[error("peer map lock poisoned")]
    PeerMapLock,
    #[error("could not bind {addr}: {source}")]
    FailedSocketBind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// Undecodable text frames are answered like a page view.
fn parse_request(addr: &SocketAddr, msg: &Message) -> Option<Request> {
    match msg {
        Message::Text(text) => {
            debug!("received a message from {}: {}", addr, text);
            match serde_json::from_str(text) {
                Ok(request) => Some(request),
                Err(err) => {
                    warn!("unreadable request from {}: {}", addr, err);
                    Some(Request::ViewPosts)
                }
            }
        }
        _ => None,
    }
}

fn send_to_peer(peer_map: &PeerMap, addr: &SocketAddr, results: &[QueryResult]) {
    let payload = match serde_json::to_string(results) {
        Ok(payload) => payload,
        Err(err) => {
            error!("could not encode results for {}: {}", addr, err);
            return;
        }
    };

    match peer_map.lock() {
        Ok(peers) => {
            if let Some(ws_sink) = peers.get(addr) {
                if ws_sink.unbounded_send(Message::Text(payload)).is_err() {
                    warn!("{} went away before its results were sent", addr);
                }
            }
        }
        Err(_err) => error!("peer map lock poisoned"),
    }
}

/// Runs one visitor session. The session's votes live in `ledger` and are
/// gone once the socket closes.
async fn handle_connection(
    peer_map: PeerMap,
    board: LinkBoard,
    raw_stream: TcpStream,
    addr: SocketAddr,
) -> Result<(), HandlerError> {
    info!("tcp connection from: {}", addr);

    let ws_stream = tokio_tungstenite::accept_async(raw_stream)
        .await
        .map_err(HandlerError::Handshake)?;

    let (tx, rx) = unbounded();
    peer_map
        .lock()
        .map_err(|_err| HandlerError::PeerMapLock)?
        .insert(addr, tx);

    let (outgoing, incoming) = ws_stream.split();
    let mut ledger = VoteLedger::new();

    let answer_incoming = incoming.try_for_each(|msg| {
        if let Some(request) = parse_request(&addr, &msg) {
            let results = board.submit_request(&mut ledger, request);
            send_to_peer(&peer_map, &addr, &results);
        }
        future::ok(())
    });

    let send_outgoing = rx.map(Ok).forward(outgoing);

    pin_mut!(answer_incoming, send_outgoing);
    future::select(answer_incoming, send_outgoing).await;

    info!("{} disconnected", &addr);
    peer_map
        .lock()
        .map_err(|_err| HandlerError::PeerMapLock)?
        .remove(&addr);

    Ok(())
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, HandlerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| HandlerError::FailedSocketBind { addr, source })?;
    info!("listening on: {}", addr);

    Ok(listener)
}

pub async fn serve(listener: TcpListener, board: LinkBoard) -> Result<(), HandlerError> {
    let peer_map = PeerMap::new(Mutex::new(HashMap::new()));

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let connection = handle_connection(peer_map.clone(), board.clone(), stream, addr);
                tokio::spawn(async move {
                    if let Err(err) = connection.await {
                        warn!("connection from {} ended: {}", addr, err);
                    }
                });
            }
            Err(err) => warn!("could not accept connection: {}", err),
        }
    }
}

pub async fn establish(addr: SocketAddr, board: LinkBoard) -> Result<(), HandlerError> {
    let listener = bind(addr).await?;
    serve(listener, board).await
}
