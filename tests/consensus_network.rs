//! Multi-node consensus tests
//!
//! Real API servers on ephemeral ports; one node resolves against the
//! others over HTTP.

use std::time::Duration;

use axum::{routing::get, Json, Router};
use ledger_node::consensus::{validate_chain, Resolution};
use ledger_node::node::Node;
use ledger_node::p2p::ChainResponse;
use ledger_node::rpc::start_rpc_server;
use serde_json::Value;
use tokio::net::TcpListener;

fn node(identity: &str) -> Node {
    Node::new(identity, Duration::from_millis(500)).unwrap()
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    (listener, addr)
}

/// Serve `node`'s API in the background, returning its address
async fn spawn_node(node: Node) -> String {
    let (listener, addr) = bind().await;
    tokio::spawn(start_rpc_server(node, listener, std::future::pending()));
    addr
}

/// Serve a fixed chain response at `/chain`, as a misbehaving peer would
async fn spawn_fixed_peer(response: ChainResponse) -> String {
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/chain",
        get(move || {
            let response = response.clone();
            async move { Json(response) }
        }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await });
    addr
}

async fn mined(identity: &str, blocks: usize) -> Node {
    let node = node(identity);
    for _ in 0..blocks {
        node.mine().await.unwrap();
    }
    node
}

#[tokio::test]
async fn test_adopts_longer_valid_chain() {
    let peer = mined("peer", 2).await;
    let peer_chain = peer.chain().chain;
    let peer_addr = spawn_node(peer).await;

    let local = node("local");
    local.register_peers(&[format!("http://{}", peer_addr)]).unwrap();

    let (resolution, chain) = local.resolve().await;
    assert_eq!(resolution, Resolution::Replaced);
    assert_eq!(chain, peer_chain);
    assert_eq!(local.chain().chain, peer_chain);
}

#[tokio::test]
async fn test_resolve_endpoint_reports_replacement() {
    let peer = mined("peer", 1).await;
    let peer_addr = spawn_node(peer).await;

    let local = node("local");
    local.register_peers(&[peer_addr]).unwrap();
    let local_addr = spawn_node(local).await;

    let body: Value = reqwest::get(format!("http://{}/nodes/resolve", local_addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Our chain was replaced");
    assert_eq!(body["new_chain"].as_array().unwrap().len(), 2);
    assert!(body.get("chain").is_none());
}

#[tokio::test]
async fn test_keeps_chain_when_peer_is_not_longer() {
    let peer = mined("peer", 1).await;
    let peer_addr = spawn_node(peer).await;

    let local = mined("local", 1).await;
    let before = local.chain().chain;
    local.register_peers(&[peer_addr]).unwrap();

    let (resolution, chain) = local.resolve().await;
    assert_eq!(resolution, Resolution::Authoritative);
    assert_eq!(chain, before);
}

#[tokio::test]
async fn test_rejects_hash_broken_chain() {
    let source = mined("forger", 2).await;
    let mut chain = source.chain().chain;
    chain[1].transactions[0].amount = 1_000.0;
    let peer_addr = spawn_fixed_peer(ChainResponse::new(chain)).await;

    let local = node("local");
    let before = local.chain().chain;
    local.register_peers(&[peer_addr]).unwrap();

    let (resolution, chain) = local.resolve().await;
    assert_eq!(resolution, Resolution::Authoritative);
    assert_eq!(chain, before);
}

#[tokio::test]
async fn test_rejects_inflated_length() {
    let source = mined("liar", 1).await;
    let mut response = source.chain();
    response.length = 50;
    let peer_addr = spawn_fixed_peer(response).await;

    let local = node("local");
    local.register_peers(&[peer_addr]).unwrap();

    let (resolution, _) = local.resolve().await;
    assert_eq!(resolution, Resolution::Authoritative);
}

#[tokio::test]
async fn test_unreachable_peer_does_not_block_others() {
    // Nothing listens on this port once the listener is dropped
    let (listener, dead_addr) = bind().await;
    drop(listener);

    let peer = mined("peer", 1).await;
    let peer_chain = peer.chain().chain;
    let peer_addr = spawn_node(peer).await;

    let local = node("local");
    local.register_peers(&[dead_addr, peer_addr]).unwrap();

    let (resolution, chain) = local.resolve().await;
    assert_eq!(resolution, Resolution::Replaced);
    assert_eq!(chain, peer_chain);
}

#[tokio::test]
async fn test_tie_goes_to_first_registered_peer() {
    let first = mined("first", 2).await;
    let first_chain = first.chain().chain;
    let second = mined("second", 2).await;

    let first_addr = spawn_node(first).await;
    let second_addr = spawn_node(second).await;

    let local = node("local");
    local.register_peers(&[first_addr, second_addr]).unwrap();

    let (resolution, chain) = local.resolve().await;
    assert_eq!(resolution, Resolution::Replaced);
    assert_eq!(chain, first_chain);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mine_racing_resolve_stays_linked() {
    let peer = mined("peer", 3).await;
    let peer_chain = peer.chain().chain;
    let peer_addr = spawn_node(peer).await;

    let local = node("local");
    local.register_peers(&[peer_addr]).unwrap();

    let (forged, _) = tokio::join!(local.mine(), local.resolve());
    let forged = forged.unwrap();

    // Whichever finishes first, the peer's chain is kept and any forged
    // block sits on top of it
    let chain = local.chain().chain;
    assert!(validate_chain(&chain));
    assert_eq!(&chain[..peer_chain.len()], peer_chain.as_slice());
    if chain.len() == peer_chain.len() + 1 {
        assert_eq!(chain[peer_chain.len()], forged);
        assert_eq!(forged.index, chain.len() as u64);
    } else {
        assert_eq!(chain.len(), peer_chain.len());
    }
}
