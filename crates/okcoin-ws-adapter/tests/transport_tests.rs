/*
[INPUT]:  Loopback WebSocket server
[OUTPUT]: Test results for the tokio-tungstenite transport
[POS]:    Integration tests - WebSocket transport
[UPDATE]: When the transport or socket options change
*/

mod common;

use common::{TICKER_FRAME, test_credentials};
use futures_util::{SinkExt, StreamExt};
use okcoin_ws_adapter::{
    MarketData, OkcoinError, Request, Session, SessionConfig, SessionState,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

/// Serve one client: answer pings, reply to a subscription with a ticker
/// frame preceded by a control ping, then start the close handshake.
async fn spawn_server() -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut received = Vec::new();

        while let Some(Ok(message)) = ws.next().await {
            let WsMessage::Text(text) = message else {
                continue;
            };
            let text = text.as_str().to_string();
            received.push(text.clone());
            if text == r#"{"event":"ping"}"# {
                ws.send(WsMessage::Text(r#"{"event":"pong"}"#.to_string().into()))
                    .await
                    .unwrap();
            } else {
                ws.send(WsMessage::Ping(Vec::new().into())).await.unwrap();
                ws.send(WsMessage::Text(TICKER_FRAME.to_string().into()))
                    .await
                    .unwrap();
                ws.send(WsMessage::Close(None)).await.unwrap();
            }
        }
        received
    });

    (format!("ws://{addr}/websocket/okcoinapi"), handle)
}

#[tokio::test]
async fn test_session_over_loopback_socket() {
    let (url, server) = spawn_server().await;
    let config = SessionConfig::default().with_endpoint("local", url);
    let mut session = Session::with_config(test_credentials(), config);

    assert_ok!(session.connect("local").await);
    assert_ok!(session.heartbeat().await);
    assert_ok!(session.send(&[Request::subscribe("ok_btcusd_ticker")]).await);

    let records = assert_ok!(session.read_typed().await);
    match records.as_slice() {
        [MarketData::Ticker(ticker)] => assert_eq!(ticker.vol, 8705.22),
        other => panic!("Expected one ticker, got {other:?}"),
    }

    let err = assert_err!(session.read_raw().await);
    assert!(matches!(err, OkcoinError::Connection(_)));
    assert_eq!(session.state(), SessionState::Disconnected);
    drop(session);

    let received = server.await.unwrap();
    assert_eq!(
        received,
        vec![
            r#"{"event":"ping"}"#.to_string(),
            r#"{"event":"addChannel","channel":"ok_btcusd_ticker"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_dial_refused_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = SessionConfig::default().with_endpoint("local", format!("ws://{addr}/"));
    let mut session = Session::with_config(test_credentials(), config);

    let err = assert_err!(session.connect("local").await);
    assert!(err.is_fatal());
}
