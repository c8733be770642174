//! End-to-end tests for the presence server over real sockets.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use catalyst_server::{
    domain::Identity,
    infrastructure::{
        broadcaster::WebSocketBroadcaster,
        dto::{
            http::IdentityPresenceDto,
            websocket::{ClientEvent, ServerEvent},
        },
        repository::InMemoryPresenceRepository,
    },
    ui::Server,
    usecase::{
        AnnounceJoinUseCase, AnnounceLeaveUseCase, CloseConnectionUseCase,
        GetIdentityPresenceUseCase, GetOnlineUsersUseCase, OpenConnectionUseCase,
    },
};
use catalyst_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// Start a server on an ephemeral port and return its address
async fn spawn_server() -> SocketAddr {
    let repository = Arc::new(InMemoryPresenceRepository::new(Arc::new(SystemClock)));
    let broadcaster = Arc::new(WebSocketBroadcaster::new());
    let server = Server::new(
        Arc::new(OpenConnectionUseCase::new(
            repository.clone(),
            broadcaster.clone(),
        )),
        Arc::new(AnnounceJoinUseCase::new(
            repository.clone(),
            broadcaster.clone(),
        )),
        Arc::new(AnnounceLeaveUseCase::new(
            repository.clone(),
            broadcaster.clone(),
        )),
        Arc::new(CloseConnectionUseCase::new(
            repository.clone(),
            broadcaster.clone(),
        )),
        Arc::new(GetOnlineUsersUseCase::new(repository.clone())),
        Arc::new(GetIdentityPresenceUseCase::new(repository.clone())),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(server.serve(listener));
    addr
}

/// Connect and consume the baseline snapshot
async fn connect(addr: SocketAddr) -> (Socket, Vec<Identity>) {
    let (mut socket, _) = connect_async(format!("ws://{}/ws", addr))
        .await
        .expect("websocket handshake");
    let baseline = next_update(&mut socket).await;
    (socket, baseline)
}

async fn next_update(socket: &mut Socket) -> Vec<Identity> {
    loop {
        let message = timeout(FRAME_TIMEOUT, socket.next())
            .await
            .expect("presence update in time")
            .expect("socket open")
            .expect("valid frame");
        if let Message::Text(text) = message {
            let ServerEvent::PresenceUpdate { users, .. } =
                serde_json::from_str(text.as_str()).expect("server event");
            return users;
        }
    }
}

async fn send(socket: &mut Socket, event: &ClientEvent) {
    let frame = serde_json::to_string(event).expect("encode client event");
    socket
        .send(Message::text(frame))
        .await
        .expect("send frame");
}

fn join(identity: i64) -> ClientEvent {
    ClientEvent::Join {
        identity: Identity::Numeric(identity),
    }
}

fn leave(identity: i64) -> ClientEvent {
    ClientEvent::Leave {
        identity: Identity::Numeric(identity),
    }
}

fn numeric(values: &[i64]) -> Vec<Identity> {
    values.iter().map(|v| Identity::Numeric(*v)).collect()
}

async fn online_users(addr: SocketAddr) -> Vec<Identity> {
    reqwest::get(format!("http://{}/api/online-users", addr))
        .await
        .expect("GET online users")
        .json()
        .await
        .expect("JSON body")
}

#[tokio::test]
async fn test_new_connection_receives_empty_baseline() {
    // テスト項目: 接続直後に現在のスナップショット（空）が届く
    // given (前提条件):
    let addr = spawn_server().await;

    // when (操作):
    let (_socket, baseline) = connect(addr).await;

    // then (期待する結果):
    assert!(baseline.is_empty());
}

#[tokio::test]
async fn test_join_is_broadcast_to_all_connections() {
    // テスト項目: join すると観測者を含む全ての接続に通知される
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut member, _) = connect(addr).await;
    let (mut observer, _) = connect(addr).await;

    // when (操作):
    send(&mut member, &join(7)).await;

    // then (期待する結果):
    assert_eq!(next_update(&mut member).await, numeric(&[7]));
    assert_eq!(next_update(&mut observer).await, numeric(&[7]));
    assert_eq!(online_users(addr).await, numeric(&[7]));
}

#[tokio::test]
async fn test_abrupt_disconnect_releases_identity() {
    // テスト項目: 2つの接続で同じ identity が join し、leave なしで1つずつ消える
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut observer, _) = connect(addr).await;
    let (mut tab1, _) = connect(addr).await;
    let (mut tab2, _) = connect(addr).await;
    send(&mut tab1, &join(7)).await;
    assert_eq!(next_update(&mut observer).await, numeric(&[7]));
    send(&mut tab2, &join(7)).await;
    assert_eq!(next_update(&mut observer).await, numeric(&[7]));

    // when (操作): close フレームを送らずにソケットを破棄
    drop(tab1);

    // then (期待する結果): もう1つのタブが残っているのでオンラインのまま
    assert_eq!(next_update(&mut observer).await, numeric(&[7]));
    assert_eq!(online_users(addr).await, numeric(&[7]));

    // when (操作):
    drop(tab2);

    // then (期待する結果):
    assert_eq!(next_update(&mut observer).await, numeric(&[]));
    assert!(online_users(addr).await.is_empty());
}

#[tokio::test]
async fn test_leave_keeps_other_users() {
    // テスト項目: join(3), join(9), leave(3) でオンラインは [9]
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut conn1, _) = connect(addr).await;
    let (mut conn2, _) = connect(addr).await;
    send(&mut conn1, &join(3)).await;
    assert_eq!(next_update(&mut conn2).await, numeric(&[3]));
    send(&mut conn2, &join(9)).await;
    assert_eq!(next_update(&mut conn2).await, numeric(&[3, 9]));

    // when (操作):
    send(&mut conn1, &leave(3)).await;

    // then (期待する結果):
    assert_eq!(next_update(&mut conn2).await, numeric(&[9]));
    assert_eq!(online_users(addr).await, numeric(&[9]));
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    // テスト項目: 不正なフレームは無視され、接続は維持される
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut socket, _) = connect(addr).await;

    // when (操作):
    socket
        .send(Message::text("not json"))
        .await
        .expect("send garbage");
    socket
        .send(Message::text(r#"{"type":"join","identity":""}"#))
        .await
        .expect("send empty identity");
    send(&mut socket, &join(5)).await;

    // then (期待する結果): 最初に届く通知は有効な join のもの
    assert_eq!(next_update(&mut socket).await, numeric(&[5]));
}

#[tokio::test]
async fn test_identity_presence_endpoint() {
    // テスト項目: identity 単位のエンドポイントが接続数と last_seen を返す
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut socket, _) = connect(addr).await;
    send(
        &mut socket,
        &ClientEvent::Join {
            identity: Identity::Token("sam".to_string()),
        },
    )
    .await;
    next_update(&mut socket).await;

    // when (操作):
    let online: IdentityPresenceDto =
        reqwest::get(format!("http://{}/api/online-users/sam", addr))
            .await
            .expect("GET presence")
            .json()
            .await
            .expect("JSON body");
    let unknown: IdentityPresenceDto =
        reqwest::get(format!("http://{}/api/online-users/42", addr))
            .await
            .expect("GET presence")
            .json()
            .await
            .expect("JSON body");
    let too_long = "x".repeat(Identity::MAX_TOKEN_LENGTH + 1);
    let rejected = reqwest::get(format!("http://{}/api/online-users/{}", addr, too_long))
        .await
        .expect("GET presence");

    // then (期待する結果):
    assert!(online.online);
    assert_eq!(online.connections, 1);
    assert!(online.last_seen.is_some());
    assert_eq!(unknown.identity, Identity::Numeric(42));
    assert!(!unknown.online);
    assert_eq!(unknown.last_seen, None);
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let addr = spawn_server().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .expect("GET health")
        .json()
        .await
        .expect("JSON body");

    // then (期待する結果):
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}
