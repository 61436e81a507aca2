// blue-client/tests/client_integration.rs

use blue_client::{BlueAdminClient, ClientConfig, ListQuery, Session, SessionData, SessionStore};
use shared::{LoginRequest, UserInfo};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn admin() -> UserInfo {
    UserInfo {
        id: 7,
        username: "root".into(),
        email: "root@example.com".into(),
        first_name: "Root".into(),
        last_name: "Admin".into(),
    }
}

#[tokio::test]
async fn test_session_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path());

    let mut data = SessionData::new();
    data.set_login("access".into(), "refresh".into(), admin());

    store.save(&data).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded.access_token.as_deref(), Some("access"));
    assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(loaded.user.unwrap().username, "root");

    store.delete().unwrap();
    assert!(!store.exists());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_session_init_loads_persisted_credential() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path());
    let mut data = SessionData::new();
    data.set_login("persisted".into(), String::new(), admin());
    store.save(&data).unwrap();

    let session = Session::init(temp_dir.path());
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("persisted"));
}

#[tokio::test]
async fn test_session_clear_deletes_credential_file() {
    let temp_dir = TempDir::new().unwrap();
    let session = Session::init(temp_dir.path());
    session.set_login("tok".into(), String::new(), admin());

    let store = SessionStore::new(temp_dir.path());
    assert!(store.exists());

    session.clear();
    assert!(!session.is_authenticated());
    assert!(!store.exists());
}

#[tokio::test]
async fn test_client_starts_unauthenticated() {
    let config = ClientConfig::new("http://localhost:8000").without_persistence();
    let client = BlueAdminClient::new(&config).unwrap();
    assert!(!client.auth().is_authenticated());
    assert!(client.auth().current_user().is_none());
    assert!(client.session().token().is_none());
}

#[test]
fn test_login_request_shapes() {
    let by_name = LoginRequest::with_username("root", "hunter22");
    let json = serde_json::to_value(&by_name).unwrap();
    assert_eq!(json["grant_type"], "authorization_code");
    assert_eq!(json["username"], "root");
    assert!(json.get("email").is_none());

    let by_email = LoginRequest::with_email("root@example.com", "hunter22");
    let json = serde_json::to_value(&by_email).unwrap();
    assert_eq!(json["email"], "root@example.com");
    assert!(json.get("username").is_none());
}

/// One-shot server answering whatever arrives with a 401 envelope
async fn serve_unauthorized() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let body = r#"{"data":null,"success":false,"details":"token expired"}"#;
            let response = format!(
                "HTTP/1.1 401 Unauthorized\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_unauthorized_response_tears_down_session() {
    let base_url = serve_unauthorized().await;
    let config = ClientConfig::new(base_url).without_persistence();

    let session = Session::in_memory();
    session.set_login("stale-token".into(), String::new(), admin());
    let client = BlueAdminClient::with_session(&config, session.clone()).unwrap();
    assert!(client.session().is_authenticated());

    let err = client
        .users()
        .list(&ListQuery::first_page(10))
        .await
        .unwrap_err();

    // The 401 policy applies regardless of which call produced it:
    // the credential is gone and the caller sees the dedicated error.
    assert!(err.is_session_expired());
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
}

#[test]
fn test_list_query_is_one_based() {
    // The client sits on the API side of the pagination boundary and
    // only ever speaks 1-based page numbers.
    let query = ListQuery::first_page(10);
    assert_eq!(query.page, 1);
    let params = query.to_params();
    assert!(params.contains(&("page".into(), "1".into())));
}
