use crate::auth::sessions::create_session;
use crate::db::connection::{init_db, Database};
use crate::db::properties::import_properties;
use crate::domain::property::Property;
use crate::router::handle;
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A migrated database file under the temp dir, deleted on drop.
pub struct TestDb {
    pub db: Database,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn init_test_db() -> TestDb {
    let path = std::env::temp_dir().join(format!(
        "listings_test_{}_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let db = Database::new(path.to_string_lossy());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    TestDb { db, path }
}

/// App state over its own database file; the file goes away with it.
pub struct TestState {
    state: AppState,
    _db: TestDb,
}

impl Deref for TestState {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

pub fn test_state(properties: &[Property]) -> TestState {
    let test_db = init_test_db();
    import_properties(&test_db.db, properties).expect("Failed to seed properties");
    TestState {
        state: AppState::new(test_db.db.clone(), 100),
        _db: test_db,
    }
}

/// A listable property: has both address and parcel id.
pub fn listed(id: &str, price: i64, city: &str) -> Property {
    Property {
        parcel_id: Some(format!("41-{id}")),
        address: Some(format!("{id} MAIN ST")),
        city: Some(city.to_string()),
        price: Some(price),
        ..Property::with_id(id)
    }
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn session_for(state: &AppState, user_id: &str) -> String {
    state
        .db
        .with_conn(|conn| create_session(conn, user_id, now_unix(), 3600))
        .expect("Failed to create session")
}

pub fn get(state: &AppState, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(state, req)
}

pub fn get_with_session(state: &AppState, uri: &str, token: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    send(state, req)
}

pub fn post_json(state: &AppState, uri: &str, token: Option<&str>, body: Value) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    send(state, builder.body(Body::from(body.to_string())).unwrap())
}

/// Route a request the way the server does, errors included.
pub fn send(state: &AppState, req: astra::Request) -> Response {
    handle(req, state).unwrap_or_else(crate::responses::error_to_response)
}

pub fn body_json(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"))
}

pub fn ids(page: &Value) -> Vec<String> {
    page["properties"]
        .as_array()
        .expect("properties array")
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_database_file_is_removed_on_drop() {
    let test_db = init_test_db();
    let path = test_db.path.clone();
    assert!(path.exists());

    drop(test_db);
    assert!(!path.exists());
}
