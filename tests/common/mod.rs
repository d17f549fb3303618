#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use alamal_console::api::ApiClient;
use alamal_console::session::Session;

pub const TOKEN: &str = "test-token";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// One REST collection held by the mock
struct Collection {
    id_field: &'static str,
    key_field: &'static str,
    assign_ids: bool,
    next_id: i64,
    rows: Vec<Value>,
}

impl Collection {
    fn new(id_field: &'static str, key_field: &'static str, assign_ids: bool, rows: Vec<Value>) -> Self {
        let next_id = rows.len() as i64 + 1;
        Self {
            id_field,
            key_field,
            assign_ids,
            next_id,
            rows,
        }
    }

    fn position(&self, field: &str, wanted: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.get(field).map(key_of).as_deref() == Some(wanted))
    }
}

fn key_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Default)]
struct MockState {
    collections: HashMap<&'static str, Collection>,
    auth_headers: Vec<Option<String>>,
    fail_next: Option<(StatusCode, Value)>,
    backups: Vec<String>,
    restored: Vec<String>,
    backup_counter: u32,
}

#[derive(Clone)]
struct Shared(Arc<Mutex<MockState>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().unwrap()
    }
}

/// In-process stand-in for the Alamal backend on a free local port.
pub struct MockBackend {
    pub port: u16,
    pub base_url: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let shared = Shared(Arc::new(Mutex::new(seed())));

        let protected = Router::new()
            .nest("/api/engineers", engineer_routes())
            .nest("/api/societies", society_routes())
            .nest("/api/engineer-types", collection_routes("engineer-types"))
            .nest("/api/batch-types", collection_routes("batch-types"))
            .nest("/api/users", collection_routes("users"))
            .nest("/api/database", database_routes())
            .route_layer(middleware::from_fn_with_state(shared.clone(), guard));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .merge(protected)
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { port, base_url, shared })
    }

    /// Client whose session already holds the mock's token
    pub fn logged_in_client(&self) -> Result<ApiClient> {
        let session = Arc::new(Session::in_memory());
        session.store(TOKEN, USERNAME)?;
        Ok(ApiClient::new(&self.base_url, session)?)
    }

    pub fn anonymous_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.base_url, Arc::new(Session::in_memory()))?)
    }

    /// Authorization headers seen by protected routes, in arrival order
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.shared.lock().auth_headers.clone()
    }

    pub fn request_count(&self) -> usize {
        self.shared.lock().auth_headers.len()
    }

    /// Makes the next authorized request fail with `status` and `body`
    pub fn fail_next(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.shared.lock().fail_next = Some((status, body));
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.shared
            .lock()
            .collections
            .get(collection)
            .map(|c| c.rows.clone())
            .unwrap_or_default()
    }

    pub fn backups(&self) -> Vec<String> {
        self.shared.lock().backups.clone()
    }

    pub fn restored(&self) -> Vec<String> {
        self.shared.lock().restored.clone()
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("alamal-test-{}", uuid::Uuid::new_v4()))
}

fn seed() -> MockState {
    let engineers = vec![
        json!({"engineerId": 1, "chequeNumber": 1001, "engineerName": "Ali", "amount": 100.0,
               "chequeDate": "2024-01-10", "acts": [1.0, 2.0], "engineerType": "Civil", "createdBy": "admin"}),
        json!({"engineerId": 2, "chequeNumber": 1002, "engineerName": "Sara", "amount": 150.0,
               "chequeDate": "2024-01-11", "acts": [], "engineerType": "Electrical", "createdBy": "admin"}),
        json!({"engineerId": 3, "chequeNumber": 1003, "engineerName": "Ali", "amount": 50.0,
               "chequeDate": "2024-01-12", "acts": [3.0], "engineerType": "Civil", "createdBy": "admin"}),
    ];
    let societies = vec![
        json!({"attachmentNumber": 1, "chequeNumber": 501, "societyName": "Atlas Coop", "date": "2024-03-01",
               "sum": 1200.0, "batches": [10.0], "batchType": "Export", "section": 1, "createdBy": "admin"}),
        json!({"attachmentNumber": 2, "chequeNumber": 502, "societyName": "Atlas Coop", "date": "2024-03-05",
               "sum": 800.0, "batches": [11.0, 12.0], "batchType": "Local", "createdBy": "admin"}),
    ];
    let engineer_types = vec![
        json!({"engineerTypeId": 1, "engineerType": "Civil"}),
        json!({"engineerTypeId": 2, "engineerType": "Electrical"}),
    ];
    let batch_types = vec![json!({"batchTypeId": 1, "type": "Export", "section": 1})];
    let users = vec![json!({"username": USERNAME, "password": PASSWORD})];

    let mut collections = HashMap::new();
    collections.insert("engineers", Collection::new("engineerId", "chequeNumber", true, engineers));
    collections.insert("societies", Collection::new("attachmentNumber", "chequeNumber", true, societies));
    collections.insert("engineer-types", Collection::new("engineerTypeId", "engineerType", true, engineer_types));
    collections.insert("batch-types", Collection::new("batchTypeId", "type", true, batch_types));
    collections.insert("users", Collection::new("username", "username", false, users));

    MockState {
        collections,
        backups: vec!["backup_20240115_143000.sqlite".to_string(), "manual-copy.db".to_string()],
        ..Default::default()
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn guard(State(shared): State<Shared>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let failure = {
        let mut state = shared.lock();
        state.auth_headers.push(header.clone());
        if header.as_deref() != Some(format!("Bearer {}", TOKEN).as_str()) {
            return message(StatusCode::UNAUTHORIZED, "Unauthorized");
        }
        state.fail_next.take()
    };

    match failure {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(request).await,
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN, "username": USERNAME, "expiration": 1_700_000_000 })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid username or password")
    }
}

fn list(shared: &Shared, name: &str) -> Response {
    let state = shared.lock();
    let rows = state.collections.get(name).map(|c| c.rows.clone()).unwrap_or_default();
    Json(rows).into_response()
}

fn get_by_key(shared: &Shared, name: &str, key: &str) -> Response {
    let state = shared.lock();
    let Some(collection) = state.collections.get(name) else {
        return message(StatusCode::NOT_FOUND, "Unknown collection");
    };
    match collection.position(collection.key_field, key) {
        Some(index) => Json(collection.rows[index].clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, &format!("No record for {}", key)),
    }
}

fn create(shared: &Shared, name: &str, body: Value) -> Response {
    let mut state = shared.lock();
    let Some(collection) = state.collections.get_mut(name) else {
        return message(StatusCode::NOT_FOUND, "Unknown collection");
    };
    let Value::Object(mut record) = body else {
        return message(StatusCode::BAD_REQUEST, "Expected an object");
    };
    if let Some(key) = record.get(collection.key_field).map(key_of) {
        if collection.position(collection.key_field, &key).is_some() {
            return message(StatusCode::CONFLICT, &format!("{} already exists", key));
        }
    }
    if collection.assign_ids {
        record.insert(collection.id_field.to_string(), json!(collection.next_id));
        collection.next_id += 1;
    }
    let record = Value::Object(record);
    collection.rows.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

fn update(shared: &Shared, name: &str, id: &str, body: Value) -> Response {
    let mut state = shared.lock();
    let Some(collection) = state.collections.get_mut(name) else {
        return message(StatusCode::NOT_FOUND, "Unknown collection");
    };
    let Some(index) = collection.position(collection.id_field, id) else {
        return message(StatusCode::NOT_FOUND, &format!("No record with id {}", id));
    };
    let id_field = collection.id_field;
    if let (Value::Object(row), Value::Object(changes)) = (&mut collection.rows[index], body) {
        for (field, value) in changes {
            if field != id_field {
                row.insert(field, value);
            }
        }
    }
    Json(collection.rows[index].clone()).into_response()
}

fn delete(shared: &Shared, name: &str, id: &str) -> Response {
    let mut state = shared.lock();
    let Some(collection) = state.collections.get_mut(name) else {
        return message(StatusCode::NOT_FOUND, "Unknown collection");
    };
    match collection.position(collection.id_field, id) {
        Some(index) => {
            collection.rows.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => message(StatusCode::NOT_FOUND, &format!("No record with id {}", id)),
    }
}

fn collection_routes(name: &'static str) -> Router<Shared> {
    Router::new()
        .route(
            "/",
            get(move |State(shared): State<Shared>| async move { list(&shared, name) }).post(
                move |State(shared): State<Shared>, Json(body): Json<Value>| async move { create(&shared, name, body) },
            ),
        )
        .route(
            "/:id",
            get(move |State(shared): State<Shared>, Path(key): Path<String>| async move {
                get_by_key(&shared, name, &key)
            })
            .put(
                move |State(shared): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    update(&shared, name, &id, body)
                },
            )
            .delete(move |State(shared): State<Shared>, Path(id): Path<String>| async move {
                delete(&shared, name, &id)
            }),
        )
}

fn summary(shared: &Shared, name: &str, wanted: &str) -> Response {
    let (name_field, items_field, money_field, out_name, out_items, out_count, out_money) = match name {
        "engineers" => ("engineerName", "acts", "amount", "engineerName", "acts", "totalActs", "totalAmount"),
        _ => ("societyName", "batches", "sum", "societyName", "batches", "totalBatches", "totalSum"),
    };

    let state = shared.lock();
    let rows: Vec<&Value> = state
        .collections
        .get(name)
        .map(|c| c.rows.iter().filter(|row| row[name_field] == wanted).collect())
        .unwrap_or_default();
    if rows.is_empty() {
        return message(StatusCode::NOT_FOUND, &format!("No records for {}", wanted));
    }

    let items: Vec<Value> = rows
        .iter()
        .flat_map(|row| row[items_field].as_array().cloned().unwrap_or_default())
        .collect();
    let total: f64 = rows.iter().filter_map(|row| row[money_field].as_f64()).sum();

    let mut body = Map::new();
    body.insert(out_name.to_string(), json!(wanted));
    body.insert(out_count.to_string(), json!(items.len() as f64));
    body.insert(out_items.to_string(), Value::Array(items));
    body.insert(out_money.to_string(), json!(total));
    Json(Value::Object(body)).into_response()
}

fn engineer_routes() -> Router<Shared> {
    collection_routes("engineers")
        .route(
            "/summary/:name",
            get(|State(shared): State<Shared>, Path(name): Path<String>| async move {
                summary(&shared, "engineers", &name)
            }),
        )
        .route(
            "/by-name/:name",
            get(|State(shared): State<Shared>, Path(name): Path<String>| async move {
                let state = shared.lock();
                let rows: Vec<Value> = state.collections["engineers"]
                    .rows
                    .iter()
                    .filter(|row| row["engineerName"] == name.as_str())
                    .cloned()
                    .collect();
                Json(rows).into_response()
            }),
        )
}

fn society_routes() -> Router<Shared> {
    collection_routes("societies").route(
        "/summary/:name",
        get(|State(shared): State<Shared>, Path(name): Path<String>| async move {
            summary(&shared, "societies", &name)
        }),
    )
}

fn statistics(state: &MockState) -> Value {
    json!({
        "totalBackups": state.backups.len(),
        "maxAllowed": 10,
        "availableSlots": 10 - state.backups.len(),
        "oldestBackup": state.backups.last().cloned().unwrap_or_default(),
        "latestBackup": state.backups.first().cloned().unwrap_or_default(),
        "totalSize": 4096 * state.backups.len(),
    })
}

fn database_routes() -> Router<Shared> {
    Router::new()
        .route(
            "/backups",
            get(|State(shared): State<Shared>| async move {
                let state = shared.lock();
                let mut body = statistics(&state);
                body["backups"] = json!(state.backups);
                body["count"] = json!(state.backups.len());
                Json(body).into_response()
            }),
        )
        .route(
            "/backup/statistics",
            get(|State(shared): State<Shared>| async move {
                let body = statistics(&shared.lock());
                Json(body).into_response()
            }),
        )
        .route(
            "/info",
            get(|State(shared): State<Shared>| async move {
                let state = shared.lock();
                let mut body = statistics(&state);
                body["databaseSize"] = json!(65536);
                Json(body).into_response()
            }),
        )
        .route(
            "/backup",
            post(
                |State(shared): State<Shared>, Query(query): Query<HashMap<String, String>>| async move {
                    let compress = query.get("compress").map(String::as_str) == Some("true");
                    let mut state = shared.lock();
                    state.backup_counter += 1;
                    let extension = if compress { "zip" } else { "sqlite" };
                    let filename = format!("backup_20240201_0800{:02}.{}", state.backup_counter, extension);
                    state.backups.insert(0, filename.clone());

                    let content_type = if compress { "application/zip" } else { "application/x-sqlite3" };
                    (
                        [
                            (CONTENT_TYPE, content_type.to_string()),
                            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
                        ],
                        b"SQLite format 3\0mock".to_vec(),
                    )
                        .into_response()
                },
            ),
        )
        .route(
            "/restore/:filename",
            post(|State(shared): State<Shared>, Path(filename): Path<String>| async move {
                let mut state = shared.lock();
                if !state.backups.contains(&filename) {
                    return message(StatusCode::NOT_FOUND, &format!("Backup file not found: {}", filename));
                }
                state.restored.push(filename.clone());
                Json(json!({ "message": format!("Database restored from {}", filename), "status": "success" }))
                    .into_response()
            }),
        )
}
