use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub source: String,
    #[serde(rename = "externalID")]
    pub external_id: String,
    #[serde(flatten)]
    pub event: StatusEvent,
}

#[derive(Deserialize)]
pub struct PostingId {
    pub source: String,
    #[serde(rename = "externalID")]
    pub external_id: String,
}

/// Form body shared by both status endpoints.
#[derive(Deserialize)]
pub struct StatusForm {
    pub data: String,
    #[serde(rename = "agentID")]
    pub agent_id: Option<String>,
    #[serde(rename = "authID")]
    pub auth_id: Option<String>,
}

/// Status history keyed by `(source, externalID)`.
pub type Db = Arc<RwLock<HashMap<(String, String), Vec<StatusEvent>>>>;

type Params = Query<BTreeMap<String, String>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/search", get(search))
        .route("/search/count", get(count))
        .route("/search/best-match", get(best_match))
        .route("/search/range", get(range))
        .route("/search/summary", get(summary))
        .route("/status/update", post(update_status))
        .route("/status/get", post(get_status))
        .route("/status/system", get(system_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
}

async fn search(Query(params): Params) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if params.is_empty() {
        return Err(bad_request("no query parameters"));
    }
    Ok(Json(json!({
        "success": true,
        "numResults": 0,
        "execTimeMs": 0,
        "query": params,
        "results": [],
    })))
}

async fn count(Query(params): Params) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if params.is_empty() {
        return Err(bad_request("no query parameters"));
    }
    Ok(Json(json!({ "count": 0, "query": params })))
}

async fn best_match(Query(params): Params) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let keywords = params
        .get("keywords")
        .ok_or_else(|| bad_request("keywords is required"))?;
    Ok(Json(json!({
        "category": "SSSS",
        "numResults": 0,
        "keywords": keywords,
    })))
}

async fn range(Query(params): Params) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let fields = params
        .get("fields")
        .ok_or_else(|| bad_request("fields is required"))?;
    let ranges: BTreeMap<&str, Value> = fields
        .split(',')
        .map(|field| (field, json!({ "min": 0, "max": 0 })))
        .collect();
    Ok(Json(json!({ "range": ranges })))
}

async fn summary(Query(params): Params) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let dimension = params
        .get("dimension")
        .ok_or_else(|| bad_request("dimension is required"))?;
    Ok(Json(json!({
        "dimension": dimension,
        "totals": {},
        "execTimeMs": 0,
    })))
}

async fn update_status(
    State(db): State<Db>,
    Form(form): Form<StatusForm>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let updates: Vec<StatusUpdate> =
        serde_json::from_str(&form.data).map_err(|_| bad_request("data is not valid JSON"))?;
    tracing::debug!(
        count = updates.len(),
        authenticated = form.agent_id.is_some() && form.auth_id.is_some(),
        "status update"
    );
    let mut history = db.write().await;
    for update in updates {
        history
            .entry((update.source, update.external_id))
            .or_default()
            .push(update.event);
    }
    Ok(Json(json!({ "success": true })))
}

async fn get_status(
    State(db): State<Db>,
    Form(form): Form<StatusForm>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let ids: Vec<PostingId> =
        serde_json::from_str(&form.data).map_err(|_| bad_request("data is not valid JSON"))?;
    let history = db.read().await;
    let results: Vec<Value> = ids
        .into_iter()
        .map(|id| {
            let events = history.get(&(id.source.clone(), id.external_id.clone()));
            json!({
                "exists": events.is_some(),
                "source": id.source,
                "externalID": id.external_id,
                "history": events.cloned().unwrap_or_default(),
            })
        })
        .collect();
    Ok(Json(Value::Array(results)))
}

async fn system_status() -> Json<Value> {
    Json(json!({ "code": 200, "message": "OK" }))
}
