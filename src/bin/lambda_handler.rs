//! AWS Lambda handler for the agency REST API
//!
//! Serves customer and policy CRUD, the dashboard summary, renewal outreach,
//! customer search and quoting over one shared in-memory store. The store is
//! seeded from the CSV snapshot in `AGENCY_DATA_PATH` (default `data`).
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use agency_desk::aggregation::{customer_overview, suggested_outreach, OUTREACH_LIMIT};
use agency_desk::snapshot::DEFAULT_DATA_PATH;
use agency_desk::{
    compute_dashboard, confirm_quote, generate_quote, AgencyStore, CustomerForm, DashboardConfig, NewPolicy,
    Quote, Snapshot, StoreError,
};
use chrono::{DateTime, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Body of `POST /api/quotes`
#[derive(Debug, Deserialize)]
struct QuoteRequest {
    #[serde(default = "default_policy_type")]
    policy_type: String,
}

fn default_policy_type() -> String {
    "Auto".to_string()
}

/// Body of `POST /api/quotes/confirm`
#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    customer: CustomerForm,
    quote: Quote,
}

/// Routing inputs pulled out of the Lambda event
#[derive(Debug, Default)]
struct ApiRequest<'a> {
    method: &'a str,
    path: &'a str,
    search: Option<&'a str>,
    limit: Option<usize>,
    body: &'a str,
}

#[derive(Debug, PartialEq)]
enum Reply {
    Json(u16, Value),
    NoContent,
}

#[derive(Debug, PartialEq)]
struct ApiError {
    status: u16,
    body: Value,
}

impl ApiError {
    fn new(status: u16, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::CustomerNotFound(_) | StoreError::PolicyNotFound(_) => Self::new(404, &err.to_string()),
            StoreError::DuplicatePolicyNumber(_) => Self::new(400, &err.to_string()),
            StoreError::Invalid(errors) => Self {
                status: 400,
                body: json!({ "error": "Validation failed", "errors": errors }),
            },
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::new(400, &format!("Invalid JSON: {}", e)))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::new(400, &format!("Invalid id: {}", raw)))
}

fn to_json<T: serde::Serialize>(status: u16, value: &T) -> Result<Reply, ApiError> {
    serde_json::to_value(value)
        .map(|v| Reply::Json(status, v))
        .map_err(|e| ApiError::new(500, &format!("Failed to encode response: {}", e)))
}

fn poisoned<T>(_: T) -> ApiError {
    ApiError::new(500, "Store unavailable")
}

/// Dispatch one request against the store
fn route(store: &RwLock<AgencyStore>, req: &ApiRequest, now: DateTime<Utc>) -> Result<Reply, ApiError> {
    let segments: Vec<&str> = req.path.trim_matches('/').split('/').collect();

    match (req.method, segments.as_slice()) {
        // ---- Customers ----
        ("GET", ["api", "customers"]) => {
            let store = store.read().map_err(poisoned)?;
            to_json(200, &store.list_customers())
        }
        ("GET", ["api", "customers", "search"]) => {
            let store = store.read().map_err(poisoned)?;
            let rows = customer_overview(store.list_customers(), store.list_policies(), req.search.unwrap_or(""));
            to_json(200, &rows)
        }
        ("GET", ["api", "customers", id]) => {
            let id = parse_id(id)?;
            let store = store.read().map_err(poisoned)?;
            to_json(200, store.get_customer(id)?)
        }
        ("POST", ["api", "customers"]) => {
            let form: CustomerForm = parse_body(req.body)?;
            let customer = store.write().map_err(poisoned)?.create_customer(&form, now)?;
            log::info!("Created customer {}", customer.customer_id);
            to_json(201, &customer)
        }
        ("PUT", ["api", "customers", id]) => {
            let id = parse_id(id)?;
            let form: CustomerForm = parse_body(req.body)?;
            let customer = store.write().map_err(poisoned)?.update_customer(id, &form)?;
            to_json(200, &customer)
        }
        ("DELETE", ["api", "customers", id]) => {
            let id = parse_id(id)?;
            store.write().map_err(poisoned)?.delete_customer(id);
            Ok(Reply::NoContent)
        }

        // ---- Policies ----
        ("GET", ["api", "policies"]) => {
            let store = store.read().map_err(poisoned)?;
            to_json(200, &store.list_policies())
        }
        ("GET", ["api", "policies", "customer", id]) => {
            let id = parse_id(id)?;
            let store = store.read().map_err(poisoned)?;
            to_json(200, &store.list_policies_for_customer(id))
        }
        ("POST", ["api", "policies"]) => {
            let new: NewPolicy = parse_body(req.body)?;
            let policy = store.write().map_err(poisoned)?.create_policy(new)?;
            log::info!("Created policy {}", policy.policy_number);
            to_json(201, &policy)
        }
        ("PUT", ["api", "policies", id]) => {
            let id = parse_id(id)?;
            let new: NewPolicy = parse_body(req.body)?;
            let policy = store.write().map_err(poisoned)?.update_policy(id, new)?;
            to_json(200, &policy)
        }
        ("DELETE", ["api", "policies", id]) => {
            let id = parse_id(id)?;
            store.write().map_err(poisoned)?.delete_policy(id);
            Ok(Reply::NoContent)
        }

        // ---- Views ----
        ("GET", ["api", "dashboard"]) => {
            let store = store.read().map_err(poisoned)?;
            let summary = compute_dashboard(
                store.list_customers(),
                store.list_policies(),
                &DashboardConfig::default(),
                now,
            );
            to_json(200, &summary)
        }
        ("GET", ["api", "outreach"]) => {
            let store = store.read().map_err(poisoned)?;
            let entries = suggested_outreach(store.list_policies(), now, req.limit.unwrap_or(OUTREACH_LIMIT));
            to_json(200, &entries)
        }

        // ---- Quotes ----
        ("POST", ["api", "quotes"]) => {
            let request: QuoteRequest = parse_body(req.body)?;
            let quote = generate_quote(&request.policy_type, &mut rand::thread_rng());
            to_json(200, &quote)
        }
        ("POST", ["api", "quotes", "confirm"]) => {
            let request: ConfirmRequest = parse_body(req.body)?;
            let mut store = store.write().map_err(poisoned)?;
            let (customer, policy) = confirm_quote(
                &mut store,
                &request.customer,
                &request.quote,
                now.date_naive(),
                now,
                &mut rand::thread_rng(),
            )?;
            to_json(201, &json!({ "customer": customer, "policy": policy }))
        }

        _ => Err(ApiError::new(404, "Not found")),
    }
}

fn with_cors(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(err: &ApiError) -> Result<Response<Body>, Error> {
    Ok(with_cors(err.status)
        .header("Content-Type", "application/json")
        .body(Body::Text(err.body.to_string()))?)
}

fn json_response(status: u16, body: &Value) -> Result<Response<Body>, Error> {
    Ok(with_cors(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

/// Lambda handler function
async fn handler(event: Request, store: Arc<RwLock<AgencyStore>>) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };
    let params = event.query_string_parameters();
    let request = ApiRequest {
        method: event.method().as_str(),
        path: event.uri().path(),
        search: params.first("q"),
        limit: params.first("limit").and_then(|l| l.parse().ok()),
        body: &body_str,
    };

    log::debug!("{} {}", request.method, request.path);

    match route(&store, &request, Utc::now()) {
        Ok(Reply::Json(status, body)) => json_response(status, &body),
        Ok(Reply::NoContent) => Ok(with_cors(204).body(Body::Empty)?),
        Err(err) => {
            if err.status >= 500 {
                log::error!("{} {} failed: {}", request.method, request.path, err.body);
            }
            error_response(&err)
        }
    }
}

/// Seed the store from `AGENCY_DATA_PATH`, or from the default directory when present
fn load_store() -> Result<AgencyStore, Error> {
    let snapshot = match std::env::var("AGENCY_DATA_PATH") {
        Ok(dir) => {
            let dir = PathBuf::from(dir);
            Snapshot::load_from(&dir)
                .map_err(|e| format!("Failed to load snapshot from {}: {}", dir.display(), e))?
        }
        Err(_) => Snapshot::load_default().unwrap_or_else(|e| {
            log::warn!("No snapshot in {} ({}), starting empty", DEFAULT_DATA_PATH, e);
            Snapshot::default()
        }),
    };

    log::info!(
        "Store seeded with {} customers and {} policies",
        snapshot.customers.len(),
        snapshot.policies.len()
    );
    Ok(AgencyStore::from_snapshot(snapshot))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let store = Arc::new(RwLock::new(load_store()?));
    run(service_fn(move |event: Request| {
        let store = Arc::clone(&store);
        async move { handler(event, store).await }
    }))
    .await
}
