// Net Worth Tracker - Web Server
// JSON API over the ledger for a browser front end

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use clap::Parser;
use net_worth_tracker::logging::{init_logging, LogTarget};
use net_worth_tracker::{
    today, Config, Ledger, LedgerError, Month, MonthDraft, Overrides, Selection, Theme,
    WipeConfirmation,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use uuid::Uuid;

/// How long a first wipe confirmation stays valid
const WIPE_TOKEN_TTL: Duration = Duration::from_secs(120);

/// Token handed out by the first wipe confirmation
#[derive(Debug, Clone, Copy)]
struct PendingWipe {
    token: Uuid,
    issued: Instant,
}

impl PendingWipe {
    fn issue() -> Self {
        Self {
            token: Uuid::new_v4(),
            issued: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.issued.elapsed() > WIPE_TOKEN_TTL
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    ledger: Arc<Mutex<Ledger>>,
    /// At most one outstanding wipe token; a new request replaces it
    pending_wipe: Arc<Mutex<Option<PendingWipe>>>,
}

impl AppState {
    fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            pending_wipe: Arc::new(Mutex::new(None)),
        }
    }

    fn ledger(&self) -> Result<MutexGuard<'_, Ledger>, Response> {
        self.ledger
            .lock()
            .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "ledger lock poisoned"))
    }

    fn pending_wipe(&self) -> Result<MutexGuard<'_, Option<PendingWipe>>, Response> {
        self.pending_wipe
            .lock()
            .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "wipe lock poisoned"))
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::err(message.into()))).into_response()
}

fn ok_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

/// Validate path values: year in the ten-year window, month 0-11
fn parse_selection(year: i32, month: u32) -> Result<Selection, Response> {
    let (current_year, _) = today();
    Month::new(month)
        .and_then(|month| Selection::new(year, month, current_year))
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))
}

#[derive(Serialize, Deserialize)]
struct ThemeBody {
    theme: Theme,
}

#[derive(Serialize)]
struct WipeTokenResponse {
    token: Uuid,
    expires_in_secs: u64,
    message: &'static str,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/months/:year/:month - Stored month (all-zero when absent)
async fn get_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let selection = match parse_selection(year, month) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(response) => return response,
    };

    let record = ledger.month(selection.year(), selection.month()).into_owned();
    ok_response(record)
}

/// PUT /api/months/:year/:month - Replace the month with the submitted form
async fn put_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Json(draft): Json<MonthDraft>,
) -> Response {
    let selection = match parse_selection(year, month) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let mut ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(response) => return response,
    };

    match ledger.commit_draft(selection.year(), selection.month(), &draft) {
        Ok(record) => ok_response(record),
        Err(e) => {
            error!("Error saving {}/{}: {}", year, month, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /api/dashboard/:year/:month - Totals, delta and chart series
async fn get_dashboard(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let selection = match parse_selection(year, month) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(response) => return response,
    };

    let (current_year, _) = today();
    ok_response(ledger.dashboard(selection, current_year))
}

/// GET /api/theme
async fn get_theme(State(state): State<AppState>) -> Response {
    match state.ledger() {
        Ok(ledger) => ok_response(ThemeBody {
            theme: ledger.theme(),
        }),
        Err(response) => response,
    }
}

/// PUT /api/theme - { "theme": "light" }
async fn put_theme(State(state): State<AppState>, Json(body): Json<ThemeBody>) -> Response {
    let mut ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(response) => return response,
    };

    match ledger.set_theme(body.theme) {
        Ok(()) => ok_response(body),
        Err(e) => {
            error!("Error saving theme: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /api/wipe - First confirmation: hands out a single-use token
async fn request_wipe(State(state): State<AppState>) -> Response {
    let mut pending = match state.pending_wipe() {
        Ok(pending) => pending,
        Err(response) => return response,
    };

    let wipe = PendingWipe::issue();
    if pending.replace(wipe).is_some() {
        info!("Previous wipe token replaced");
    }
    warn!("Wipe requested, waiting for second confirmation");

    ok_response(WipeTokenResponse {
        token: wipe.token,
        expires_in_secs: WIPE_TOKEN_TTL.as_secs(),
        message: "Last warning: every historical record will be lost. DELETE /api/wipe/{token} to continue.",
    })
}

/// DELETE /api/wipe/:token - Second confirmation: deletes all financial data
async fn confirm_wipe(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    let Ok(token) = Uuid::parse_str(&token) else {
        return error_response(StatusCode::BAD_REQUEST, "malformed wipe token");
    };

    // Any presented token consumes the pending one, so a guess cannot be retried
    let pending = match state.pending_wipe() {
        Ok(mut pending) => pending.take(),
        Err(response) => return response,
    };
    match pending {
        Some(wipe) if wipe.token == token && !wipe.is_expired() => {}
        Some(wipe) if wipe.token == token => {
            warn!("Expired wipe token presented");
            return error_response(StatusCode::GONE, "wipe token expired, request a new one");
        }
        _ => {
            return error_response(StatusCode::NOT_FOUND, "unknown or already used wipe token");
        }
    }

    let mut ledger = match state.ledger() {
        Ok(ledger) => ledger,
        Err(response) => return response,
    };

    let confirmation = WipeConfirmation::default().confirm().confirm();
    match ledger.wipe(confirmation) {
        Ok(()) => ok_response("All financial data deleted"),
        Err(LedgerError::WipeNotConfirmed) => {
            error_response(StatusCode::BAD_REQUEST, "wipe not confirmed")
        }
        Err(e) => {
            error!("Error wiping data: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn build_router(state: AppState, static_dir: PathBuf) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/months/:year/:month", get(get_month).put(put_month))
        .route("/dashboard/:year/:month", get(get_dashboard))
        .route("/theme", get(get_theme).put(put_theme))
        .route("/wipe", post(request_wipe))
        .route("/wipe/:token", delete(confirm_wipe))
        .with_state(state);

    // Build main router
    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

/// Net Worth Tracker API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ServerArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ledger database file (overrides the config file)
    #[arg(long, value_name = "FILE", env = "NETWORTH_DB")]
    db: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:3000
    #[arg(short, long, env = "NETWORTH_BIND")]
    bind: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    config.merge(&Overrides {
        db_path: args.db.clone(),
        bind: args.bind.clone(),
        verbose: args.verbose,
    });
    init_logging(&config.logging, LogTarget::Stderr)?;

    info!("🌐 Net Worth Tracker - Web Server v{}", net_worth_tracker::VERSION);

    let mut ledger = Ledger::open(&config.storage.db_path).with_context(|| {
        format!("Failed to open ledger {}", config.storage.db_path.display())
    })?;
    if let Ok(theme) = config.display.default_theme.parse::<Theme>() {
        ledger.apply_default_theme(theme)?;
    }

    let app = build_router(AppState::new(ledger), config.server.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;

    info!("🚀 Server running on http://{}", config.server.bind);
    info!("   API: http://{}/api/dashboard/<year>/<month 0-11>", config.server.bind);

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let ledger = Ledger::in_memory().unwrap();
        build_router(AppState::new(ledger), PathBuf::from("does-not-exist"))
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router();
        let (status, body) = send(&router, "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!("OK"));
    }

    #[tokio::test]
    async fn test_put_then_get_month() {
        let router = test_router();
        let (year, _) = today();

        let draft = json!({
            "bank": "100",
            "cash": "",
            "investments": "x",
            "income": [ { "label": "Pay", "amount": "1000" } ],
            "expenses": [ { "label": "Rent", "amount": "400" } ]
        });
        let (status, body) =
            send(&router, "PUT", &format!("/api/months/{}/0", year), Some(draft)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["netWorth"]["investments"], json!(0.0));

        let (status, body) = send(&router, "GET", &format!("/api/months/{}/0", year), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["income"][0]["label"], json!("Pay"));

        let (_, body) = send(&router, "GET", &format!("/api/dashboard/{}/0", year), None).await;
        assert_eq!(body["data"]["totals"]["balance"], json!(600.0));
        assert_eq!(body["data"]["delta"], json!(0.0));

        let (_, body) = send(&router, "GET", &format!("/api/dashboard/{}/1", year), None).await;
        assert_eq!(body["data"]["delta"], json!(-100.0));
        assert_eq!(body["data"]["polarity"], json!("loss"));
        assert_eq!(body["data"]["decade_series"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn test_invalid_selection_is_bad_request() {
        let router = test_router();
        let (year, _) = today();

        let (status, body) = send(&router, "GET", &format!("/api/months/{}/12", year), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let (status, _) = send(&router, "GET", &format!("/api/months/{}/3", year - 10), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_theme_round_trip() {
        let router = test_router();

        let (_, body) = send(&router, "GET", "/api/theme", None).await;
        assert_eq!(body["data"]["theme"], json!("dark"));

        let (status, _) = send(&router, "PUT", "/api/theme", Some(json!({ "theme": "light" }))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, "GET", "/api/theme", None).await;
        assert_eq!(body["data"]["theme"], json!("light"));
    }

    #[tokio::test]
    async fn test_wipe_needs_token_from_first_step() {
        let router = test_router();
        let (year, _) = today();
        let month_uri = format!("/api/months/{}/0", year);

        send(&router, "PUT", &month_uri, Some(json!({ "bank": "50" }))).await;

        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&router, "POST", "/api/wipe", None).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, "GET", &month_uri, None).await;
        assert_eq!(body["data"]["netWorth"]["bank"], json!(0.0));

        // Tokens are single use
        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_new_wipe_request_replaces_old_token() {
        let router = test_router();

        let mut tokens = Vec::new();
        for _ in 0..3 {
            let (_, body) = send(&router, "POST", "/api/wipe", None).await;
            assert_eq!(body["data"]["expires_in_secs"], json!(WIPE_TOKEN_TTL.as_secs()));
            tokens.push(body["data"]["token"].as_str().unwrap().to_string());
        }

        // Only the latest first step is still pending
        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", tokens[0]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The mismatch above consumed the pending token too
        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", tokens[2]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expired_wipe_token_is_rejected() {
        let (year, _) = today();
        let month_uri = format!("/api/months/{}/0", year);
        let state = AppState::new(Ledger::in_memory().unwrap());
        let router = build_router(state.clone(), PathBuf::from("does-not-exist"));

        send(&router, "PUT", &month_uri, Some(json!({ "bank": "50" }))).await;

        let stale = PendingWipe {
            token: Uuid::new_v4(),
            issued: Instant::now()
                .checked_sub(WIPE_TOKEN_TTL + Duration::from_secs(1))
                .unwrap(),
        };
        *state.pending_wipe.lock().unwrap() = Some(stale);

        let (status, _) = send(&router, "DELETE", &format!("/api/wipe/{}", stale.token), None).await;
        assert_eq!(status, StatusCode::GONE);
        assert!(state.pending_wipe.lock().unwrap().is_none());

        let (_, body) = send(&router, "GET", &month_uri, None).await;
        assert_eq!(body["data"]["netWorth"]["bank"], json!(50.0));
    }
}
