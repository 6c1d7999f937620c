use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use permgate_core::{authenticate, resolve_permissions, PermissionSet};
use permgate_sheets::{SheetsClient, SourceConfig};

struct AppState {
    sheets: SheetsClient,
    sources: SourceConfig,
    messages: MessagesConfig,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let sheets = SheetsClient::from_env()?;
    let sources = SourceConfig::from_env()?;
    let messages = load_messages_config();
    let state = Arc::new(AppState {
        sheets,
        sources,
        messages,
    });
    let app = Router::new()
        .route("/api", post(handle_api).options(handle_preflight))
        .with_state(state);
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening" = %addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ApiRequest {
    #[serde(default)]
    action: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    username: String,
    permissions: PermissionSet,
}

async fn handle_api(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<ApiRequest>>,
) -> Response {
    let request = match payload {
        Some(Json(request)) => request,
        None => {
            return error_response(
                &state,
                AppError::BadRequest("invalid request body".to_string()),
            )
        }
    };
    match request.action.as_str() {
        "login" => match handle_login(&state, &request).await {
            Ok(response) => json_response(StatusCode::OK, &response),
            Err(err) => error_response(&state, err),
        },
        _ => error_response(&state, AppError::BadRequest("Invalid action".to_string())),
    }
}

async fn handle_login(state: &AppState, request: &ApiRequest) -> Result<LoginResponse, AppError> {
    let username = required_field(request.username.as_deref(), "username")?;
    let password = required_field(request.password.as_deref(), "password")?;
    let users = state
        .sheets
        .open_table(&state.sources.user_sheet_id, &state.sources.user_tab)
        .await
        .map_err(AppError::internal)?;
    let canonical = match authenticate(&users, username, password) {
        Some(identity) => identity.to_string(),
        None => {
            info!("login_rejected" = %username);
            return Err(AppError::Unauthorized);
        }
    };
    let grants = state
        .sheets
        .open_table(
            &state.sources.permission_sheet_id,
            &state.sources.permission_tab,
        )
        .await
        .map_err(AppError::internal)?;
    let permissions = resolve_permissions(&grants, &canonical);
    info!("login_ok" = %canonical);
    Ok(LoginResponse {
        success: true,
        username: canonical,
        permissions,
    })
}

fn required_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::BadRequest(format!("{name} is required"))),
    }
}

async fn handle_preflight() -> Response {
    with_cors(StatusCode::NO_CONTENT.into_response())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    with_cors((status, Json(body)).into_response())
}

fn error_response(state: &AppState, err: AppError) -> Response {
    let (status, message) = match err {
        AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        AppError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            state.messages.login_failed.clone(),
        ),
        AppError::Internal(err) => {
            error!("internal_error" = %err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", state.messages.internal_prefix, err),
            )
        }
    };
    json_response(status, &json!({ "success": false, "message": message }))
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    response
}

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::Internal(err.into())
    }
}

fn load_messages_config() -> MessagesConfig {
    let config_path =
        std::env::var("PERMGATE_CONFIG").unwrap_or_else(|_| "permgate.toml".to_string());
    let path = Path::new(&config_path);
    if !path.exists() {
        return MessagesConfig::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<ServiceConfig>(&contents)
            .map(|cfg| cfg.messages)
            .unwrap_or_default(),
        Err(_) => MessagesConfig::default(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServiceConfig {
    #[serde(default)]
    messages: MessagesConfig,
}

#[derive(Debug, Deserialize)]
struct MessagesConfig {
    #[serde(default = "default_login_failed")]
    login_failed: String,
    #[serde(default = "default_internal_prefix")]
    internal_prefix: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            login_failed: default_login_failed(),
            internal_prefix: default_internal_prefix(),
        }
    }
}

fn default_login_failed() -> String {
    "Cost Center หรือรหัสผ่านไม่ถูกต้อง".to_string()
}

fn default_internal_prefix() -> String {
    "เกิดข้อผิดพลาดภายใน Server".to_string()
}
