use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Admin;
use crate::services::auth::{self, MIN_PASSWORD_LEN};
use crate::state::AppState;

fn invalid_token() -> AppError {
    AppError::Unauthorized("Invalid or expired token".to_string())
}

/// Full token check: signature, validity window, and a store round-trip to
/// confirm the account still exists.
fn authenticate(state: &AppState, token: &str) -> Result<Admin, AppError> {
    let claims = auth::verify_token(
        &state.config.token_secret,
        token,
        state.config.token_ttl_hours,
    )
    .ok_or_else(invalid_token)?;

    let admin = {
        let db = state.db.lock().unwrap();
        queries::get_admin_by_id(&db, &claims.admin_id)?
    };
    admin.ok_or_else(invalid_token)
}

// POST /api/auth/login
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let username = body
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    let password = body.password.as_deref().filter(|p| !p.is_empty());

    let (Some(username), Some(password)) = (username, password) else {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    let admin = {
        let db = state.db.lock().unwrap();
        queries::get_admin_by_username(&db, username)?
    }
    .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let now = Utc::now().naive_utc();

    if admin.is_locked(now) {
        let minutes = admin.lock_minutes_remaining(now);
        return Err(AppError::Locked(format!(
            "Account is locked. Try again in {minutes} minutes."
        )));
    }

    if !auth::verify_password(password, &admin.password_hash) {
        // A lock that already expired restarts the count instead of
        // compounding on the stale counter.
        let attempts = if admin.lock_until.is_some() {
            1
        } else {
            admin.login_attempts + 1
        };
        let lock_until = (attempts >= state.config.max_login_attempts)
            .then(|| now + Duration::minutes(state.config.lockout_minutes));

        {
            let db = state.db.lock().unwrap();
            queries::set_login_failure(&db, &admin.id, attempts, lock_until.as_ref())?;
        }

        tracing::warn!(username = %admin.username, attempts, locked = lock_until.is_some(), "failed login attempt");

        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    {
        let db = state.db.lock().unwrap();
        queries::clear_login_failures(&db, &admin.id, &now)?;
    }

    let token = auth::issue_token(&state.config.token_secret, &admin.id)?;
    let expiry_time = (Utc::now() + Duration::hours(state.config.token_ttl_hours))
        .timestamp_millis();

    tracing::info!(username = %admin.username, "admin login successful");

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "token": token,
            "expiryTime": expiry_time,
            "username": admin.username,
            "role": admin.role,
        },
    })))
}

// POST /api/auth/verify
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<Value>, AppError> {
    let token = body
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Token is required".to_string()))?;

    let admin = authenticate(&state, token)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "username": admin.username,
            "role": admin.role,
        },
    })))
}

// POST /api/auth/change-password
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub token: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let token = body.token.as_deref().filter(|t| !t.is_empty());
    let current = body.current_password.as_deref().filter(|p| !p.is_empty());
    let new = body.new_password.as_deref().filter(|p| !p.is_empty());

    let (Some(token), Some(current), Some(new)) = (token, current, new) else {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    };

    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "New password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let admin = authenticate(&state, token)?;

    if !auth::verify_password(current, &admin.password_hash) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = auth::hash_password(new)?;
    {
        let db = state.db.lock().unwrap();
        queries::update_admin_password(&db, &admin.id, &password_hash)?;
    }

    tracing::info!(username = %admin.username, "admin password changed");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Password changed successfully",
    })))
}

// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth_header.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized("No token provided".to_string()));
    }

    let claims = auth::verify_token(
        &state.config.token_secret,
        token,
        state.config.token_ttl_hours,
    )
    .ok_or_else(invalid_token)?;

    let admin = {
        let db = state.db.lock().unwrap();
        queries::get_admin_by_id(&db, &claims.admin_id)?
    }
    .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "username": admin.username,
            "email": admin.email,
            "role": admin.role,
            "lastLogin": admin.last_login.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            "createdAt": admin.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    })))
}
