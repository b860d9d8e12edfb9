use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::bookings::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::{Partnership, PartnershipStatus};
use crate::state::AppState;
use crate::validation::{self, PARTNERSHIP_RULES};

// POST /api/partnerships
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePartnershipRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub investment_capacity: Option<String>,
    pub business_experience: Option<String>,
    pub preferred_location: Option<String>,
    pub comments: Option<String>,
    pub call_schedule: Option<String>,
    pub status: Option<String>,
}

impl CreatePartnershipRequest {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "fullName" => self.full_name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "city" => self.city.clone(),
            "pincode" => self.pincode.clone(),
            "investmentCapacity" => self.investment_capacity.clone(),
            "businessExperience" => self.business_experience.clone(),
            "preferredLocation" => self.preferred_location.clone(),
            "comments" => self.comments.clone(),
            "callSchedule" => self.call_schedule.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }
}

fn validated<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Internal(anyhow::anyhow!("{field} missing after validation")))
}

pub async fn create_partnership(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePartnershipRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    tracing::info!(
        full_name = body.full_name.as_deref().unwrap_or(""),
        city = body.city.as_deref().unwrap_or(""),
        investment_capacity = body.investment_capacity.as_deref().unwrap_or(""),
        call_schedule = body.call_schedule.as_deref().unwrap_or(""),
        "new partnership application"
    );

    let errors = validation::apply(PARTNERSHIP_RULES, &|f| body.field(f));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let trim = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let status = trim(body.status)
        .as_deref()
        .and_then(PartnershipStatus::parse)
        .unwrap_or(PartnershipStatus::Pending);

    let now = Utc::now().naive_utc();
    let partnership = Partnership {
        id: uuid::Uuid::new_v4().to_string(),
        full_name: validated(trim(body.full_name), "fullName")?,
        email: validated(trim(body.email), "email")?.to_lowercase(),
        phone: validated(trim(body.phone), "phone")?,
        city: validated(trim(body.city), "city")?,
        pincode: validated(trim(body.pincode), "pincode")?,
        investment_capacity: validated(trim(body.investment_capacity), "investmentCapacity")?,
        business_experience: trim(body.business_experience).unwrap_or_default(),
        preferred_location: validated(trim(body.preferred_location), "preferredLocation")?,
        comments: trim(body.comments).unwrap_or_default(),
        call_schedule: validated(trim(body.call_schedule), "callSchedule")?,
        status,
        submitted_at: now,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_partnership(&db, &partnership)?;
    }

    tracing::info!(id = %partnership.id, "partnership application saved");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Partnership application submitted successfully",
            "data": partnership,
        })),
    ))
}

// GET /api/partnerships
#[derive(Deserialize)]
pub struct ListPartnershipsQuery {
    pub status: Option<String>,
    pub city: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

pub async fn list_partnerships(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPartnershipsQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;
    let status_filter = query.status.as_deref();
    let city_filter = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let (partnerships, total) = {
        let db = state.db.lock().unwrap();
        let partnerships =
            queries::list_partnerships(&db, status_filter, city_filter, limit, offset)?;
        let total = queries::count_partnerships(&db, status_filter, city_filter)?;
        (partnerships, total)
    };

    let pages = (total + limit - 1) / limit;

    tracing::debug!(count = partnerships.len(), total, page, "retrieved partnership applications");

    Ok(Json(serde_json::json!({
        "success": true,
        "count": partnerships.len(),
        "total": total,
        "page": page,
        "pages": pages,
        "data": partnerships,
    })))
}

// GET /api/partnerships/:id
pub async fn get_partnership(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let partnership = {
        let db = state.db.lock().unwrap();
        queries::get_partnership_by_id(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("Partnership application not found".to_string()))?;

    Ok(Json(serde_json::json!({ "success": true, "data": partnership })))
}

// PUT /api/partnerships/:id
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

pub async fn update_partnership(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .as_deref()
        .map(str::trim)
        .and_then(PartnershipStatus::parse)
        .ok_or_else(|| {
            AppError::Validation(vec![format!(
                "Status must be one of: {}",
                PartnershipStatus::ALL.join(", ")
            )])
        })?;

    let partnership = {
        let db = state.db.lock().unwrap();
        if !queries::update_partnership_status(&db, &id, &status)? {
            return Err(AppError::NotFound(
                "Partnership application not found".to_string(),
            ));
        }
        queries::get_partnership_by_id(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("Partnership application not found".to_string()))?;

    tracing::info!(id = %id, status = status.as_str(), "partnership status updated");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Partnership application updated successfully",
        "data": partnership,
    })))
}

// DELETE /api/partnerships/:id
pub async fn delete_partnership(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_partnership(&db, &id)?
    };

    if !deleted {
        return Err(AppError::NotFound(
            "Partnership application not found".to_string(),
        ));
    }

    tracing::info!(id = %id, "partnership application deleted");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Partnership application deleted successfully",
    })))
}
