use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, CarType, DeviceType, ServiceType};
use crate::state::AppState;
use crate::validation::{self, BOOKING_RULES};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

// POST /api/bookings
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub car_type: Option<String>,
    pub service_type: Option<String>,
    pub date: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub device_type: Option<String>,
    pub status: Option<String>,
}

impl CreateBookingRequest {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "carType" => self.car_type.clone(),
            "serviceType" => self.service_type.clone(),
            "date" => self.date.clone(),
            "address" => self.address.clone(),
            "notes" => self.notes.clone(),
            "deviceType" => self.device_type.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }
}

fn validated<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Internal(anyhow::anyhow!("{field} missing after validation")))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    tracing::info!(
        name = body.name.as_deref().unwrap_or(""),
        car_type = body.car_type.as_deref().unwrap_or(""),
        service_type = body.service_type.as_deref().unwrap_or(""),
        date = body.date.as_deref().unwrap_or(""),
        device_type = body.device_type.as_deref().unwrap_or("other"),
        "new booking request"
    );

    let errors = validation::apply(BOOKING_RULES, &|f| body.field(f));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let trim = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let car_type = validated(
        trim(body.car_type).as_deref().and_then(CarType::parse),
        "carType",
    )?;
    let service_type = validated(
        trim(body.service_type).as_deref().and_then(ServiceType::parse),
        "serviceType",
    )?;
    let date = validated(
        trim(body.date).and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        "date",
    )?;
    let device_type = trim(body.device_type)
        .as_deref()
        .and_then(DeviceType::parse)
        .unwrap_or(DeviceType::Other);
    let status = trim(body.status)
        .as_deref()
        .and_then(BookingStatus::parse)
        .unwrap_or(BookingStatus::Pending);

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        name: validated(trim(body.name), "name")?,
        email: validated(trim(body.email), "email")?.to_lowercase(),
        phone: validated(trim(body.phone), "phone")?,
        car_type,
        service_type,
        date,
        address: validated(trim(body.address), "address")?,
        notes: trim(body.notes).unwrap_or_default(),
        device_type,
        status,
        submitted_at: now,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_booking(&db, &booking)?;
    }

    tracing::info!(id = %booking.id, "booking saved");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Booking created successfully",
            "data": booking,
        })),
    ))
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;
    let status_filter = query.status.as_deref();

    let (bookings, total) = {
        let db = state.db.lock().unwrap();
        let bookings = queries::list_bookings(&db, status_filter, limit, offset)?;
        let total = queries::count_bookings(&db, status_filter)?;
        (bookings, total)
    };

    let pages = (total + limit - 1) / limit;

    tracing::debug!(count = bookings.len(), total, page, "retrieved bookings");

    Ok(Json(serde_json::json!({
        "success": true,
        "count": bookings.len(),
        "total": total,
        "page": page,
        "pages": pages,
        "data": bookings,
    })))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(serde_json::json!({ "success": true, "data": booking })))
}

// PUT /api/bookings/:id
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .as_deref()
        .map(str::trim)
        .and_then(BookingStatus::parse)
        .ok_or_else(|| {
            AppError::Validation(vec![format!(
                "Status must be one of: {}",
                BookingStatus::ALL.join(", ")
            )])
        })?;

    let booking = {
        let db = state.db.lock().unwrap();
        if !queries::update_booking_status(&db, &id, &status)? {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }
        queries::get_booking_by_id(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    tracing::info!(id = %id, status = status.as_str(), "booking status updated");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking updated successfully",
        "data": booking,
    })))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_booking(&db, &id)?
    };

    if !deleted {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    tracing::info!(id = %id, "booking deleted");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking deleted successfully",
    })))
}
