//! API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::info;

use super::SharedState;
use crate::error::BeanError;
use crate::store::beans::{self, BeanInput, BeanRecord};

/// Service info shown at the index
#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub message: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub beans: &'static str,
    pub status: &'static str,
    pub health: &'static str,
}

/// GET /
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "beanboard",
        version: env!("CARGO_PKG_VERSION"),
        message: "Dry beans CRUD API",
        endpoints: Endpoints {
            beans: "/beans",
            status: "/status",
            health: "/health",
        },
    })
}

/// Status response with store counts
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub bean_count: u64,
    pub class_count: u64,
}

/// GET /status
pub async fn status(State(state): State<SharedState>) -> Result<Json<StatusResponse>, BeanError> {
    let stats = state.db.stats()?;

    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        bean_count: stats.bean_count,
        class_count: stats.class_count,
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /beans - full table, client paginates
pub async fn list_beans(
    State(state): State<SharedState>,
) -> Result<Json<Vec<BeanRecord>>, BeanError> {
    let beans = state.db.with_conn(beans::list_beans)?;
    Ok(Json(beans))
}

/// GET /beans/:id
pub async fn get_bean(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<BeanRecord>, BeanError> {
    let bean = state
        .db
        .with_conn(|conn| beans::get_bean(conn, id))?
        .ok_or(BeanError::NotFound(id))?;

    Ok(Json(bean))
}

/// POST /beans
pub async fn create_bean(
    State(state): State<SharedState>,
    Json(input): Json<BeanInput>,
) -> Result<(StatusCode, Json<BeanRecord>), BeanError> {
    input.validate()?;

    let bean = state.db.with_conn(|conn| beans::create_bean(conn, &input))?;
    info!(id = bean.id, class = %bean.bean_class, "Created bean");

    Ok((StatusCode::CREATED, Json(bean)))
}

/// PUT /beans/:id - replaces all fields
pub async fn update_bean(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(input): Json<BeanInput>,
) -> Result<Json<BeanRecord>, BeanError> {
    input.validate()?;

    let bean = state
        .db
        .with_conn(|conn| beans::update_bean(conn, id, &input))?
        .ok_or(BeanError::NotFound(id))?;
    info!(id, "Updated bean");

    Ok(Json(bean))
}

/// DELETE /beans/:id - hard delete, empty body on success
pub async fn delete_bean(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BeanError> {
    let deleted = state.db.with_conn(|conn| beans::delete_bean(conn, id))?;

    if deleted {
        info!(id, "Deleted bean");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(BeanError::NotFound(id))
    }
}
