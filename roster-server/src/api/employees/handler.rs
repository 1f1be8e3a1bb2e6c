//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::services::images;
use crate::utils::{AppError, AppResult};
use shared::models::{Employee, EmployeeListData};
use shared::response::{ApiResponse, Pagination};

use super::form::EmployeeForm;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    /// Raw text on purpose: non-numeric values fall back silently
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Lenient pagination parsing: absent, non-numeric and non-positive
/// values all fall back to the default.
fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Malformed ids are indistinguishable from absent records (404)
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::not_found("Employee not found"))
}

/// GET /api/employees - paged list with optional name search
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<EmployeeListData>>> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_positive(query.limit.as_deref(), DEFAULT_LIMIT);
    let search = query.search.as_deref().filter(|s| !s.is_empty());
    let offset = (page as i64 - 1) * limit as i64;

    let total = employee::count(&state.pool, search).await?;
    let employees = employee::find_page(&state.pool, search, limit as i64, offset).await?;

    let data = EmployeeListData {
        employees,
        pagination: Pagination::new(page, limit, total),
    };
    Ok(Json(ApiResponse::ok(
        "All Employees Fetched Successfully",
        data,
    )))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let id = parse_id(&id)?;
    let employee = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    Ok(Json(ApiResponse::ok(
        "Employee Details Fetched Successfully",
        employee,
    )))
}

/// POST /api/employees - create, optionally with a profile image
pub async fn create(
    State(state): State<ServerState>,
    form: EmployeeForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let EmployeeForm { input, image } = form;

    // Fast-path duplicate check; the UNIQUE index still backstops races
    if employee::email_exists(&state.pool, &input.email).await? {
        return Err(AppError::conflict("Employee with this email already exists"));
    }

    let profile_image = store_image(&state, image)?;
    let created = employee::create(&state.pool, input, profile_image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Employee Created Successfully", created)),
    ))
}

/// PUT /api/employees/{id} - full overwrite of the core fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: EmployeeForm,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let id = parse_id(&id)?;
    let EmployeeForm { input, image } = form;

    let profile_image = store_image(&state, image)?;
    let updated = employee::update(&state.pool, id, input, profile_image).await?;

    Ok(Json(ApiResponse::ok(
        "Employee Updated Successfully",
        updated,
    )))
}

/// DELETE /api/employees/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    let deleted = employee::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found("Employee not found"));
    }
    Ok(Json(ApiResponse::ok_empty("Employee Deleted Successfully")))
}

fn store_image(
    state: &ServerState,
    image: Option<super::form::UploadedImage>,
) -> AppResult<Option<String>> {
    match image {
        Some(img) => {
            let path = images::store_profile_image(&state.uploads_dir(), &img.filename, &img.data)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}
