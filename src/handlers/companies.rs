//! Company handlers: list, detail with industries and invoices, create,
//! update, delete.

use crate::error::ApiError;
use crate::model::{Company, CompanyCreate, CompanyDetail, CompanyUpdate, InvoiceSummary};
use crate::state::AppState;
use crate::validate::{parse_body, FieldKind, FieldSpec};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("code", FieldKind::Str),
    FieldSpec::new("name", FieldKind::Str),
    FieldSpec::new("description", FieldKind::Str),
];

const UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", FieldKind::Str),
    FieldSpec::new("description", FieldKind::Str),
];

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let companies: Vec<Company> = sqlx::query_as("SELECT code, name, description FROM companies")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(json!({ "companies": companies })))
}

/// One row per (industry, invoice) combination for the requested company;
/// null sentinels mark the outer-join arms with no match.
#[derive(sqlx::FromRow)]
struct DetailRow {
    code: String,
    name: String,
    description: String,
    industry: Option<String>,
    inv_id: Option<i32>,
    amt: Option<f64>,
    paid: Option<bool>,
    add_date: Option<DateTime<Utc>>,
    paid_date: Option<DateTime<Utc>>,
}

pub async fn get(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rows: Vec<DetailRow> = sqlx::query_as(
        r#"
        SELECT c.code, c.name, c.description,
               i.industry,
               inv.id AS inv_id, inv.amt, inv.paid, inv.add_date, inv.paid_date
        FROM companies c
        LEFT JOIN companies_industries ci ON ci.comp_code = c.code
        LEFT JOIN industries i ON i.code = ci.ind_code
        LEFT JOIN invoices inv ON inv.comp_code = c.code
        WHERE c.code = $1
        ORDER BY inv.id
        "#,
    )
    .bind(&code)
    .fetch_all(&state.pool)
    .await?;

    let first = rows.first().ok_or(ApiError::NotFound)?;
    let mut detail = CompanyDetail {
        code: first.code.clone(),
        name: first.name.clone(),
        description: first.description.clone(),
        industries: Vec::new(),
        invoices: Vec::new(),
    };

    // The joins multiply rows, so both lists deduplicate first-seen.
    let mut seen_invoices: Vec<i32> = Vec::new();
    for row in &rows {
        if let Some(label) = &row.industry {
            if !detail.industries.iter().any(|l| l == label) {
                detail.industries.push(label.clone());
            }
        }
        if let (Some(id), Some(amt), Some(paid), Some(add_date)) =
            (row.inv_id, row.amt, row.paid, row.add_date)
        {
            if !seen_invoices.contains(&id) {
                seen_invoices.push(id);
                detail.invoices.push(InvoiceSummary {
                    id,
                    amt,
                    paid,
                    add_date,
                    paid_date: row.paid_date,
                });
            }
        }
    }

    Ok(Json(json!({ "company": detail })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: CompanyCreate = parse_body(body, CREATE_FIELDS)?;
    let company: Company = sqlx::query_as(
        "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
         RETURNING code, name, description",
    )
    .bind(&payload.code)
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(&state.pool)
    .await?;
    tracing::debug!(code = %company.code, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `code` is immutable; only name and description are updatable.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: CompanyUpdate = parse_body(body, UPDATE_FIELDS)?;
    let company: Company = sqlx::query_as(
        "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
         RETURNING code, name, description",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&code)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "company": company })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM companies WHERE code = $1")
        .bind(&code)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(code = %code, "company deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
