//! Invoice handlers: list, detail with owning company, create, update with
//! the paid-date transition, delete.

use crate::error::ApiError;
use crate::model::{Company, Invoice, InvoiceCreate, InvoiceDetail, InvoiceUpdate};
use crate::state::AppState;
use crate::validate::{parse_body, FieldKind, FieldSpec};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("comp_code", FieldKind::Str),
    FieldSpec::new("amt", FieldKind::Number),
];

const UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("amt", FieldKind::Number),
    FieldSpec::new("paid", FieldKind::Bool),
];

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

/// Invoice ids are path segments; anything non-numeric matches no row.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let invoices: Vec<Invoice> =
        sqlx::query_as(&format!("SELECT {} FROM invoices", INVOICE_COLUMNS))
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(json!({ "invoices": invoices })))
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i32,
    amt: f64,
    paid: bool,
    add_date: DateTime<Utc>,
    paid_date: Option<DateTime<Utc>>,
    code: String,
    name: String,
    description: String,
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let row: DetailRow = sqlx::query_as(
        r#"
        SELECT inv.id, inv.amt, inv.paid, inv.add_date, inv.paid_date,
               c.code, c.name, c.description
        FROM invoices inv
        JOIN companies c ON c.code = inv.comp_code
        WHERE inv.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(ApiError::NotFound)?;

    let detail = InvoiceDetail {
        id: row.id,
        amt: row.amt,
        paid: row.paid,
        add_date: row.add_date,
        paid_date: row.paid_date,
        company: Company {
            code: row.code,
            name: row.name,
            description: row.description,
        },
    };
    Ok(Json(json!({ "invoice": detail })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: InvoiceCreate = parse_body(body, CREATE_FIELDS)?;
    let invoice: Invoice = sqlx::query_as(&format!(
        "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) RETURNING {}",
        INVOICE_COLUMNS
    ))
    .bind(&payload.comp_code)
    .bind(payload.amt)
    .fetch_one(&state.pool)
    .await?;
    tracing::debug!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// The stored row decides the `paid_date` transition: marking paid stamps
/// now, unmarking clears it, and re-sending the same `paid` value leaves it
/// untouched while `amt` still updates.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let payload: InvoiceUpdate = parse_body(body, UPDATE_FIELDS)?;

    let current: Option<(bool, Option<DateTime<Utc>>)> =
        sqlx::query_as("SELECT paid, paid_date FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;
    let (was_paid, old_paid_date) = current.ok_or(ApiError::NotFound)?;

    let paid_date = match (was_paid, payload.paid) {
        (false, true) => Some(Utc::now()),
        (true, false) => None,
        _ => old_paid_date,
    };

    let invoice: Invoice = sqlx::query_as(&format!(
        "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3 WHERE id = $4 RETURNING {}",
        INVOICE_COLUMNS
    ))
    .bind(payload.amt)
    .bind(payload.paid)
    .bind(paid_date)
    .bind(id)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(json!({ "invoice": invoice })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(id = id, "invoice deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
