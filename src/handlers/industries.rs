//! Industry handlers: list, detail with companies, create, and the
//! company-association route.

use crate::error::ApiError;
use crate::model::{Company, Industry, IndustryAssociate, IndustryCreate, IndustryDetail};
use crate::state::AppState;
use crate::validate::{parse_body, FieldKind, FieldSpec};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("code", FieldKind::Str),
    FieldSpec::new("industry", FieldKind::Str),
];

const ASSOCIATE_FIELDS: &[FieldSpec] = &[FieldSpec::new("comp_code", FieldKind::Str)];

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let industries: Vec<Industry> = sqlx::query_as("SELECT code, industry FROM industries")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(json!({ "industries": industries })))
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    code: String,
    industry: String,
    comp_code: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

pub async fn get(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rows: Vec<DetailRow> = sqlx::query_as(
        r#"
        SELECT i.code, i.industry,
               c.code AS comp_code, c.name, c.description
        FROM industries i
        LEFT JOIN companies_industries ci ON ci.ind_code = i.code
        LEFT JOIN companies c ON c.code = ci.comp_code
        WHERE i.code = $1
        "#,
    )
    .bind(&code)
    .fetch_all(&state.pool)
    .await?;

    let first = rows.first().ok_or(ApiError::NotFound)?;
    let mut detail = IndustryDetail {
        code: first.code.clone(),
        industry: first.industry.clone(),
        companies: Vec::new(),
    };
    for row in &rows {
        if let (Some(code), Some(name), Some(description)) =
            (&row.comp_code, &row.name, &row.description)
        {
            detail.companies.push(Company {
                code: code.clone(),
                name: name.clone(),
                description: description.clone(),
            });
        }
    }

    Ok(Json(json!({ "industry": detail })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: IndustryCreate = parse_body(body, CREATE_FIELDS)?;
    let industry: Industry = sqlx::query_as(
        "INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry",
    )
    .bind(&payload.code)
    .bind(&payload.industry)
    .fetch_one(&state.pool)
    .await?;
    tracing::debug!(code = %industry.code, "industry created");
    Ok((StatusCode::CREATED, Json(json!({ "industry": industry }))))
}

/// Links the path industry to the given company. Neither foreign key is
/// checked up front; an invalid reference surfaces from the database as a
/// foreign-key violation.
pub async fn associate(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: IndustryAssociate = parse_body(body, ASSOCIATE_FIELDS)?;
    sqlx::query("INSERT INTO companies_industries (comp_code, ind_code) VALUES ($1, $2)")
        .bind(&payload.comp_code)
        .bind(&code)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({
        "msg": format!(
            "Success. Associated company '{}' with industry '{}'",
            payload.comp_code, code
        )
    })))
}
