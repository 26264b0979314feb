//! Persisted rows, nested response shapes, and per-route request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Invoice entry nested under a company detail (no redundant `comp_code`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// A company merged with its industry labels and invoices.
#[derive(Clone, Debug, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: String,
    pub industries: Vec<String>,
    pub invoices: Vec<InvoiceSummary>,
}

/// An industry merged with its associated companies.
#[derive(Clone, Debug, Serialize)]
pub struct IndustryDetail {
    pub code: String,
    pub industry: String,
    pub companies: Vec<Company>,
}

/// An invoice with its owning company nested under `company`.
#[derive(Clone, Debug, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

// Request payloads, one per mutating route. Unknown fields are ignored;
// presence and primitive types are checked by `validate` before these
// deserialize.

#[derive(Debug, Deserialize)]
pub struct CompanyCreate {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CompanyUpdate {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct IndustryCreate {
    pub code: String,
    pub industry: String,
}

#[derive(Debug, Deserialize)]
pub struct IndustryAssociate {
    pub comp_code: String,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceCreate {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub paid: bool,
}
