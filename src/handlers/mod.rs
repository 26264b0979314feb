//! HTTP handlers for the company, industry, and invoice resources.

pub mod companies;
pub mod industries;
pub mod invoices;
