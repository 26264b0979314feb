//! Request-body validation: presence first, then primitive types, then the
//! typed payload.

use crate::error::{ApiError, TypeMismatch};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Number,
    Bool,
}

impl FieldKind {
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Number => "number",
            FieldKind::Bool => "boolean",
        }
    }

    fn matches(self, v: &Value) -> bool {
        match self {
            FieldKind::Str => v.is_string(),
            FieldKind::Number => v.is_number(),
            FieldKind::Bool => v.is_boolean(),
        }
    }
}

/// One required field of a route's request body.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { name, kind }
    }
}

/// Checks `body` against `fields` and deserializes it into the route's
/// payload type.
///
/// Presence is a key-presence check, so `0` and `false` are valid values.
/// All missing names are reported in one error; if none are missing, all
/// type mismatches are reported in one error. `null` counts as a mismatch.
pub fn parse_body<T: DeserializeOwned>(body: Value, fields: &[FieldSpec]) -> Result<T, ApiError> {
    let map = match &body {
        Value::Object(m) => m,
        _ => return Err(ApiError::BadRequest("body must be a JSON object".into())),
    };

    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|f| !map.contains_key(f.name))
        .map(|f| f.name)
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }

    let mismatches: Vec<TypeMismatch> = fields
        .iter()
        .filter(|f| !f.kind.matches(&map[f.name]))
        .map(|f| TypeMismatch { field: f.name, expected: f.kind.expected() })
        .collect();
    if !mismatches.is_empty() {
        return Err(ApiError::InvalidTypes(mismatches));
    }

    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(format!("invalid body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvoiceCreate, InvoiceUpdate};
    use serde_json::json;

    const CREATE_FIELDS: &[FieldSpec] = &[
        FieldSpec::new("comp_code", FieldKind::Str),
        FieldSpec::new("amt", FieldKind::Number),
    ];

    const UPDATE_FIELDS: &[FieldSpec] = &[
        FieldSpec::new("amt", FieldKind::Number),
        FieldSpec::new("paid", FieldKind::Bool),
    ];

    #[test]
    fn all_missing_fields_are_listed() {
        let err = parse_body::<InvoiceCreate>(json!({}), CREATE_FIELDS).unwrap_err();
        match err {
            ApiError::MissingFields(names) => assert_eq!(names, vec!["comp_code", "amt"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_fields_reported_before_type_errors() {
        let err = parse_body::<InvoiceCreate>(json!({"amt": "many"}), CREATE_FIELDS).unwrap_err();
        match err {
            ApiError::MissingFields(names) => assert_eq!(names, vec!["comp_code"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn all_type_errors_are_listed() {
        let err = parse_body::<InvoiceCreate>(
            json!({"comp_code": 7, "amt": "many"}),
            CREATE_FIELDS,
        )
        .unwrap_err();
        match err {
            ApiError::InvalidTypes(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0].field, "comp_code");
                assert_eq!(list[0].expected, "string");
                assert_eq!(list[1].field, "amt");
                assert_eq!(list[1].expected, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_is_a_type_mismatch() {
        let err = parse_body::<InvoiceCreate>(
            json!({"comp_code": "apple", "amt": null}),
            CREATE_FIELDS,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidTypes(_)));
    }

    #[test]
    fn zero_amount_is_present() {
        let payload: InvoiceCreate =
            parse_body(json!({"comp_code": "apple", "amt": 0}), CREATE_FIELDS).unwrap();
        assert_eq!(payload.amt, 0.0);
    }

    #[test]
    fn explicit_false_paid_is_present() {
        let payload: InvoiceUpdate =
            parse_body(json!({"amt": 12.5, "paid": false}), UPDATE_FIELDS).unwrap();
        assert!(!payload.paid);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let payload: InvoiceCreate = parse_body(
            json!({"comp_code": "apple", "amt": 100, "note": "rush order"}),
            CREATE_FIELDS,
        )
        .unwrap();
        assert_eq!(payload.comp_code, "apple");
    }

    #[test]
    fn body_must_be_an_object() {
        let err = parse_body::<InvoiceCreate>(json!([1, 2]), CREATE_FIELDS).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
