//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper yields `400 invalid_request` with a `details` object naming
//! the offending field and a stable machine-readable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    CatalogValidationError, Error, ObjectPath, ObjectPathError, ProfileId, ProfileValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidPath,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

fn field_value_error(field: FieldName, message: String, code: &str, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ValidationCode::MissingField.as_str(),
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    field_value_error(
        field,
        format!("{} must be a valid UUID", field.as_str()),
        ValidationCode::InvalidUuid.as_str(),
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Require a profile identifier; absent and blank ids both count as missing.
pub(crate) fn require_profile_id(
    value: Option<String>,
    field: FieldName,
) -> Result<ProfileId, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    ProfileId::new(raw).map_err(|err| match err {
        ProfileValidationError::EmptyId => missing_field_error(field),
    })
}

pub(crate) fn parse_object_path(value: String, field: FieldName) -> Result<ObjectPath, Error> {
    ObjectPath::new(value.as_str()).map_err(|err: ObjectPathError| {
        field_value_error(
            field,
            format!("{}: {err}", field.as_str()),
            ValidationCode::InvalidPath.as_str(),
            &value,
        )
    })
}

/// Convert a draft or patch validation failure into a `400` response.
pub(crate) fn catalog_error(err: CatalogValidationError) -> Error {
    let details = match err.field() {
        Some(field) => json!({ "field": field, "code": err.code() }),
        None => json!({ "code": err.code() }),
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

#[cfg(test)]
mod tests {
    //! Validation error shapes.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn missing_or_blank_profile_ids_are_missing_fields(#[case] value: Option<String>) {
        let err = require_profile_id(value, ID).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: id");
        assert_eq!(
            err.details().expect("details"),
            &json!({ "field": "id", "code": "missing_field" })
        );
    }

    #[test]
    fn profile_id_is_accepted_verbatim() {
        let id = require_profile_id(Some("auth0|42".to_owned()), ID).expect("valid id");
        assert_eq!(id.as_str(), "auth0|42");
    }

    #[test]
    fn invalid_uuid_reports_value() {
        let err = parse_uuid("nope", ID).expect_err("invalid uuid");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "invalid_uuid");
        assert_eq!(details["value"], "nope");
    }

    #[test]
    fn traversal_paths_are_rejected() {
        let err = parse_object_path("../etc/passwd".to_owned(), FieldName::new("path"))
            .expect_err("invalid path");
        assert_eq!(err.details().expect("details")["code"], "invalid_path");
    }

    #[test]
    fn catalog_errors_name_the_field() {
        let err = catalog_error(CatalogValidationError::Negative { field: "price" });
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().expect("details"),
            &json!({ "field": "price", "code": "negative_value" })
        );
    }
}
