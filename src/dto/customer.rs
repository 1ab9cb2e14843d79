use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{check_payload, validate_text_len, ExtraFields, MISSING_FIELD};
use crate::entities::customer;
use crate::errors::ServiceError;

/// Customer body for both create and full-replace update.
/// A client may send back the `id` it read; it is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerPayload {
    #[serde(default)]
    #[schema(ignore)]
    pub id: Option<i32>,
    #[validate(required, custom = "validate_text_len")]
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[validate(custom = "validate_text_len")]
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[validate(custom = "validate_text_len")]
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: ExtraFields,
}

/// Validated customer columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerPayload {
    pub fn into_fields(self) -> Result<CustomerFields, ServiceError> {
        check_payload(self.validate(), &self.extra)?;
        let name = self
            .name
            .ok_or_else(|| ServiceError::field("name", MISSING_FIELD))?;
        Ok(CustomerFields {
            name,
            email: self.email,
            address: self.address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            address: model.address,
        }
    }
}

/// Body of a successful create
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerCreatedResponse {
    #[schema(example = "New customer added successfully")]
    pub message: String,
    pub customer: CustomerResponse,
}

impl CustomerCreatedResponse {
    pub fn new(customer: CustomerResponse) -> Self {
        Self {
            message: "New customer added successfully".to_string(),
            customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{too_long_message, UNKNOWN_FIELD};
    use assert_matches::assert_matches;
    use rstest::rstest;

    fn payload(name: Option<&str>, email: Option<&str>, address: Option<&str>) -> CustomerPayload {
        CustomerPayload {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            address: address.map(str::to_string),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(payload(Some("Alice"), Some("a@x.com"), Some("1 Main St")))]
    #[case(payload(Some("Bob"), None, None))]
    #[case(payload(Some(""), None, Some("")))]
    fn accepts_valid_payloads(#[case] input: CustomerPayload) {
        let expected = input.clone();
        let fields = input.into_fields().unwrap();
        assert_eq!(Some(fields.name), expected.name);
        assert_eq!(fields.email, expected.email);
        assert_eq!(fields.address, expected.address);
    }

    #[test]
    fn missing_name_is_a_field_error() {
        let err = payload(None, Some("a@x.com"), None).into_fields().unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(fields) => {
            assert_eq!(fields["name"], vec![MISSING_FIELD.to_string()]);
        });
    }

    #[rstest]
    #[case("name")]
    #[case("email")]
    #[case("address")]
    fn overlong_values_are_rejected(#[case] field: &str) {
        let long = "x".repeat(226);
        let mut input = payload(Some("Alice"), None, None);
        match field {
            "name" => input.name = Some(long),
            "email" => input.email = Some(long),
            _ => input.address = Some(long),
        }
        let err = input.into_fields().unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(fields) => {
            assert_eq!(fields[field], vec![too_long_message()]);
        });
    }

    #[test]
    fn echoed_id_is_ignored() {
        let input: CustomerPayload =
            serde_json::from_str(r#"{"id":7,"name":"Alice","email":null,"address":null}"#).unwrap();
        let fields = input.into_fields().unwrap();
        assert_eq!(fields.name, "Alice");
    }

    #[test]
    fn unknown_fields_are_field_errors() {
        let input: CustomerPayload =
            serde_json::from_str(r#"{"name":"Alice","phone":"555"}"#).unwrap();
        let err = input.into_fields().unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields["phone"], vec![UNKNOWN_FIELD.to_string()]);
        });
    }
}
