pub mod customer;
pub mod order;
pub mod product;

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

use crate::entities::Identifiable;
use crate::errors::{FieldErrors, ServiceError};

/// Longest string any text column accepts, counted in characters
pub const MAX_TEXT_LEN: usize = 225;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";

/// Body keys no payload field claims. Reported back as field errors.
pub type ExtraFields = BTreeMap<String, serde_json::Value>;

pub fn too_long_message() -> String {
    format!("Longer than maximum length {}.", MAX_TEXT_LEN)
}

/// Length check shared by every text column
pub fn validate_text_len(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_LEN {
        let mut err = ValidationError::new("length");
        err.message = Some(too_long_message().into());
        return Err(err);
    }
    Ok(())
}

/// Merges derive validation with the unknown keys of the body, so a single
/// response lists every rejected field.
pub(crate) fn check_payload(
    validated: Result<(), ValidationErrors>,
    extra: &ExtraFields,
) -> Result<(), ServiceError> {
    let mut fields = match validated {
        Ok(()) => FieldErrors::new(),
        Err(errors) => crate::errors::collect_field_errors(&errors),
    };
    for key in extra.keys() {
        fields
            .entry(key.clone())
            .or_default()
            .push(UNKNOWN_FIELD.to_string());
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(fields))
    }
}

/// Plain confirmation body: `{"message": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Successfully added item to order")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Confirmation of a physical delete, e.g. `Successfully deleted customer 3`
    pub fn deleted<T: Identifiable>(id: i32) -> Self {
        Self::new(format!("Successfully deleted {} {}", T::RESOURCE, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn text_length_counts_characters() {
        assert!(validate_text_len(&"é".repeat(MAX_TEXT_LEN)).is_ok());
        let err = validate_text_len(&"é".repeat(MAX_TEXT_LEN + 1)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Longer than maximum length 225."));
    }

    #[test]
    fn unknown_keys_join_validation_errors() {
        let mut extra = ExtraFields::new();
        extra.insert("phone".into(), serde_json::json!("555"));
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));

        let err = check_payload(Err(errors), &extra).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(fields) => {
            assert_eq!(fields["phone"], vec![UNKNOWN_FIELD.to_string()]);
            assert_eq!(fields["name"], vec![MISSING_FIELD.to_string()]);
        });
    }

    #[test]
    fn clean_payload_passes() {
        assert!(check_payload(Ok(()), &ExtraFields::new()).is_ok());
    }
}
