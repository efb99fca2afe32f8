//! Validation helpers for user supplied IDs
//!
//! These follow the validator convention of returning every problem as a
//! message instead of stopping at the first one.

use super::ids::ResourceId;
use uuid::Uuid;

/// Check that `value` is a GUID-shaped subscription id
pub fn validate_subscription_id(value: &str) -> Result<Uuid, String> {
    if value.is_empty() {
        return Err("subscription id must not be empty".to_string());
    }
    Uuid::try_parse(value).map_err(|e| format!("{:?} is not a valid subscription id: {}", value, e))
}

/// Validate a user supplied ID of type `T` with a strict parse.
///
/// Returns the error messages for `field`; empty means valid.
pub fn validate_resource_id<T: ResourceId>(value: &str, field: &str) -> Vec<String> {
    let mut errors = Vec::new();
    match T::parse(value) {
        Ok(id) => {
            if let Some(subscription) = id.value_for("subscriptionId") {
                if let Err(e) = validate_subscription_id(subscription) {
                    errors.push(format!("{}: {}", field, e));
                }
            }
        },
        Err(e) => errors.push(format!("{}: {}", field, e)),
    }
    errors
}
