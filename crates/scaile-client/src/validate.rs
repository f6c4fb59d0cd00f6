//! Request body validation.

use serde_json::Value;

use crate::{Error, Result};

/// Checks that `data` is an object containing every field in `required`.
///
/// Fields are reported in the order they were required. A value that is
/// not an object is missing all of them.
pub fn validate_fields(data: &Value, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| data.get(**field).is_none())
        .map(|field| (*field).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingFields { missing })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_all_fields_present() {
        let data = json!({"label": "cat", "project_id": "p1", "extra": null});
        assert!(validate_fields(&data, &["label", "project_id"]).is_ok());
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let data = json!({"label": "cat"});
        let error = validate_fields(&data, &["project_id", "label", "score"]).unwrap_err();

        assert_eq!(error.to_string(), "Missing required fields: project_id, score");
    }

    #[test]
    fn test_non_object_misses_everything() {
        let error = validate_fields(&json!([1, 2]), &["a"]).unwrap_err();
        assert!(matches!(error, Error::MissingFields { ref missing } if missing == &["a"]));
    }
}
