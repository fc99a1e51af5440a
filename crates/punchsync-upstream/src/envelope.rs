use serde_json::Value;
use tracing::warn;

use punchsync_core::RawPunch;

use crate::error::{FetchError, Result};

/// Keys under which the upstream wraps its record array. Tried after the
/// bare-array case, in this order.
const ENVELOPE_KEYS: &[&str] = &["data", "PunchData"];

/// Field aliases seen across upstream firmware revisions.
const EMP_CODE_KEYS: &[&str] = &["Empcode", "EmpCode", "emp_code", "EmployeeCode"];
const NAME_KEYS: &[&str] = &["Name", "EmployeeName", "name"];
const PUNCH_TIME_KEYS: &[&str] = &["PunchDate", "PunchTime", "punch_time"];
const FLAG_KEYS: &[&str] = &["INOUT", "InOut", "io_flag", "punch_state"];

/// Pull the record array out of a response body.
///
/// The body may be a JSON document or a JSON-encoded string containing one
/// (some gateways double-encode). The array itself may be bare, or live
/// under `data` or `PunchData`. A body that parses but matches none of
/// those shapes yields an empty result with a warning — the upstream
/// occasionally answers `{"status":"no records"}` for an empty window.
pub fn extract_records(body: &str) -> Result<Vec<Value>> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Decode(format!("body is not JSON: {e}")))?;

    // Unwrap one level of double encoding before shape matching.
    let value = match parsed {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| FetchError::Decode(format!("string body is not JSON: {e}")))?,
        other => other,
    };

    match record_array(&value) {
        Some(items) => Ok(items.to_vec()),
        None => {
            warn!("unrecognized upstream response shape, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Extraction strategies in fixed priority order: bare array first, then
/// each envelope key.
fn record_array(value: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }
    let obj = value.as_object()?;
    for key in ENVELOPE_KEYS {
        if let Some(Value::Array(items)) = obj.get(*key) {
            return Some(items);
        }
    }
    None
}

/// Map one record object to a [`RawPunch`], tolerating field-name drift.
///
/// Missing code or timestamp come through as empty strings — the sync
/// pipeline rejects those downstream where it can count them, keeping the
/// fetched total honest.
pub fn parse_record(value: &Value) -> RawPunch {
    RawPunch {
        emp_code: string_field(value, EMP_CODE_KEYS).unwrap_or_default(),
        name: string_field(value, NAME_KEYS),
        punch_time: string_field(value, PUNCH_TIME_KEYS).unwrap_or_default(),
        flag: string_field(value, FLAG_KEYS),
        source: value.clone(),
    }
}

/// First non-empty value among `keys`, stringified. Numeric employee codes
/// show up on older firmware, so numbers are accepted too.
fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    let obj = value.as_object()?;
    for key in keys {
        match obj.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let records = extract_records(r#"[{"Empcode":"E1"},{"Empcode":"E2"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn data_envelope() {
        let records = extract_records(r#"{"data":[{"Empcode":"E1"}]}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn punchdata_envelope() {
        let records = extract_records(r#"{"PunchData":[{"Empcode":"E1"}]}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn data_wins_over_punchdata() {
        let body = r#"{"data":[{"Empcode":"A"}],"PunchData":[{"Empcode":"B"},{"Empcode":"C"}]}"#;
        let records = extract_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Empcode"], "A");
    }

    #[test]
    fn double_encoded_body() {
        let inner = r#"{"PunchData":[{"Empcode":"E1"}]}"#;
        let body = serde_json::to_string(inner).unwrap();
        let records = extract_records(&body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unrecognized_shape_is_empty() {
        assert!(extract_records(r#"{"status":"no records"}"#).unwrap().is_empty());
        assert!(extract_records("42").unwrap().is_empty());
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(extract_records("<html>login</html>").is_err());
    }

    #[test]
    fn parse_record_standard_fields() {
        let punch = parse_record(&json!({
            "Empcode": "E42",
            "Name": "Alice",
            "PunchDate": "05/03/2024 09:15:30",
            "INOUT": "IN",
        }));
        assert_eq!(punch.emp_code, "E42");
        assert_eq!(punch.name.as_deref(), Some("Alice"));
        assert_eq!(punch.punch_time, "05/03/2024 09:15:30");
        assert_eq!(punch.flag.as_deref(), Some("IN"));
    }

    #[test]
    fn parse_record_alias_fields() {
        let punch = parse_record(&json!({
            "emp_code": "7",
            "EmployeeName": "Bob",
            "punch_time": "05/03/2024 10:00:00",
        }));
        assert_eq!(punch.emp_code, "7");
        assert_eq!(punch.name.as_deref(), Some("Bob"));
    }

    #[test]
    fn parse_record_numeric_code() {
        let punch = parse_record(&json!({"Empcode": 1042, "PunchDate": "01/01/2024 08:00:00"}));
        assert_eq!(punch.emp_code, "1042");
    }

    #[test]
    fn parse_record_missing_fields_are_empty() {
        let punch = parse_record(&json!({"Name": "Ghost"}));
        assert!(punch.emp_code.is_empty());
        assert!(punch.punch_time.is_empty());
        // Original payload retained for diagnostics.
        assert_eq!(punch.source["Name"], "Ghost");
    }
}
