//! Change notifications delivered by the observation store.
//!
//! A [`ChangeBatch`] arrives at-least-once and may repeat records. Each
//! record is decoded on its own so one bad record cannot poison the batch:
//! the batch keeps records as raw JSON and [`ChangeNotification::decode`]
//! turns one of them into a typed notification.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{Observation, SubjectId};

/// One delivery of change notifications.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChangeBatch {
    #[serde(default)]
    pub records: Vec<Value>,
}

impl ChangeBatch {
    /// Build a batch from typed notifications.
    pub fn from_notifications<I>(notifications: I) -> Self
    where
        I: IntoIterator<Item = ChangeNotification>,
    {
        let records = notifications
            .into_iter()
            .map(|n| serde_json::to_value(n).unwrap_or(Value::Null))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The kind of mutation a notification describes.
///
/// Tags are matched case-insensitively; anything unrecognised is kept
/// verbatim in [`Operation::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Insert,
    Modify,
    Remove,
    Other(String),
    #[default]
    Unspecified,
}

impl From<String> for Operation {
    fn from(tag: String) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "INSERT" => Self::Insert,
            "MODIFY" => Self::Modify,
            "REMOVE" => Self::Remove,
            "" => Self::Unspecified,
            _ => Self::Other(tag),
        }
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("INSERT"),
            Self::Modify => f.write_str("MODIFY"),
            Self::Remove => f.write_str("REMOVE"),
            Self::Other(tag) => f.write_str(tag),
            Self::Unspecified => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// The new-value payload of a notification.
///
/// Fields are numeric strings as the store delivers them; JSON numbers are
/// accepted too. Nothing is parsed until [`Reading::to_observation`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    #[serde(default)]
    pub patient_id: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Reading {
    /// A payload in the wire form: every field a numeric string.
    pub fn new(patient_id: SubjectId, timestamp: i64, value: i32) -> Self {
        Self {
            patient_id: Some(Value::String(patient_id.to_string())),
            timestamp: Some(Value::String(timestamp.to_string())),
            value: Some(Value::String(value.to_string())),
        }
    }

    /// Parse every field into an [`Observation`].
    pub fn to_observation(&self) -> Result<Observation, CoreError> {
        let subject_id = numeric_field("patientId", self.patient_id.as_ref())?;
        let timestamp = numeric_field("timestamp", self.timestamp.as_ref())?;
        let value = numeric_field("value", self.value.as_ref())?;
        let magnitude = i32::try_from(value).map_err(|_| {
            CoreError::MalformedEvent(format!("value {value} is out of range"))
        })?;

        Ok(Observation {
            subject_id,
            timestamp,
            magnitude,
        })
    }
}

fn numeric_field(name: &str, field: Option<&Value>) -> Result<i64, CoreError> {
    let parsed = match field {
        None | Some(Value::Null) => {
            return Err(CoreError::MalformedEvent(format!("missing {name}")));
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64(),
        Some(_) => None,
    };

    parsed.ok_or_else(|| {
        CoreError::MalformedEvent(format!("{name} is not an integer: {}", field_text(field)))
    })
}

fn field_text(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// ChangeNotification
// ---------------------------------------------------------------------------

/// One record of a [`ChangeBatch`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    #[serde(default)]
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Reading>,
}

impl ChangeNotification {
    /// An insert carrying `reading`.
    pub fn insert(reading: Reading) -> Self {
        Self {
            operation: Operation::Insert,
            new_value: Some(reading),
        }
    }

    pub fn new(operation: Operation, new_value: Option<Reading>) -> Self {
        Self {
            operation,
            new_value,
        }
    }

    /// Decode a raw batch record.
    pub fn decode(raw: &Value) -> Result<Self, CoreError> {
        Self::deserialize(raw).map_err(|e| CoreError::MalformedEvent(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_wire_record() {
        let raw = json!({
            "operation": "INSERT",
            "newValue": {"patientId": "3", "timestamp": "1700000000000", "value": "121"}
        });

        let n = ChangeNotification::decode(&raw).unwrap();
        assert_eq!(n.operation, Operation::Insert);

        let obs = n.new_value.unwrap().to_observation().unwrap();
        assert_eq!(obs, Observation::new(3, 1_700_000_000_000, 121));
    }

    #[test]
    fn operation_tag_is_case_insensitive() {
        assert_eq!(Operation::from("insert".to_string()), Operation::Insert);
        assert_eq!(Operation::from("Remove".to_string()), Operation::Remove);
        assert_eq!(
            Operation::from("TRUNCATE".to_string()),
            Operation::Other("TRUNCATE".into())
        );
    }

    #[test]
    fn missing_operation_and_payload_decode_as_defaults() {
        let n = ChangeNotification::decode(&json!({})).unwrap();
        assert_eq!(n.operation, Operation::Unspecified);
        assert!(n.new_value.is_none());
    }

    #[test]
    fn non_object_record_is_malformed() {
        assert_matches!(
            ChangeNotification::decode(&json!("INSERT")),
            Err(CoreError::MalformedEvent(_))
        );
    }

    #[test]
    fn accepts_json_numbers() {
        let reading = Reading {
            patient_id: Some(json!(4)),
            timestamp: Some(json!(5)),
            value: Some(json!(66)),
        };
        assert_eq!(reading.to_observation().unwrap(), Observation::new(4, 5, 66));
    }

    #[test]
    fn missing_field_is_malformed() {
        let reading = Reading {
            value: None,
            ..Reading::new(1, 2, 3)
        };
        let err = reading.to_observation().unwrap_err();
        assert_eq!(err.to_string(), "Malformed event: missing value");
    }

    #[test]
    fn unparseable_field_is_malformed() {
        let reading = Reading {
            patient_id: Some(json!("abc")),
            ..Reading::new(1, 2, 3)
        };
        assert_matches!(reading.to_observation(), Err(CoreError::MalformedEvent(msg)) if msg.contains("patientId"));
    }

    #[test]
    fn value_beyond_i32_is_malformed() {
        let reading = Reading {
            value: Some(json!("99999999999")),
            ..Reading::new(1, 2, 3)
        };
        assert_matches!(reading.to_observation(), Err(CoreError::MalformedEvent(_)));
    }

    #[test]
    fn batch_round_trips_notifications() {
        let batch = ChangeBatch::from_notifications([
            ChangeNotification::insert(Reading::new(1, 2, 3)),
            ChangeNotification::new(Operation::Remove, None),
        ]);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records[0]["operation"], "INSERT");
        assert_eq!(batch.records[0]["newValue"]["value"], "3");
        assert!(batch.records[1].get("newValue").is_none());
    }

    #[test]
    fn batch_without_records_is_empty() {
        let batch: ChangeBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
    }
}
