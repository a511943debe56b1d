//! Record <-> JSON object conversion.
//!
//! Attribute names become object keys. Numbers map to `Integer` when they fit
//! an `i64` exactly and to `Float` otherwise; blobs are rendered as arrays of
//! byte values and accepted back in the same form.

use crate::core::{OrmError, Result, Value};
use crate::record::Record;
use serde_json::{Map, Number, Value as JsonValue};

pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Integer(i) => JsonValue::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Blob(b) => JsonValue::Array(b.iter().map(|byte| (*byte).into()).collect()),
    }
}

pub fn value_from_json(json: &JsonValue) -> Result<Value> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(OrmError::Json(format!("Cannot represent number {}", n)))
            }
        }
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Array(items) => {
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                let byte = item
                    .as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| {
                        OrmError::Json(format!("Array element {} is not a byte", item))
                    })?;
                bytes.push(byte);
            }
            Ok(Value::Blob(bytes))
        }
        JsonValue::Object(_) => Err(OrmError::Json(
            "Nested objects are not representable as column values".into(),
        )),
    }
}

pub fn record_to_json(record: &Record) -> JsonValue {
    let mut map = Map::new();
    for (attr, value) in record.iter() {
        map.insert(attr.to_string(), value_to_json(value));
    }
    JsonValue::Object(map)
}

pub fn record_from_json(json: &JsonValue) -> Result<Record> {
    let obj = json
        .as_object()
        .ok_or_else(|| OrmError::Json("Expected a JSON object".into()))?;
    let mut record = Record::new();
    for (attr, value) in obj {
        record.set(attr, value_from_json(value)?);
    }
    Ok(record)
}
