use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A Firestore typed value as it appears on the REST wire.
///
/// Integers travel as decimal strings (`{"integerValue": "42"}`), everything
/// else uses its natural JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    // Firestore omits `values` for an empty array.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    /// Convert into plain JSON. Fails only on an integer that is not a valid i64.
    pub fn to_json(&self) -> Result<JsonValue, String> {
        Ok(match self {
            Value::NullValue(()) => JsonValue::Null,
            Value::BooleanValue(b) => JsonValue::Bool(*b),
            Value::IntegerValue(raw) => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| format!("invalid integerValue {raw:?}"))?;
                JsonValue::from(n)
            }
            Value::DoubleValue(d) => serde_json::Number::from_f64(*d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::TimestampValue(s)
            | Value::StringValue(s)
            | Value::BytesValue(s)
            | Value::ReferenceValue(s) => JsonValue::String(s.clone()),
            Value::GeoPointValue(p) => serde_json::json!({
                "latitude": p.latitude,
                "longitude": p.longitude,
            }),
            Value::ArrayValue(arr) => JsonValue::Array(
                arr.values
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::MapValue(map) => JsonValue::Object(fields_to_json(&map.fields)?),
        })
    }

    /// Encode plain JSON as a Firestore value. Integral numbers become
    /// `integerValue`, all other numbers `doubleValue`.
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::NullValue(()),
            JsonValue::Bool(b) => Value::BooleanValue(*b),
            JsonValue::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Value::IntegerValue(n.to_string())
                } else {
                    Value::DoubleValue(n.as_f64().unwrap_or_default())
                }
            }
            JsonValue::String(s) => Value::StringValue(s.clone()),
            JsonValue::Array(items) => Value::ArrayValue(ArrayValue {
                values: items.iter().map(Value::from_json).collect(),
            }),
            JsonValue::Object(obj) => Value::MapValue(MapValue {
                fields: fields_from_json(obj),
            }),
        }
    }
}

pub fn fields_to_json(
    fields: &BTreeMap<String, Value>,
) -> Result<serde_json::Map<String, JsonValue>, String> {
    fields
        .iter()
        .map(|(k, v)| {
            v.to_json()
                .map(|json| (k.clone(), json))
                .map_err(|e| format!("field {k}: {e}"))
        })
        .collect()
}

pub fn fields_from_json(obj: &serde_json::Map<String, JsonValue>) -> BTreeMap<String, Value> {
    obj.iter()
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect()
}
