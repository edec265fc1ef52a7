use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrStringList {
    String(String),
    StringList(Vec<String>),
}

impl StringOrStringList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            StringOrStringList::String(v) => vec![v.clone()],
            StringOrStringList::StringList(v) => v.clone(),
        }
    }
}

impl From<&str> for StringOrStringList {
    fn from(v: &str) -> Self {
        StringOrStringList::String(v.to_string())
    }
}

impl From<Vec<String>> for StringOrStringList {
    fn from(v: Vec<String>) -> Self {
        StringOrStringList::StringList(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    String(String),
    Object(FieldObject),
}

impl Field {
    pub fn field(&self) -> String {
        match self {
            Field::String(field) => field.clone(),
            Field::Object(FieldObject { field, .. }) => field.clone(),
        }
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::String(v.to_string())
    }
}

impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::String(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldObject {
    pub field: String,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRef {
    pub signal: String,
}

impl SignalRef {
    pub fn new<S: Into<String>>(signal: S) -> Self {
        Self {
            signal: signal.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueOrSignal {
    Signal(SignalRef),
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSpec {
    pub field: StringOrStringList,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrderOrList>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrderSpec {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortOrderOrList {
    Order(SortOrderSpec),
    OrderList(Vec<SortOrderSpec>),
}

/// Distinguishes an absent signal `value` from an explicit `null`: a signal
/// declared with `"value": null` must keep that key when serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MissingNullOrValue {
    #[default]
    Missing,
    Null,
    Value(Value),
}

impl MissingNullOrValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, MissingNullOrValue::Missing)
    }

    pub fn as_option(&self) -> Option<Value> {
        match self {
            MissingNullOrValue::Missing => None,
            MissingNullOrValue::Null => Some(Value::Null),
            MissingNullOrValue::Value(v) => Some(v.clone()),
        }
    }
}

impl From<Option<Value>> for MissingNullOrValue {
    fn from(v: Option<Value>) -> Self {
        match v {
            None => MissingNullOrValue::Missing,
            Some(Value::Null) => MissingNullOrValue::Null,
            Some(v) => MissingNullOrValue::Value(v),
        }
    }
}

impl From<Value> for MissingNullOrValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => MissingNullOrValue::Null,
            v => MissingNullOrValue::Value(v),
        }
    }
}

impl Serialize for MissingNullOrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MissingNullOrValue::Missing | MissingNullOrValue::Null => {
                Value::Null.serialize(serializer)
            }
            MissingNullOrValue::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MissingNullOrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => MissingNullOrValue::Null,
            v => MissingNullOrValue::Value(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MissingNullOrValue;
    use serde_json::json;

    #[test]
    fn test_null_value_round_trip() {
        let missing = MissingNullOrValue::Missing;
        assert!(missing.is_missing());
        assert_eq!(missing.as_option(), None);

        let null: MissingNullOrValue = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(null, MissingNullOrValue::Null);
        assert_eq!(null.as_option(), Some(json!(null)));

        let value: MissingNullOrValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(value, MissingNullOrValue::Value(json!(42)));
    }
}
