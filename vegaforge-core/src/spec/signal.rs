use crate::spec::values::{MissingNullOrValue, SignalRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "MissingNullOrValue::is_missing")]
    pub value: MissingNullOrValue,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on: Vec<SignalOnSpec>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl SignalSpec {
    pub fn new<S: Into<String>>(name: S, value: MissingNullOrValue) -> Self {
        Self {
            name: name.into(),
            value,
            update: None,
            on: Vec::new(),
            extra: Default::default(),
        }
    }

    /// Append an `on` clause unless an identical events/update pair exists.
    /// Returns true when the clause was actually added.
    pub fn push_on_unique(&mut self, clause: SignalOnSpec) -> bool {
        if self.on.contains(&clause) {
            return false;
        }
        self.on.push(clause);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalOnSpec {
    pub events: SignalOnEventSpec,
    pub update: String,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl SignalOnSpec {
    pub fn selector<E: Into<String>, U: Into<String>>(events: E, update: U) -> Self {
        Self {
            events: SignalOnEventSpec::Selector(events.into()),
            update: update.into(),
            extra: Default::default(),
        }
    }

    pub fn signal<E: Into<String>, U: Into<String>>(events: E, update: U) -> Self {
        Self {
            events: SignalOnEventSpec::Signal(SignalRef::new(events)),
            update: update.into(),
            extra: Default::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalOnEventSpec {
    Signal(SignalRef),
    Selector(String),
    Object(Value),
}

#[cfg(test)]
mod tests {
    use crate::spec::signal::SignalSpec;

    #[test]
    fn test_signal_null_value_not_dropped() {
        // No value is valid
        let s = r#"{"name":"foo"}"#;
        let sig: SignalSpec = serde_json::from_str(s).unwrap();
        let res = serde_json::to_string(&sig).unwrap();
        assert_eq!(res, s);

        // Null value should not be dropped
        let s = r#"{"name":"foo","value":null}"#;
        let sig: SignalSpec = serde_json::from_str(s).unwrap();
        let res = serde_json::to_string(&sig).unwrap();
        assert_eq!(res, s);
    }

    #[test]
    fn test_push_on_unique() {
        let mut sig = SignalSpec::new("hover", Default::default());
        let clause = super::SignalOnSpec::selector("@line0:mouseover", "datum.id");
        assert!(sig.push_on_unique(clause.clone()));
        assert!(!sig.push_on_unique(clause));
        assert_eq!(sig.on.len(), 1);
    }
}
