use crate::spec::values::SignalRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ScaleTypeSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ScaleDomainSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ScaleRangeSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,

    #[serde(rename = "paddingInner", skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,

    #[serde(rename = "paddingOuter", skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ScaleSpec {
    pub fn new<S: Into<String>>(name: S, type_: ScaleTypeSpec) -> Self {
        Self {
            name: name.into(),
            type_: Some(type_),
            domain: None,
            range: None,
            padding: None,
            padding_inner: None,
            padding_outer: None,
            nice: None,
            zero: None,
            round: None,
            reverse: None,
            extra: Default::default(),
        }
    }

    pub fn scale_type(&self) -> ScaleTypeSpec {
        self.type_.unwrap_or_default()
    }

    /// Mutable access to the domain's field list, when the domain is a
    /// data-fields reference
    pub fn domain_fields_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.domain {
            Some(ScaleDomainSpec::FieldsReference(fields_ref)) => Some(&mut fields_ref.fields),
            _ => None,
        }
    }

    /// True when the scale's domain is a data-fields reference that never
    /// accumulated a field. These scales are pruned from the final spec.
    pub fn has_empty_domain(&self) -> bool {
        match &self.domain {
            Some(ScaleDomainSpec::FieldsReference(fields_ref)) => fields_ref.fields.is_empty(),
            None => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTypeSpec {
    #[default]
    Linear,
    Log,
    Sqrt,
    Symlog,
    Time,
    Utc,
    Ordinal,
    Band,
    Point,
}

impl ScaleTypeSpec {
    pub fn is_discrete(&self) -> bool {
        use ScaleTypeSpec::*;
        matches!(self, Ordinal | Band | Point)
    }

    pub fn is_continuous(&self) -> bool {
        !self.is_discrete()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDomainSpec {
    FieldsReference(ScaleDataFieldsRef),
    FieldReference(ScaleDataFieldRef),
    Signal(SignalRef),
    Array(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDataFieldsRef {
    pub data: String,
    pub fields: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDataFieldRef {
    pub data: String,
    pub field: String,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleRangeSpec {
    Signal(SignalRef),
    Name(String),
    Array(Vec<Value>),
}
